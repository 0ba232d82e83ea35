//! Typed resource services over the GraphQL client.
//!
//! Each service owns the query text and payload shapes for one resource
//! family and exposes typed operations. Large listings go through the bulk
//! engine; single fetches and bounded pages go through synchronous queries.

mod collection;
mod errors;
mod fulfillment;
mod location;
mod order;
mod types;

pub use collection::CollectionService;
pub use errors::ResourceError;
pub use fulfillment::FulfillmentService;
pub use location::LocationService;
pub use order::OrderService;
pub use types::{
    Collection, CollectionInput, Customer, FulfillmentInput, FulfillmentOrder,
    FulfillmentOrderLineItem, FulfillmentOrderLineItemInput, FulfillmentOrderLineItemsInput,
    LineItem, LineItemRef, Location, MailingAddress, Money, MoneyBag, Order, OrderInput,
    ProductRef, SelectedOption, ShippingLine, TaxLine, TrackingInfoInput, Transaction,
    VariantRef,
};

use serde::Deserialize;

use crate::clients::graphql::UserError;

/// The common payload shape of mutations that return only `userErrors`.
#[derive(Deserialize)]
pub(crate) struct MutationPayload {
    #[serde(rename = "userErrors", default)]
    pub(crate) user_errors: Vec<UserError>,
}
