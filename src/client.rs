//! The top-level client bundling every service.

use std::sync::Arc;

use crate::bulk::BulkOperation;
use crate::clients::graphql::GraphqlClient;
use crate::config::ClientConfig;
use crate::resources::{
    CollectionService, FulfillmentService, LocationService, OrderService,
};

/// The entry point for working with a shop.
///
/// Owns one shared [`GraphqlClient`] and exposes the resource services and
/// the bulk executor over it. Cheap to clone is not a goal here; share a
/// `Client` behind an `Arc` if multiple tasks need it.
///
/// # Example
///
/// ```rust,ignore
/// use shopify_graphql::{AccessToken, Client, ClientConfig, ShopDomain};
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store")?)
///     .access_token(AccessToken::new(token)?)
///     .build()?;
/// let client = Client::new(&config);
///
/// let order = client.orders().get("gid://shopify/Order/123").await?;
/// ```
#[derive(Debug)]
pub struct Client {
    graphql: Arc<GraphqlClient>,
    bulk: BulkOperation,
    orders: OrderService,
    collections: CollectionService,
    fulfillments: FulfillmentService,
    locations: LocationService,
}

// Verify Client is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
};

impl Client {
    /// Creates a client and its services for the given configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let graphql = Arc::new(GraphqlClient::new(config));
        let bulk = BulkOperation::new(Arc::clone(&graphql));

        Self {
            orders: OrderService::new(Arc::clone(&graphql), bulk.clone()),
            collections: CollectionService::new(Arc::clone(&graphql), bulk.clone()),
            fulfillments: FulfillmentService::new(Arc::clone(&graphql)),
            locations: LocationService::new(Arc::clone(&graphql)),
            graphql,
            bulk,
        }
    }

    /// Returns the shared GraphQL client, for ad hoc queries the services
    /// don't cover.
    #[must_use]
    pub fn graphql(&self) -> &Arc<GraphqlClient> {
        &self.graphql
    }

    /// Returns the bulk query executor.
    #[must_use]
    pub const fn bulk(&self) -> &BulkOperation {
        &self.bulk
    }

    /// Returns the order service.
    #[must_use]
    pub const fn orders(&self) -> &OrderService {
        &self.orders
    }

    /// Returns the collection service.
    #[must_use]
    pub const fn collections(&self) -> &CollectionService {
        &self.collections
    }

    /// Returns the fulfillment service.
    #[must_use]
    pub const fn fulfillments(&self) -> &FulfillmentService {
        &self.fulfillments
    }

    /// Returns the location service.
    #[must_use]
    pub const fn locations(&self) -> &LocationService {
        &self.locations
    }
}
