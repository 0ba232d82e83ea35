//! Data model types for the resource services.
//!
//! Output types decode both synchronous query responses and reassembled bulk
//! results: list fields use [`nodes`](crate::pagination::nodes) so the
//! connection shape and the plain-array shape land in the same `Vec`. Input
//! types serialize into the mutation variables the Admin API expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::nodes;

/// A monetary amount in a specific currency.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// The decimal amount, as a string to avoid float rounding.
    pub amount: Option<String>,

    /// The ISO 4217 currency code.
    pub currency_code: Option<String>,
}

/// An amount in both shop and presentment currencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyBag {
    /// The amount in the shop's base currency.
    pub shop_money: Option<Money>,

    /// The amount in the currency the buyer paid in.
    pub presentment_money: Option<Money>,
}

/// A postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MailingAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
}

/// The customer attached to an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<String>,
    pub legacy_resource_id: Option<String>,
    pub first_name: Option<String>,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

/// An order's shipping method and price.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLine {
    pub title: Option<String>,
    pub original_price_set: Option<MoneyBag>,
}

/// A single tax applied to an order or line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxLine {
    pub title: Option<String>,
    pub rate: Option<f64>,
    pub rate_percentage: Option<f64>,
    pub price_set: Option<MoneyBag>,
}

/// A payment transaction on an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub processed_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub kind: Option<String>,
    pub test: Option<bool>,
    pub amount_set: Option<MoneyBag>,
}

/// A chosen product option, e.g. `Size: XL`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// A reference to a product from another resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: Option<String>,
    pub legacy_resource_id: Option<String>,
}

/// A reference to a product variant from another resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariantRef {
    pub id: Option<String>,
    pub legacy_resource_id: Option<String>,

    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

/// One purchasable line of an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: Option<String>,
    pub sku: Option<String>,
    pub title: Option<String>,
    pub variant_title: Option<String>,
    pub vendor: Option<String>,
    pub quantity: Option<i64>,
    pub fulfillable_quantity: Option<i64>,
    pub fulfillment_status: Option<String>,
    pub product: Option<ProductRef>,
    pub variant: Option<VariantRef>,
    pub original_total_set: Option<MoneyBag>,
    pub original_unit_price_set: Option<MoneyBag>,
    pub discounted_unit_price_set: Option<MoneyBag>,
    pub discounted_total_set: Option<MoneyBag>,
}

/// The order line item referenced by a fulfillment order line item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRef {
    pub sku: Option<String>,
}

/// One line of a fulfillment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrderLineItem {
    pub id: Option<String>,
    pub remaining_quantity: Option<i64>,
    pub total_quantity: Option<i64>,
    pub line_item: Option<LineItemRef>,
}

/// A unit of fulfillment work assigned to a location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrder {
    pub id: Option<String>,
    pub status: Option<String>,

    #[serde(default, deserialize_with = "nodes")]
    pub line_items: Vec<FulfillmentOrderLineItem>,
}

/// An order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Option<String>,
    pub legacy_resource_id: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub client_ip: Option<String>,
    pub note: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub customer: Option<Customer>,
    pub shipping_address: Option<MailingAddress>,
    pub shipping_line: Option<ShippingLine>,
    pub total_received_set: Option<MoneyBag>,

    #[serde(default)]
    pub tax_lines: Vec<TaxLine>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default, deserialize_with = "nodes")]
    pub line_items: Vec<LineItem>,

    #[serde(default, deserialize_with = "nodes")]
    pub fulfillment_orders: Vec<FulfillmentOrder>,
}

/// A collection of products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: Option<String>,
    pub handle: Option<String>,
    pub title: Option<String>,

    #[serde(default, deserialize_with = "nodes")]
    pub products: Vec<ProductRef>,
}

/// A physical or app-defined location.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Fields to change on an existing order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    /// The order to update.
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Fields for creating or updating a collection.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInput {
    /// Required when updating, absent when creating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
}

/// Tracking details attached to a fulfillment.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfoInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One fulfillment order line to fulfill, with the quantity.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrderLineItemInput {
    pub id: String,
    pub quantity: i64,
}

/// The lines of one fulfillment order to include in a fulfillment.
///
/// An empty `fulfillment_order_line_items` fulfills the whole fulfillment
/// order, so it is omitted from the payload rather than sent as `[]`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrderLineItemsInput {
    pub fulfillment_order_id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fulfillment_order_line_items: Vec<FulfillmentOrderLineItemInput>,
}

/// Fields for creating a fulfillment.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentInput {
    pub line_items_by_fulfillment_order: Vec<FulfillmentOrderLineItemsInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_customer: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<TrackingInfoInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_decodes_connection_shape() {
        let order: Order = serde_json::from_value(json!({
            "id": "gid://shopify/Order/1",
            "name": "#1001",
            "createdAt": "2024-05-01T12:00:00Z",
            "lineItems": {
                "edges": [
                    {"node": {"id": "gid://shopify/LineItem/11", "sku": "A", "quantity": 2}}
                ]
            },
            "fulfillmentOrders": {
                "edges": [
                    {"node": {"id": "gid://shopify/FulfillmentOrder/10", "status": "OPEN"}}
                ]
            }
        }))
        .unwrap();

        assert_eq!(order.name.as_deref(), Some("#1001"));
        assert_eq!(order.line_items.len(), 1);
        assert_eq!(order.line_items[0].sku.as_deref(), Some("A"));
        assert_eq!(order.fulfillment_orders.len(), 1);
    }

    #[test]
    fn test_order_decodes_bulk_array_shape() {
        let order: Order = serde_json::from_value(json!({
            "id": "gid://shopify/Order/1",
            "lineItems": [
                {"id": "gid://shopify/LineItem/11", "sku": "A"},
                {"id": "gid://shopify/LineItem/12", "sku": "B"}
            ]
        }))
        .unwrap();

        assert_eq!(order.line_items.len(), 2);
        assert_eq!(order.line_items[1].sku.as_deref(), Some("B"));
    }

    #[test]
    fn test_order_without_nested_lists_decodes_empty() {
        let order: Order =
            serde_json::from_value(json!({"id": "gid://shopify/Order/1"})).unwrap();
        assert!(order.line_items.is_empty());
        assert!(order.fulfillment_orders.is_empty());
        assert!(order.tags.is_empty());
    }

    #[test]
    fn test_money_bag_decodes_nested_amounts() {
        let bag: MoneyBag = serde_json::from_value(json!({
            "shopMoney": {"amount": "12.34", "currencyCode": "USD"}
        }))
        .unwrap();
        assert_eq!(bag.shop_money.unwrap().amount.as_deref(), Some("12.34"));
        assert!(bag.presentment_money.is_none());
    }

    #[test]
    fn test_order_input_omits_unset_fields() {
        let input = OrderInput {
            id: "gid://shopify/Order/1".to_string(),
            note: Some("updated".to_string()),
            tags: None,
        };
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(value["id"], "gid://shopify/Order/1");
        assert_eq!(value["note"], "updated");
        assert!(value.get("tags").is_none());
    }

    #[test]
    fn test_fulfillment_input_serializes_camel_case() {
        let input = FulfillmentInput {
            line_items_by_fulfillment_order: vec![FulfillmentOrderLineItemsInput {
                fulfillment_order_id: "gid://shopify/FulfillmentOrder/10".to_string(),
                fulfillment_order_line_items: vec![FulfillmentOrderLineItemInput {
                    id: "gid://shopify/FulfillmentOrderLineItem/100".to_string(),
                    quantity: 1,
                }],
            }],
            notify_customer: Some(true),
            tracking_info: None,
        };
        let value = serde_json::to_value(&input).unwrap();

        let by_order = &value["lineItemsByFulfillmentOrder"][0];
        assert_eq!(
            by_order["fulfillmentOrderId"],
            "gid://shopify/FulfillmentOrder/10"
        );
        assert_eq!(by_order["fulfillmentOrderLineItems"][0]["quantity"], 1);
        assert_eq!(value["notifyCustomer"], true);
        assert!(value.get("trackingInfo").is_none());
    }

    #[test]
    fn test_whole_fulfillment_order_omits_empty_line_items() {
        let input = FulfillmentOrderLineItemsInput {
            fulfillment_order_id: "gid://shopify/FulfillmentOrder/10".to_string(),
            fulfillment_order_line_items: Vec::new(),
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.get("fulfillmentOrderLineItems").is_none());
    }
}
