//! Order operations.

use std::sync::Arc;

use serde::Deserialize;

use crate::bulk::{BulkOperation, NestedSchema};
use crate::clients::graphql::GraphqlClient;
use crate::pagination::{Connection, ListOptions, Page};

use super::errors::{check_user_errors, ResourceError};
use super::types::{Order, OrderInput};
use super::MutationPayload;

const ORDER_BASE_FIELDS: &str = "\
id
legacyResourceId
name
createdAt
clientIp
note
tags
customer {
    id
    legacyResourceId
    firstName
    displayName
    email
}
shippingAddress {
    address1
    address2
    city
    province
    country
    zip
}
shippingLine {
    title
    originalPriceSet {
        shopMoney { amount currencyCode }
        presentmentMoney { amount currencyCode }
    }
}
totalReceivedSet {
    shopMoney { amount currencyCode }
    presentmentMoney { amount currencyCode }
}
taxLines {
    title
    rate
    ratePercentage
    priceSet {
        shopMoney { amount currencyCode }
    }
}
transactions {
    processedAt
    status
    kind
    test
    amountSet {
        shopMoney { amount currencyCode }
    }
}";

const ORDER_LIGHT_FIELDS: &str = "\
id
legacyResourceId
name
createdAt
tags
customer {
    id
    legacyResourceId
}";

const LINE_ITEM_FRAGMENT: &str = "\
fragment lineItemFields on LineItem {
    id
    sku
    title
    variantTitle
    vendor
    quantity
    fulfillableQuantity
    fulfillmentStatus
    product {
        id
        legacyResourceId
    }
    variant {
        id
        legacyResourceId
        selectedOptions {
            name
            value
        }
    }
    originalTotalSet { shopMoney { amount currencyCode } }
    originalUnitPriceSet { shopMoney { amount currencyCode } }
    discountedUnitPriceSet { shopMoney { amount currencyCode } }
    discountedTotalSet { shopMoney { amount currencyCode } }
}";

const ORDER_UPDATE_MUTATION: &str = "\
mutation orderUpdate($input: OrderInput!) {
    orderUpdate(input: $input) {
        userErrors {
            field
            message
        }
    }
}";

/// Service for order operations.
///
/// Bulk-backed listings ([`list`](Self::list) and [`list_all`](Self::list_all))
/// retrieve every matching order in one remote job; use
/// [`list_after_cursor`](Self::list_after_cursor) when a bounded page is
/// enough.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: Arc<GraphqlClient>,
    bulk: BulkOperation,
}

impl OrderService {
    pub(crate) fn new(client: Arc<GraphqlClient>, bulk: BulkOperation) -> Self {
        Self { client, bulk }
    }

    fn bulk_schema() -> NestedSchema {
        NestedSchema::new()
            .child("LineItem", "lineItems")
            .child("FulfillmentOrder", "fulfillmentOrders")
            .child("FulfillmentOrderLineItem", "lineItems")
    }

    /// Fetches a single order by id, with its line items and fulfillment
    /// orders.
    ///
    /// Returns `Ok(None)` when no order exists with that id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Graphql`] when the query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Order>, ResourceError> {
        let query = format!(
            "query order($id: ID!) {{
    node(id: $id) {{
        ... on Order {{
            {ORDER_BASE_FIELDS}
            lineItems(first: 50) {{
                edges {{
                    node {{
                        ...lineItemFields
                    }}
                }}
            }}
            fulfillmentOrders(first: 5) {{
                edges {{
                    node {{
                        id
                        status
                        lineItems(first: 50) {{
                            edges {{
                                node {{
                                    id
                                    remainingQuantity
                                    totalQuantity
                                    lineItem {{
                                        sku
                                    }}
                                }}
                            }}
                        }}
                    }}
                }}
            }}
        }}
    }}
}}
{LINE_ITEM_FRAGMENT}"
        );

        #[derive(Deserialize)]
        struct NodeData {
            node: Option<Order>,
        }

        let data: NodeData = self
            .client
            .query(&query, serde_json::json!({ "id": id }))
            .await?;
        Ok(data.node)
    }

    /// Lists every order matching a search filter, via a bulk query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Bulk`] when the bulk pipeline fails.
    pub async fn list(&self, filter: &str) -> Result<Vec<Order>, ResourceError> {
        self.list_bulk(Some(filter)).await
    }

    /// Lists every order in the shop, via a bulk query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Bulk`] when the bulk pipeline fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, ResourceError> {
        self.list_bulk(None).await
    }

    async fn list_bulk(&self, filter: Option<&str>) -> Result<Vec<Order>, ResourceError> {
        let connection = filter.map_or_else(
            || "orders".to_string(),
            |filter| format!(r#"orders(query: "{}")"#, escape_filter(filter)),
        );
        let query = format!(
            "{{
    {connection} {{
        edges {{
            node {{
                {ORDER_BASE_FIELDS}
                lineItems {{
                    edges {{
                        node {{
                            ...lineItemFields
                        }}
                    }}
                }}
            }}
        }}
    }}
}}
{LINE_ITEM_FRAGMENT}"
        );

        Ok(self.bulk.query(&query, &Self::bulk_schema()).await?)
    }

    /// Fetches one page of orders with cursor pagination.
    ///
    /// The returned [`Page`] carries the cursors to continue in either
    /// direction. Line items are capped at the first 25 per order; use
    /// [`get`](Self::get) or a bulk listing for complete line items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Pagination`] when `options` mixes paging
    /// directions, and [`ResourceError::Graphql`] when the query fails.
    pub async fn list_after_cursor(
        &self,
        options: &ListOptions,
    ) -> Result<Page<Order>, ResourceError> {
        let query = format!(
            "query orders($query: String, $first: Int, $last: Int, $after: String, $before: String, $reverse: Boolean) {{
    orders(query: $query, first: $first, last: $last, after: $after, before: $before, reverse: $reverse) {{
        edges {{
            node {{
                {ORDER_LIGHT_FIELDS}
                lineItems(first: 25) {{
                    edges {{
                        node {{
                            ...lineItemFields
                        }}
                    }}
                }}
            }}
            cursor
        }}
        pageInfo {{
            hasNextPage
        }}
    }}
}}
{LINE_ITEM_FRAGMENT}"
        );

        #[derive(Deserialize)]
        struct OrdersData {
            orders: Connection<Order>,
        }

        let variables = options.variables()?;
        let data: OrdersData = self.client.query(&query, variables).await?;
        Ok(Page::from(data.orders))
    }

    /// Updates an order's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UserErrors`] when the API rejects the input,
    /// and [`ResourceError::Graphql`] when the mutation fails.
    pub async fn update(&self, input: OrderInput) -> Result<(), ResourceError> {
        #[derive(Deserialize)]
        struct UpdateData {
            #[serde(rename = "orderUpdate")]
            payload: MutationPayload,
        }

        let data: UpdateData = self
            .client
            .mutate(ORDER_UPDATE_MUTATION, serde_json::json!({ "input": input }))
            .await?;
        check_user_errors("orderUpdate", data.payload.user_errors)
    }
}

/// Escapes a search filter for embedding inside a quoted bulk query string.
fn escape_filter(filter: &str) -> String {
    filter.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_filter_quotes_and_backslashes() {
        assert_eq!(escape_filter("status:open"), "status:open");
        assert_eq!(escape_filter(r##"name:"#1001""##), r##"name:\"#1001\""##);
        assert_eq!(escape_filter(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_bulk_schema_covers_all_nested_types() {
        let schema = OrderService::bulk_schema();
        let debug = format!("{schema:?}");
        assert!(debug.contains("LineItem"));
        assert!(debug.contains("FulfillmentOrder"));
        assert!(debug.contains("FulfillmentOrderLineItem"));
    }
}
