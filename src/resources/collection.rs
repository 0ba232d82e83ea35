//! Collection operations.

use std::sync::Arc;

use serde::Deserialize;

use crate::bulk::{BulkOperation, NestedSchema};
use crate::clients::graphql::GraphqlClient;
use crate::pagination::{Connection, Page};

use super::errors::{check_user_errors, ResourceError};
use super::types::{Collection, CollectionInput, ProductRef};
use super::MutationPayload;

const COLLECTION_GET_QUERY: &str = "\
query collection($id: ID!, $cursor: String) {
    collection(id: $id) {
        id
        handle
        title
        products(first: 250, after: $cursor) {
            edges {
                node {
                    id
                    legacyResourceId
                }
                cursor
            }
            pageInfo {
                hasNextPage
            }
        }
    }
}";

const COLLECTION_LIST_BULK_QUERY: &str = "\
{
    collections {
        edges {
            node {
                id
                handle
                title
                products {
                    edges {
                        node {
                            id
                            legacyResourceId
                        }
                    }
                }
            }
        }
    }
}";

const COLLECTION_CREATE_MUTATION: &str = "\
mutation collectionCreate($input: CollectionInput!) {
    collectionCreate(input: $input) {
        collection {
            id
        }
        userErrors {
            field
            message
        }
    }
}";

const COLLECTION_UPDATE_MUTATION: &str = "\
mutation collectionUpdate($input: CollectionInput!) {
    collectionUpdate(input: $input) {
        userErrors {
            field
            message
        }
    }
}";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionPage {
    id: Option<String>,
    handle: Option<String>,
    title: Option<String>,
    #[serde(default)]
    products: Option<Connection<ProductRef>>,
}

/// Service for collection operations.
#[derive(Debug, Clone)]
pub struct CollectionService {
    client: Arc<GraphqlClient>,
    bulk: BulkOperation,
}

impl CollectionService {
    pub(crate) fn new(client: Arc<GraphqlClient>, bulk: BulkOperation) -> Self {
        Self { client, bulk }
    }

    /// Fetches a collection by id with its complete product membership.
    ///
    /// The product connection pages at 250 per request; this follows the
    /// cursors until `hasNextPage` is false.
    ///
    /// Returns `Ok(None)` when no collection exists with that id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Graphql`] when any page query fails.
    pub async fn get(&self, id: &str) -> Result<Option<Collection>, ResourceError> {
        let Some(first) = self.get_page(id, None).await? else {
            return Ok(None);
        };

        let mut collection = Collection {
            id: first.id,
            handle: first.handle,
            title: first.title,
            products: Vec::new(),
        };

        let mut page = first.products.map(Page::from);
        loop {
            let Some(current) = page.take() else { break };
            collection.products.extend(current.items);

            let (true, Some(cursor)) = (current.has_next_page, current.last_cursor) else {
                break;
            };
            page = self
                .get_page(id, Some(&cursor))
                .await?
                .and_then(|next| next.products)
                .map(Page::from);
        }

        Ok(Some(collection))
    }

    async fn get_page(
        &self,
        id: &str,
        cursor: Option<&str>,
    ) -> Result<Option<CollectionPage>, ResourceError> {
        #[derive(Deserialize)]
        struct CollectionData {
            collection: Option<CollectionPage>,
        }

        let data: CollectionData = self
            .client
            .query(
                COLLECTION_GET_QUERY,
                serde_json::json!({ "id": id, "cursor": cursor }),
            )
            .await?;
        Ok(data.collection)
    }

    /// Lists every collection with its full product membership, via a bulk
    /// query.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Bulk`] when the bulk pipeline fails.
    pub async fn list_all(&self) -> Result<Vec<Collection>, ResourceError> {
        let schema = NestedSchema::new().child("Product", "products");
        Ok(self.bulk.query(COLLECTION_LIST_BULK_QUERY, &schema).await?)
    }

    /// Creates a collection and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UserErrors`] when the API rejects the input,
    /// and [`ResourceError::Graphql`] when the mutation fails.
    pub async fn create(&self, input: CollectionInput) -> Result<Option<String>, ResourceError> {
        #[derive(Deserialize)]
        struct CreatedCollection {
            id: String,
        }

        #[derive(Deserialize)]
        struct CreatePayload {
            collection: Option<CreatedCollection>,
            #[serde(rename = "userErrors", default)]
            user_errors: Vec<crate::clients::graphql::UserError>,
        }

        #[derive(Deserialize)]
        struct CreateData {
            #[serde(rename = "collectionCreate")]
            payload: CreatePayload,
        }

        let data: CreateData = self
            .client
            .mutate(
                COLLECTION_CREATE_MUTATION,
                serde_json::json!({ "input": input }),
            )
            .await?;
        check_user_errors("collectionCreate", data.payload.user_errors)?;
        Ok(data.payload.collection.map(|collection| collection.id))
    }

    /// Creates a batch of collections, continuing past individual failures.
    ///
    /// Failed creations are logged and skipped so one bad input does not
    /// abort the batch.
    pub async fn create_bulk(&self, inputs: Vec<CollectionInput>) {
        for input in inputs {
            let title = input.title.clone().unwrap_or_default();
            if let Err(error) = self.create(input).await {
                tracing::warn!(%error, title, "couldn't create collection");
            }
        }
    }

    /// Updates a collection's mutable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UserErrors`] when the API rejects the input,
    /// and [`ResourceError::Graphql`] when the mutation fails.
    pub async fn update(&self, input: CollectionInput) -> Result<(), ResourceError> {
        #[derive(Deserialize)]
        struct UpdateData {
            #[serde(rename = "collectionUpdate")]
            payload: MutationPayload,
        }

        let data: UpdateData = self
            .client
            .mutate(
                COLLECTION_UPDATE_MUTATION,
                serde_json::json!({ "input": input }),
            )
            .await?;
        check_user_errors("collectionUpdate", data.payload.user_errors)
    }
}
