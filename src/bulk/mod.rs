//! Bulk query execution and result reassembly.
//!
//! Listing large datasets through cursor pagination costs one round trip per
//! page and burns rate-limit budget. The bulk API trades latency for
//! throughput: the query is submitted as a remote job, polled until it
//! completes, and its result is downloaded as a JSONL file in which nested
//! connections arrive flattened with parent links. This module drives that
//! whole pipeline and hands back fully nested, typed records.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_graphql::bulk::{BulkOperation, NestedSchema};
//!
//! let schema = NestedSchema::new().child("LineItem", "lineItems");
//! let orders: Vec<Order> = bulk
//!     .query(
//!         "{ orders { edges { node { id name lineItems { edges { node { id sku } } } } } } }",
//!         &schema,
//!     )
//!     .await?;
//! ```

mod errors;
mod fetch;
mod job;
mod reassemble;

pub use errors::BulkError;
pub use job::{BulkJob, JobStatus, PollConfig};
pub use reassemble::NestedSchema;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::clients::graphql::GraphqlClient;

/// Executes bulk queries end to end: submit, poll, fetch, reassemble.
///
/// Cloning is cheap; clones share the underlying GraphQL client.
#[derive(Debug, Clone)]
pub struct BulkOperation {
    client: Arc<GraphqlClient>,
}

// Verify BulkOperation is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BulkOperation>();
};

impl BulkOperation {
    /// Creates a bulk executor over an existing GraphQL client.
    #[must_use]
    pub fn new(client: Arc<GraphqlClient>) -> Self {
        Self { client }
    }

    /// Runs a bulk query with default polling behavior and no cancellation.
    ///
    /// See [`query_with`](Self::query_with).
    ///
    /// # Errors
    ///
    /// Returns [`BulkError`] when any stage of the pipeline fails.
    pub async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        schema: &NestedSchema,
    ) -> Result<Vec<T>, BulkError> {
        self.query_with(query, schema, &PollConfig::default(), &CancellationToken::new())
            .await
    }

    /// Runs a bulk query end to end and decodes the top-level records.
    ///
    /// The query is submitted as a remote job, polled per `poll` until it
    /// reaches a terminal status, and its result file is streamed and
    /// reassembled according to `schema`. A job that completes with zero
    /// objects yields an empty vector.
    ///
    /// Cancelling `cancel` aborts the pipeline at the next await point and
    /// abandons the remote job.
    ///
    /// # Errors
    ///
    /// - [`BulkError::Submission`] when the query is rejected up front
    /// - [`BulkError::Timeout`] when `poll.deadline` elapses first
    /// - [`BulkError::Canceled`] when `cancel` fires
    /// - [`BulkError::JobFailed`] when the remote ends the job unsuccessfully
    /// - [`BulkError::Fetch`] / [`BulkError::Reassembly`] for result-file
    ///   failures
    pub async fn query_with<T: DeserializeOwned>(
        &self,
        query: &str,
        schema: &NestedSchema,
        poll: &PollConfig,
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, BulkError> {
        let job_id = job::submit(&self.client, query).await?;

        let Some(url) = job::poll_until_complete(&self.client, &job_id, poll, cancel).await?
        else {
            tracing::info!(%job_id, "bulk job completed with no objects");
            return Ok(Vec::new());
        };

        let lines = fetch::fetch_lines(self.client.http(), &url).await?;
        let roots = tokio::select! {
            () = cancel.cancelled() => {
                return Err(BulkError::Canceled { job_id });
            }
            result = reassemble::reassemble(lines, schema) => result?,
        };

        tracing::info!(%job_id, records = roots.len(), "bulk result reassembled");
        Ok(serde_json::from_value(serde_json::Value::Array(roots))?)
    }
}
