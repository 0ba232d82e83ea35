//! Bulk job lifecycle: submission and polling.
//!
//! A bulk query runs as a remote job. Submission returns a job identifier,
//! and the job is then polled until it reaches a terminal status. Polling
//! uses a doubling backoff capped at a maximum interval, bounded by an
//! overall deadline, and can be interrupted at any point by a cancellation
//! token. Cancellation abandons the remote job rather than waiting out the
//! in-flight poll interval.

use std::time::Duration;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::clients::graphql::{GraphqlClient, UserError};

use super::errors::BulkError;

const RUN_QUERY_MUTATION: &str = "\
mutation bulkOperationRunQuery($query: String!) {
    bulkOperationRunQuery(query: $query) {
        bulkOperation {
            id
            status
        }
        userErrors {
            field
            message
        }
    }
}";

const JOB_STATUS_QUERY: &str = "\
query bulkOperationStatus($id: ID!) {
    node(id: $id) {
        ... on BulkOperation {
            id
            status
            errorCode
            objectCount
            url
        }
    }
}";

/// The lifecycle status of a remote bulk job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// The job has been accepted but not yet started.
    Created,
    /// The job is executing.
    Running,
    /// A cancellation request has been acknowledged but not yet applied.
    Canceling,
    /// The job was canceled on the remote side.
    Canceled,
    /// The job finished and its result file is available.
    Completed,
    /// The result file's retention window elapsed before it was fetched.
    Expired,
    /// The job failed; `errorCode` carries the reason.
    Failed,
}

impl JobStatus {
    /// Returns `true` when no further status transitions are possible.
    ///
    /// `Canceling` is not terminal: the remote either finishes the job
    /// anyway or transitions it to `Canceled`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Completed | Self::Expired | Self::Failed)
    }
}

/// A snapshot of a remote bulk job, as returned by a status poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkJob {
    /// The job's globally unique identifier.
    pub id: String,

    /// The job's lifecycle status at poll time.
    pub status: JobStatus,

    /// The failure reason, present only for failed jobs.
    #[serde(default)]
    pub error_code: Option<String>,

    /// The number of objects processed so far, as a decimal string.
    ///
    /// The wire format uses an unsigned 64-bit scalar serialized as a
    /// string; [`object_count`](Self::object_count) parses it.
    #[serde(default)]
    pub object_count: Option<String>,

    /// The pre-signed result file URL, present once the job completes with
    /// at least one object.
    #[serde(default)]
    pub url: Option<String>,
}

impl BulkJob {
    /// Returns the processed object count, treating absent or unparseable
    /// values as zero.
    #[must_use]
    pub fn object_count(&self) -> u64 {
        self.object_count
            .as_deref()
            .and_then(|count| count.parse().ok())
            .unwrap_or(0)
    }
}

/// Polling behavior for [`BulkOperation`](super::BulkOperation) queries.
///
/// The poll interval starts at `initial_interval` and doubles after every
/// non-terminal poll until it reaches `max_interval`. The `deadline` bounds
/// the whole wait, measured from the first poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// The delay before the second poll. The first poll is immediate.
    pub initial_interval: Duration,

    /// The ceiling the doubling backoff converges to.
    pub max_interval: Duration,

    /// The overall time budget for the job to reach a terminal status.
    pub deadline: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(8),
            deadline: Duration::from_secs(600),
        }
    }
}

#[derive(Deserialize)]
struct RunQueryData {
    #[serde(rename = "bulkOperationRunQuery")]
    payload: RunQueryPayload,
}

#[derive(Deserialize)]
struct RunQueryPayload {
    #[serde(rename = "bulkOperation")]
    bulk_operation: Option<SubmittedJob>,
    #[serde(rename = "userErrors", default)]
    user_errors: Vec<UserError>,
}

#[derive(Deserialize)]
struct SubmittedJob {
    id: String,
}

#[derive(Deserialize)]
struct JobStatusData {
    node: Option<BulkJob>,
}

/// Submits a bulk query and returns the identifier of the accepted job.
pub(super) async fn submit(client: &GraphqlClient, query: &str) -> Result<String, BulkError> {
    let data: RunQueryData = client
        .mutate(RUN_QUERY_MUTATION, serde_json::json!({ "query": query }))
        .await?;

    let payload = data.payload;
    if !payload.user_errors.is_empty() {
        return Err(BulkError::Submission {
            errors: payload.user_errors,
        });
    }

    let job = payload
        .bulk_operation
        .ok_or_else(|| BulkError::InvariantViolation {
            job_id: String::new(),
            detail: "submission returned neither a job nor userErrors".to_string(),
        })?;

    tracing::debug!(job_id = %job.id, "bulk query submitted");
    Ok(job.id)
}

/// Polls a job until it reaches a terminal status.
///
/// Returns the result file URL, or `None` when the job completed with zero
/// objects and therefore has no result file.
pub(super) async fn poll_until_complete(
    client: &GraphqlClient,
    job_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
) -> Result<Option<String>, BulkError> {
    let deadline = tokio::time::Instant::now() + config.deadline;
    let mut interval = config.initial_interval;

    loop {
        if cancel.is_cancelled() {
            return Err(BulkError::Canceled {
                job_id: job_id.to_string(),
            });
        }

        let job = fetch_status(client, job_id).await?;
        tracing::debug!(
            job_id,
            status = ?job.status,
            objects = job.object_count(),
            "bulk job polled"
        );

        match job.status {
            JobStatus::Completed => {
                return match job.url {
                    Some(url) => Ok(Some(url)),
                    None if job.object_count() == 0 => Ok(None),
                    None => Err(BulkError::InvariantViolation {
                        job_id: job_id.to_string(),
                        detail: format!(
                            "completed with {} objects but no result URL",
                            job.object_count()
                        ),
                    }),
                };
            }
            JobStatus::Created | JobStatus::Running | JobStatus::Canceling => {}
            status @ (JobStatus::Canceled | JobStatus::Expired | JobStatus::Failed) => {
                return Err(BulkError::JobFailed {
                    job_id: job_id.to_string(),
                    status,
                    reason: job.error_code,
                });
            }
        }

        let now = tokio::time::Instant::now();
        if now >= deadline {
            return Err(BulkError::Timeout {
                job_id: job_id.to_string(),
            });
        }

        // Never sleep past the deadline; wake exactly on it if it lands
        // inside this interval.
        let wake = std::cmp::min(now + interval, deadline);
        tokio::select! {
            () = cancel.cancelled() => {
                return Err(BulkError::Canceled {
                    job_id: job_id.to_string(),
                });
            }
            () = tokio::time::sleep_until(wake) => {}
        }

        if tokio::time::Instant::now() >= deadline {
            return Err(BulkError::Timeout {
                job_id: job_id.to_string(),
            });
        }

        interval = std::cmp::min(interval * 2, config.max_interval);
    }
}

async fn fetch_status(client: &GraphqlClient, job_id: &str) -> Result<BulkJob, BulkError> {
    let data: JobStatusData = client
        .query(JOB_STATUS_QUERY, serde_json::json!({ "id": job_id }))
        .await?;

    data.node.ok_or_else(|| BulkError::InvariantViolation {
        job_id: job_id.to_string(),
        detail: "status query returned no node for the job".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_deserializes_screaming_snake_case() {
        let status: JobStatus = serde_json::from_str(r#""RUNNING""#).unwrap();
        assert_eq!(status, JobStatus::Running);

        let status: JobStatus = serde_json::from_str(r#""COMPLETED""#).unwrap();
        assert_eq!(status, JobStatus::Completed);

        let status: JobStatus = serde_json::from_str(r#""CANCELING""#).unwrap();
        assert_eq!(status, JobStatus::Canceling);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Canceled.is_terminal());
        assert!(JobStatus::Expired.is_terminal());
        assert!(JobStatus::Failed.is_terminal());

        assert!(!JobStatus::Created.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Canceling.is_terminal());
    }

    #[test]
    fn test_bulk_job_deserializes_poll_response() {
        let job: BulkJob = serde_json::from_str(
            r#"{
                "id": "gid://shopify/BulkOperation/123",
                "status": "COMPLETED",
                "errorCode": null,
                "objectCount": "42",
                "url": "https://storage.example.com/result.jsonl"
            }"#,
        )
        .unwrap();

        assert_eq!(job.id, "gid://shopify/BulkOperation/123");
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.object_count(), 42);
        assert!(job.url.is_some());
    }

    #[test]
    fn test_object_count_defaults_to_zero() {
        let job: BulkJob = serde_json::from_str(
            r#"{"id": "gid://shopify/BulkOperation/1", "status": "CREATED"}"#,
        )
        .unwrap();
        assert_eq!(job.object_count(), 0);

        let job: BulkJob = serde_json::from_str(
            r#"{"id": "gid://shopify/BulkOperation/1", "status": "RUNNING", "objectCount": "bogus"}"#,
        )
        .unwrap();
        assert_eq!(job.object_count(), 0);
    }

    #[test]
    fn test_poll_config_defaults() {
        let config = PollConfig::default();
        assert_eq!(config.initial_interval, Duration::from_millis(500));
        assert_eq!(config.max_interval, Duration::from_secs(8));
        assert_eq!(config.deadline, Duration::from_secs(600));
    }
}
