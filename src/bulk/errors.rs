//! Error types for bulk query execution.
//!
//! Every failure mode of the bulk pipeline is terminal for the call that
//! produced it: nothing is retried internally. Retry policy (e.g.
//! resubmitting a whole bulk job after a fetch failure) is a caller decision,
//! since only the caller knows whether re-running the remote job is
//! acceptable.

use crate::clients::graphql::{GraphqlError, UserError};
use thiserror::Error;

use super::job::JobStatus;

/// Error type for bulk query operations.
///
/// Variants carry the job identifier (or the result line number for
/// reassembly failures) so callers can log and alert with context.
#[derive(Debug, Error)]
pub enum BulkError {
    /// The remote API rejected the bulk query at submission time.
    #[error("Bulk query submission rejected: {}", errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Submission {
        /// The user-level errors reported by the submission mutation.
        errors: Vec<UserError>,
    },

    /// The job did not reach a terminal state before the caller's deadline.
    #[error("Bulk job {job_id} did not complete before the deadline")]
    Timeout {
        /// The identifier of the job that was still running.
        job_id: String,
    },

    /// The caller canceled the operation.
    #[error("Bulk job {job_id} was canceled by the caller")]
    Canceled {
        /// The identifier of the abandoned job.
        job_id: String,
    },

    /// The remote API reported the job as failed, canceled, or expired.
    #[error("Bulk job {job_id} ended as {status:?}{}", reason.as_ref().map(|r| format!(": {r}")).unwrap_or_default())]
    JobFailed {
        /// The identifier of the failed job.
        job_id: String,
        /// The terminal status the remote reported.
        status: JobStatus,
        /// The remote-supplied error code, if any.
        reason: Option<String>,
    },

    /// The remote API broke the bulk job protocol contract.
    ///
    /// For example, a job reported `Completed` with a non-zero object count
    /// but no result URL. Surfaced distinctly so it is never mistaken for an
    /// empty result.
    #[error("Bulk job {job_id} violated the protocol contract: {detail}")]
    InvariantViolation {
        /// The identifier of the offending job.
        job_id: String,
        /// What the remote did that the protocol forbids.
        detail: String,
    },

    /// The result file could not be opened or was interrupted mid-body.
    #[error("Failed to fetch bulk result: {detail}")]
    Fetch {
        /// What went wrong while streaming the result file.
        detail: String,
    },

    /// A result line was malformed or could not be attached to a parent.
    ///
    /// Reassembly aborts on the first such record; no partial result is ever
    /// returned, since a caller cannot distinguish "complete but small" from
    /// "silently truncated".
    #[error("Bulk result line {line}: {detail}")]
    Reassembly {
        /// The 1-based line number of the offending record.
        line: u64,
        /// Why the record could not be processed.
        detail: String,
    },

    /// The RPC collaborator failed while submitting or polling.
    #[error(transparent)]
    Transport(#[from] GraphqlError),

    /// The reassembled result could not be decoded into the requested type.
    #[error("Failed to decode bulk result: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_error_joins_user_errors() {
        let error = BulkError::Submission {
            errors: vec![
                UserError {
                    field: Some(vec!["query".to_string()]),
                    message: "is invalid".to_string(),
                },
                UserError {
                    field: None,
                    message: "a bulk query is already running".to_string(),
                },
            ],
        };
        let message = error.to_string();
        assert!(message.contains("query: is invalid"));
        assert!(message.contains("already running"));
    }

    #[test]
    fn test_job_failed_includes_status_and_reason() {
        let error = BulkError::JobFailed {
            job_id: "gid://shopify/BulkOperation/1".to_string(),
            status: JobStatus::Failed,
            reason: Some("ACCESS_DENIED".to_string()),
        };
        let message = error.to_string();
        assert!(message.contains("gid://shopify/BulkOperation/1"));
        assert!(message.contains("Failed"));
        assert!(message.contains("ACCESS_DENIED"));
    }

    #[test]
    fn test_reassembly_error_carries_line_number() {
        let error = BulkError::Reassembly {
            line: 42,
            detail: "undecodable record".to_string(),
        };
        assert!(error.to_string().contains("line 42"));
    }

    #[test]
    fn test_all_variants_implement_std_error() {
        let error: &dyn std::error::Error = &BulkError::Timeout {
            job_id: "gid://shopify/BulkOperation/2".to_string(),
        };
        let _ = error;
    }
}
