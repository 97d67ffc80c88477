//! User feedback entries
//!
//! Feedback is a plain directory collection: no verification workflow, no
//! publication status. Submitted by anyone, listed and deleted by admins.

use crate::record::RecordId;
use serde::{Deserialize, Serialize};

/// Input to `FeedbackStore::create_feedback`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedbackDraft {
    /// Short summary of the feedback
    pub subject: String,

    /// Full feedback message
    pub message: String,

    /// Optional contact address for follow-up
    pub contact: Option<String>,
}

/// A persisted feedback entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// Unique identifier
    pub id: RecordId,

    /// Short summary of the feedback
    pub subject: String,

    /// Full feedback message
    pub message: String,

    /// Optional contact address for follow-up
    pub contact: Option<String>,

    /// Submission time (Unix epoch seconds)
    pub created_at: u64,
}
