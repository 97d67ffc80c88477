//! Verification state machine for editorial content
//!
//! The source system tracked two correlated string fields (`status` and
//! `aiVerificationResult`) whose joint invariant had to be maintained by
//! convention. Here the pair is modeled as one tagged enum, `Verification`,
//! and the publication status is derived from it, so the workflow cannot
//! write an invalid combination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Notes stored on a record while verification is in flight
pub const PENDING_NOTES: &str = "Verification in progress";

/// Publication status of a content record
///
/// Only `Approved` records are shown to end users. Workflow-driven writes
/// derive this from [`Verification`]; manual administrative review sets it
/// directly (last-write-wins, no version token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    /// Awaiting manual review (not produced by the workflow)
    Pending,

    /// Background verification is in flight
    AiVerifying,

    /// Publicly visible
    Approved,

    /// Not publicly visible
    Rejected,
}

impl ContentStatus {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::AiVerifying => "ai_verifying",
            ContentStatus::Approved => "approved",
            ContentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContentStatus::Pending),
            "ai_verifying" => Ok(ContentStatus::AiVerifying),
            "approved" => Ok(ContentStatus::Approved),
            "rejected" => Ok(ContentStatus::Rejected),
            _ => Err(format!("Unknown content status: {}", s)),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joint verification state of a record: result + explanatory notes
///
/// State machine (workflow-driven transitions only):
///
/// ```text
///         create              oracle verdict: verified
/// [none] ------> [Pending] ----------------------------> [Verified]
///                    |
///                    | oracle verdict: not verified, or any oracle error
///                    v
///          [NotVerified] / [Error]
/// ```
///
/// `Verified`, `NotVerified`, and `Error` are terminal: once verification
/// leaves `Pending` the workflow never revisits the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verification {
    /// Verification task scheduled but not yet resolved
    Pending {
        /// Placeholder notes shown while the task is in flight
        notes: String,
    },

    /// The oracle judged the content valid
    Verified {
        /// Oracle explanation for the verdict
        notes: String,
    },

    /// The oracle judged the content invalid
    NotVerified {
        /// Oracle explanation for the verdict
        notes: String,
    },

    /// The oracle call itself failed (network, timeout, unparseable output)
    Error {
        /// Failure description, prefixed "AI verification failed: "
        notes: String,
    },
}

impl Verification {
    /// Initial state for every newly created record
    pub fn pending() -> Self {
        Verification::Pending {
            notes: PENDING_NOTES.to_string(),
        }
    }

    /// The publication status this verification state implies
    pub fn status(&self) -> ContentStatus {
        match self {
            Verification::Pending { .. } => ContentStatus::AiVerifying,
            Verification::Verified { .. } => ContentStatus::Approved,
            Verification::NotVerified { .. } | Verification::Error { .. } => {
                ContentStatus::Rejected
            }
        }
    }

    /// Storage/wire representation of the result tag
    pub fn result_str(&self) -> &'static str {
        match self {
            Verification::Pending { .. } => "pending",
            Verification::Verified { .. } => "verified",
            Verification::NotVerified { .. } => "not_verified",
            Verification::Error { .. } => "error",
        }
    }

    /// The explanatory notes carried alongside the result
    pub fn notes(&self) -> &str {
        match self {
            Verification::Pending { notes }
            | Verification::Verified { notes }
            | Verification::NotVerified { notes }
            | Verification::Error { notes } => notes,
        }
    }

    /// Whether the workflow is done with this record
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verification::Pending { .. })
    }

    /// Reassemble from the storage layer's (result, notes) columns
    pub fn from_parts(result: &str, notes: String) -> Result<Self, String> {
        match result {
            "pending" => Ok(Verification::Pending { notes }),
            "verified" => Ok(Verification::Verified { notes }),
            "not_verified" => Ok(Verification::NotVerified { notes }),
            "error" => Ok(Verification::Error { notes }),
            _ => Err(format!("Unknown verification result: {}", result)),
        }
    }
}

/// Structured verdict returned by the verification oracle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the oracle judged the content valid
    pub is_verified: bool,

    /// Free-text explanation for the judgment
    pub notes: String,
}

/// Failure reported by the verification oracle
///
/// Transport errors, timeouts, and unparseable oracle output all collapse
/// into this one kind at the oracle boundary; the workflow only needs the
/// message to record a terminal `Error` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct VerificationError(String);

impl VerificationError {
    /// Create a verification error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The failure message
    pub fn message(&self) -> &str {
        &self.0
    }
}
