//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::content::{ContentBody, ContentKind};
use crate::feedback::{FeedbackDraft, FeedbackRecord};
use crate::record::{ContentDraft, ContentRecord, RecordId};
use crate::verification::{ContentStatus, Verdict, Verification, VerificationError};
use async_trait::async_trait;

/// Outcome of an update targeting a single record by identifier
///
/// A missing record is a normal, expected outcome (it may have been deleted
/// while a verification task was in flight), so it is part of the success
/// type rather than an error: callers must match on it explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The record was updated; the full post-update record is returned
    Updated(ContentRecord),

    /// No record with the given identifier exists
    NotFound,
}

/// Trait for persisting and retrieving content records
///
/// Implemented by the infrastructure layer (sakhi-store). Updates are scoped
/// to a single record by identifier; the implementation must make each update
/// atomic with respect to concurrent updates of the same record.
pub trait ContentStore {
    /// Error type for store operations
    type Error;

    /// Persist a new record, assigning identity and timestamps
    ///
    /// Every new record starts with `status = AiVerifying` and
    /// `verification = Pending`. Fails with the implementation's duplicate
    /// error if the (kind, title) uniqueness constraint is violated.
    fn create(&self, draft: ContentDraft) -> Result<ContentRecord, Self::Error>;

    /// Fetch a record by identifier
    fn find_by_id(&self, id: RecordId) -> Result<Option<ContentRecord>, Self::Error>;

    /// Apply a verification verdict, setting both the verification state and
    /// the publication status it implies in one atomic write
    fn apply_verdict(
        &self,
        id: RecordId,
        verification: Verification,
    ) -> Result<UpdateOutcome, Self::Error>;

    /// Set the publication status directly (manual administrative review)
    ///
    /// May run at any time, including while verification is in flight;
    /// last-write-wins against a concurrent verdict.
    fn set_status(
        &self,
        id: RecordId,
        status: ContentStatus,
    ) -> Result<UpdateOutcome, Self::Error>;

    /// Delete a record; returns whether a record was actually removed
    fn delete_by_id(&self, id: RecordId) -> Result<bool, Self::Error>;

    /// Query records matching criteria, newest first
    fn query(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, Self::Error>;
}

/// Query criteria for listing content records
#[derive(Debug, Clone, Default)]
pub struct ContentQuery {
    /// Filter by content kind
    pub kind: Option<ContentKind>,

    /// Filter by publication status
    pub status: Option<ContentStatus>,

    /// Filter by authoring principal
    pub created_by: Option<String>,

    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Trait for persisting user feedback entries
///
/// Implemented by the infrastructure layer (sakhi-store)
pub trait FeedbackStore {
    /// Error type for store operations
    type Error;

    /// Persist a new feedback entry, assigning identity and timestamp
    fn create_feedback(&self, draft: FeedbackDraft) -> Result<FeedbackRecord, Self::Error>;

    /// List all feedback entries, newest first
    fn list_feedback(&self) -> Result<Vec<FeedbackRecord>, Self::Error>;

    /// Delete a feedback entry; returns whether an entry was actually removed
    fn delete_feedback(&self, id: RecordId) -> Result<bool, Self::Error>;
}

/// Trait for the external content-verification oracle
///
/// Implemented by the infrastructure layer (sakhi-oracle). The oracle is
/// network-bound, slow, and unreliable: callers must never await it on a
/// synchronous request path, and must not assume identical input yields
/// identical verdicts across calls.
#[async_trait]
pub trait VerificationOracle: Send + Sync {
    /// Judge the given content fields, returning a structured verdict
    ///
    /// All transport, timeout, and parse failures surface as a single
    /// [`VerificationError`] kind.
    async fn verify(&self, content: &ContentBody) -> Result<Verdict, VerificationError>;
}
