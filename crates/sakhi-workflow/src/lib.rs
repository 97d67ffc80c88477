//! Sakhi Verification Workflow
//!
//! Coordinates the two-phase creation-then-verification sequence for
//! editorial content and guarantees every record reaches a terminal status
//! even when the external oracle fails.
//!
//! # Overview
//!
//! - `submit` persists a record in the `AiVerifying`/`Pending` state and
//!   returns it immediately; the caller never waits on the oracle
//! - A detached tokio task (no join handle) runs the verification phase and
//!   communicates its result only by updating the record in the store
//! - All task-side failures are terminal and local: an oracle error becomes
//!   a `Rejected`/`Error` record, a record deleted mid-flight is logged and
//!   discarded, and nothing ever propagates back to request-handling code
//!
//! There is no retry, cancellation, or dead-letter mechanism: a record stuck
//! in `AiVerifying` (e.g., process crash between create and verify) is
//! recovered by manual administrative review.
//!
//! # Examples
//!
//! ```no_run
//! use sakhi_workflow::VerificationWorkflow;
//! use sakhi_store::SqliteContentStore;
//! use sakhi_oracle::OllamaOracle;
//! use sakhi_domain::{ContentBody, LocalizedText};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(SqliteContentStore::new("sakhi.db")?);
//! let oracle = Arc::new(OllamaOracle::default_endpoint("llama3"));
//! let workflow = VerificationWorkflow::new(store, oracle);
//!
//! let body = ContentBody::Law {
//!     title: LocalizedText::new("Some Act", "कोई अधिनियम"),
//!     description: LocalizedText::new("Details", "विवरण"),
//! };
//!
//! // Returns as soon as the record is persisted; verification runs detached.
//! let record = workflow.submit(body, "admin-1")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use sakhi_domain::traits::{ContentStore, UpdateOutcome, VerificationOracle};
use sakhi_domain::{ContentBody, ContentDraft, ContentRecord, Verification};
use std::fmt::Display;
use std::sync::Arc;

/// Orchestrates record creation and detached background verification
///
/// Cloning is cheap; all clones share the same store and oracle.
pub struct VerificationWorkflow<S> {
    store: Arc<S>,
    oracle: Arc<dyn VerificationOracle>,
}

impl<S> Clone for VerificationWorkflow<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            oracle: Arc::clone(&self.oracle),
        }
    }
}

impl<S> VerificationWorkflow<S>
where
    S: ContentStore + Send + Sync + 'static,
    S::Error: Display + Send,
{
    /// Create a workflow over the given store and oracle
    pub fn new(store: Arc<S>, oracle: Arc<dyn VerificationOracle>) -> Self {
        Self { store, oracle }
    }

    /// Persist new content and schedule its verification
    ///
    /// The record is created with `status = AiVerifying` and a pending
    /// verification, and returned as soon as it is persisted. Exactly one
    /// detached verification task is scheduled per created record, after the
    /// record is durably stored; the task's completion is never awaited here.
    ///
    /// Must be called within a tokio runtime (the task is spawned onto it).
    ///
    /// # Errors
    ///
    /// Creation failures (duplicate title, database errors) propagate to the
    /// caller; no task is scheduled in that case.
    pub fn submit(
        &self,
        body: ContentBody,
        created_by: impl Into<String>,
    ) -> Result<ContentRecord, S::Error> {
        let record = self.store.create(ContentDraft {
            body,
            created_by: created_by.into(),
        })?;

        tracing::info!(
            id = %record.id,
            kind = record.body.kind().as_str(),
            "content created, scheduling verification"
        );

        let store = Arc::clone(&self.store);
        let oracle = Arc::clone(&self.oracle);
        let task_record = record.clone();
        tokio::spawn(async move {
            run_verification(store, oracle, task_record).await;
        });

        Ok(record)
    }
}

/// The detached verification phase for one record
///
/// Never returns an error: every failure is converted into a terminal state
/// on the record, or logged and discarded when the record no longer exists.
async fn run_verification<S>(
    store: Arc<S>,
    oracle: Arc<dyn VerificationOracle>,
    record: ContentRecord,
) where
    S: ContentStore,
    S::Error: Display,
{
    let id = record.id;

    let verification = match oracle.verify(&record.body).await {
        Ok(verdict) if verdict.is_verified => Verification::Verified {
            notes: verdict.notes,
        },
        Ok(verdict) => Verification::NotVerified {
            notes: verdict.notes,
        },
        Err(e) => Verification::Error {
            notes: format!("AI verification failed: {}", e),
        },
    };

    match store.apply_verdict(id, verification) {
        Ok(UpdateOutcome::Updated(updated)) => {
            tracing::info!(
                %id,
                status = updated.status.as_str(),
                result = updated.verification.result_str(),
                "verification complete"
            );
        }
        Ok(UpdateOutcome::NotFound) => {
            // Record deleted while verification was in flight; the verdict
            // has no home and is dropped.
            tracing::warn!(%id, "record gone before verification finished, verdict discarded");
        }
        Err(e) => {
            tracing::error!(%id, error = %e, "failed to persist verification verdict");
        }
    }
}
