//! Sakhi Domain Layer
//!
//! Core model for the Sakhi content platform: editorial content records
//! (laws and government schemes), the verification state machine they move
//! through, and the trait interfaces the infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **ContentRecord**: A piece of editorial content in two language variants
//! - **Verification**: The joint verification state — one tagged enum instead
//!   of two correlated string fields, so invalid combinations cannot exist
//! - **ContentStatus**: Publication status derived from verification, but
//!   independently overridable by manual review
//! - **VerificationOracle**: The external language-model service that judges
//!   content validity
//!
//! ## Architecture
//!
//! - Pure domain logic; store and oracle implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod content;
pub mod feedback;
pub mod record;
pub mod traits;
pub mod verification;

// Re-exports for convenience
pub use content::{ContentBody, ContentKind, LocalizedText};
pub use feedback::{FeedbackDraft, FeedbackRecord};
pub use record::{ContentDraft, ContentRecord, RecordId};
pub use verification::{ContentStatus, Verdict, Verification, VerificationError};
