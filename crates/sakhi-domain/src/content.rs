//! Editorial content bodies: laws and government schemes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A text field carried in both supported languages
///
/// Every editorial field on the platform is bilingual; neither variant may be
/// empty for a record to pass creation validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English variant
    pub en: String,

    /// Hindi variant
    pub hi: String,
}

impl LocalizedText {
    /// Create a localized text pair
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    /// Whether both variants carry non-whitespace text
    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.hi.trim().is_empty()
    }
}

/// The kind of editorial content a record holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A law entry (title + description)
    Law,

    /// A government scheme entry (name + eligibility + benefits)
    Scheme,
}

impl ContentKind {
    /// Storage/wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Law => "law",
            ContentKind::Scheme => "scheme",
        }
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "law" => Ok(ContentKind::Law),
            "scheme" => Ok(ContentKind::Scheme),
            _ => Err(format!("Unknown content kind: {}", s)),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific content fields for a record
///
/// Tagged by kind so a record can never mix law and scheme fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBody {
    /// A law entry
    Law {
        /// Short title of the law
        title: LocalizedText,
        /// Full description of what the law provides
        description: LocalizedText,
    },

    /// A government scheme entry
    Scheme {
        /// Official scheme name
        name: LocalizedText,
        /// Who qualifies for the scheme
        eligibility: LocalizedText,
        /// What the scheme provides
        benefits: LocalizedText,
    },
}

impl ContentBody {
    /// The kind tag for this body
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentBody::Law { .. } => ContentKind::Law,
            ContentBody::Scheme { .. } => ContentKind::Scheme,
        }
    }

    /// The English title or name, used for display and for the store's
    /// uniqueness constraint
    pub fn display_title(&self) -> &str {
        match self {
            ContentBody::Law { title, .. } => &title.en,
            ContentBody::Scheme { name, .. } => &name.en,
        }
    }

    /// Whether every required field carries text in both languages
    pub fn is_complete(&self) -> bool {
        match self {
            ContentBody::Law { title, description } => {
                title.is_complete() && description.is_complete()
            }
            ContentBody::Scheme {
                name,
                eligibility,
                benefits,
            } => name.is_complete() && eligibility.is_complete() && benefits.is_complete(),
        }
    }
}
