use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::content::{Content, ContentKind};
use crate::ids::StixId;

/// Fields for creating an observable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservableDraft {
    /// Content the observable represents
    pub content: Content,

    /// Initial label names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Marking definition ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markings: Vec<String>,

    /// Creating identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<StixId>,

    /// Platform score, only set by the legacy scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

/// Fields for creating an indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorDraft {
    /// Display name (the content value)
    pub name: String,

    /// STIX pattern
    pub pattern: String,

    /// Kind of the observable the pattern matches
    pub main_observable_type: ContentKind,

    /// Confidence score (0-100)
    pub score: u8,

    /// Start of validity
    pub valid_from: DateTime<Utc>,

    /// End of validity
    pub valid_until: DateTime<Utc>,

    /// Creating identity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<StixId>,
}

impl IndicatorDraft {
    /// Pattern language of every indicator this crate writes
    pub const PATTERN_TYPE: &'static str = "stix";
}

/// A single field update on an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPatch {
    /// `valid_from`
    ValidFrom(DateTime<Utc>),
    /// `valid_until`
    ValidUntil(DateTime<Utc>),
    /// `x_opencti_score`
    Score(u8),
    /// `revoked`
    Revoked(bool),
}

impl IndicatorPatch {
    /// Field key as understood by the store
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ValidFrom(_) => "valid_from",
            Self::ValidUntil(_) => "valid_until",
            Self::Score(_) => "x_opencti_score",
            Self::Revoked(_) => "revoked",
        }
    }

    /// Field value list as sent to the store
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        match self {
            Self::ValidFrom(at) | Self::ValidUntil(at) => vec![json!(at.to_rfc3339())],
            Self::Score(score) => vec![json!(score)],
            Self::Revoked(revoked) => vec![json!(revoked)],
        }
    }
}

/// Relationship types this crate creates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    /// URL observable to its host domain observable
    RelatedTo,
    /// Indicator to the observable it detects
    BasedOn,
}

impl RelationshipType {
    /// Relationship type name as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RelatedTo => "related-to",
            Self::BasedOn => "based-on",
        }
    }
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
