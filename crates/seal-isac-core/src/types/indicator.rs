use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::StixId;

/// A time-bounded detection pattern tied to an observable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    /// Deterministic identifier derived from the pattern
    pub id: StixId,

    /// STIX pattern
    pub pattern: String,

    /// Start of validity
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,

    /// End of validity
    #[serde(default)]
    pub valid_until: Option<DateTime<Utc>>,

    /// Confidence score (0-100)
    #[serde(default)]
    pub score: Option<u8>,

    /// Revocation flag as reported by the store
    #[serde(default)]
    pub revoked: bool,

    /// Identity that created the indicator
    #[serde(default)]
    pub created_by: Option<StixId>,
}

impl Indicator {
    /// Returns true if detection is no longer active.
    ///
    /// Revoking writes a zero score and the store derives the flag, so
    /// either signal counts.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revoked || self.score == Some(0)
    }

    /// Returns true if the indicator still blocks its content
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_revoked()
    }
}
