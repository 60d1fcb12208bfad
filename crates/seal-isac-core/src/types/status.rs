use serde::{Deserialize, Serialize};

use super::indicator::Indicator;
use super::label::LegacyLabel;
use super::observable::{LabelSignal, Observable};

/// Reputation of a piece of web content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No active signal either way
    #[default]
    Unknown,
    /// An active indicator or a legacy blocklist label
    Blocked,
    /// A trust label (or legacy allowlist label)
    Trusted,
}

impl Status {
    /// Resolve status from what the store holds for one piece of content.
    ///
    /// Observable labels are consulted first, so a trust label hides an
    /// active indicator underneath it.
    #[must_use]
    pub fn resolve(observable: Option<&Observable>, indicator: Option<&Indicator>) -> Self {
        match observable.and_then(Observable::signal) {
            Some(LabelSignal::Trusted) => return Self::Trusted,
            Some(LabelSignal::Blocked) => return Self::Blocked,
            None => {}
        }

        match indicator {
            Some(indicator) if indicator.is_active() => Self::Blocked,
            _ => Self::Unknown,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Blocked => "blocked",
            Self::Trusted => "trusted",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status in the deprecated two-list scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegacyStatus {
    /// Neither list
    #[default]
    Unknown,
    /// On the blocklist
    Blocklisted,
    /// On the allowlist
    Allowlisted,
}

impl LegacyStatus {
    /// Resolve from the domain observable; the allowlist wins
    #[must_use]
    pub fn resolve(observable: Option<&Observable>) -> Self {
        let Some(observable) = observable else {
            return Self::Unknown;
        };
        if observable.has_label(LegacyLabel::Allowlisted.as_str()) {
            Self::Allowlisted
        } else if observable.has_label(LegacyLabel::Blocklisted.as_str()) {
            Self::Blocklisted
        } else {
            Self::Unknown
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Blocklisted => "blocklisted",
            Self::Allowlisted => "allowlisted",
        }
    }
}

impl std::fmt::Display for LegacyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::StixId;
    use crate::types::label::*;

    fn observable(labels: &[&str]) -> Observable {
        Observable {
            id: StixId::from("url--x"),
            labels: labels.iter().map(ToString::to_string).collect(),
            markings: Vec::new(),
            created_by: None,
        }
    }

    fn indicator(revoked: bool) -> Indicator {
        Indicator {
            id: StixId::from("indicator--x"),
            pattern: "[url:value = 'x']".into(),
            valid_from: None,
            valid_until: None,
            score: Some(if revoked { 0 } else { 100 }),
            revoked,
            created_by: None,
        }
    }

    #[test]
    fn test_resolve_nothing() {
        assert_eq!(Status::resolve(None, None), Status::Unknown);
        assert_eq!(Status::resolve(Some(&observable(&[])), None), Status::Unknown);
    }

    #[test]
    fn test_resolve_indicator() {
        assert_eq!(Status::resolve(None, Some(&indicator(false))), Status::Blocked);
        assert_eq!(Status::resolve(None, Some(&indicator(true))), Status::Unknown);
    }

    #[test]
    fn test_trust_label_hides_active_indicator() {
        let obs = observable(&[TRUSTED_WEB_CONTENT_LABEL]);
        assert_eq!(
            Status::resolve(Some(&obs), Some(&indicator(false))),
            Status::Trusted
        );
    }

    #[test]
    fn test_legacy_labels_map_into_status() {
        let allow = observable(&[ALLOWLISTED_DOMAIN_LABEL]);
        let block = observable(&[BLOCKLISTED_DOMAIN_LABEL]);
        assert_eq!(Status::resolve(Some(&allow), None), Status::Trusted);
        assert_eq!(Status::resolve(Some(&block), Some(&indicator(true))), Status::Blocked);
    }

    #[test]
    fn test_legacy_status() {
        assert_eq!(LegacyStatus::resolve(None), LegacyStatus::Unknown);
        assert_eq!(
            LegacyStatus::resolve(Some(&observable(&[BLOCKLISTED_DOMAIN_LABEL]))),
            LegacyStatus::Blocklisted
        );
        assert_eq!(
            LegacyStatus::resolve(Some(&observable(&[
                BLOCKLISTED_DOMAIN_LABEL,
                ALLOWLISTED_DOMAIN_LABEL
            ]))),
            LegacyStatus::Allowlisted
        );
        // The new trust label is invisible to the legacy scheme.
        assert_eq!(
            LegacyStatus::resolve(Some(&observable(&[TRUSTED_WEB_CONTENT_LABEL]))),
            LegacyStatus::Unknown
        );
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&Status::Blocked).unwrap(), r#""blocked""#);
        assert_eq!(
            serde_json::to_string(&LegacyStatus::Allowlisted).unwrap(),
            r#""allowlisted""#
        );
    }
}
