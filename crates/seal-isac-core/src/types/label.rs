use serde::{Deserialize, Serialize};

/// Label applied when web content is considered trusted
pub const TRUSTED_WEB_CONTENT_LABEL: &str = "trusted web content";

/// Deprecated two-state blocklist label
pub const BLOCKLISTED_DOMAIN_LABEL: &str = "blocklisted domain";

/// Deprecated two-state allowlist label
pub const ALLOWLISTED_DOMAIN_LABEL: &str = "allowlisted domain";

/// Reputation labels written by the web content client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReputationLabel {
    /// `trusted web content`
    Trusted,
}

impl ReputationLabel {
    /// Every label in this vocabulary
    pub const ALL: [Self; 1] = [Self::Trusted];

    /// Label name as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trusted => TRUSTED_WEB_CONTENT_LABEL,
        }
    }

    /// Look up a label by its stored name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == name)
    }
}

/// Labels of the deprecated blocklist/allowlist scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegacyLabel {
    /// `blocklisted domain`
    Blocklisted,
    /// `allowlisted domain`
    Allowlisted,
}

impl LegacyLabel {
    /// Every label in this vocabulary
    pub const ALL: [Self; 2] = [Self::Blocklisted, Self::Allowlisted];

    /// Label name as stored
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blocklisted => BLOCKLISTED_DOMAIN_LABEL,
            Self::Allowlisted => ALLOWLISTED_DOMAIN_LABEL,
        }
    }

    /// The label of the opposite list
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Blocklisted => Self::Allowlisted,
            Self::Allowlisted => Self::Blocklisted,
        }
    }

    /// Look up a label by its stored name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == name)
    }
}

/// Every label name either scheme may write, in the order they are stripped
#[must_use]
pub fn all_reputation_label_names() -> [&'static str; 3] {
    [
        LegacyLabel::Allowlisted.as_str(),
        LegacyLabel::Blocklisted.as_str(),
        ReputationLabel::Trusted.as_str(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            ReputationLabel::from_name("trusted web content"),
            Some(ReputationLabel::Trusted)
        );
        assert_eq!(
            LegacyLabel::from_name("allowlisted domain"),
            Some(LegacyLabel::Allowlisted)
        );
        assert_eq!(LegacyLabel::from_name("trusted web content"), None);
        assert_eq!(ReputationLabel::from_name("phishing"), None);
    }

    #[test]
    fn test_opposite() {
        assert_eq!(LegacyLabel::Blocklisted.opposite(), LegacyLabel::Allowlisted);
        assert_eq!(LegacyLabel::Allowlisted.opposite(), LegacyLabel::Blocklisted);
    }
}
