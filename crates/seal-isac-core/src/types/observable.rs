use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::label::{LegacyLabel, ReputationLabel};
use crate::ids::StixId;

/// A content node in the threat-intel store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observable {
    /// Deterministic identifier
    pub id: StixId,

    /// Label names currently attached
    #[serde(default)]
    pub labels: BTreeSet<String>,

    /// Marking definition ids
    #[serde(default)]
    pub markings: Vec<String>,

    /// Identity that created the node
    #[serde(default)]
    pub created_by: Option<StixId>,
}

/// Reputation signal carried by an observable's labels.
///
/// The current and legacy vocabularies are merged here, at read time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSignal {
    /// `trusted web content` or legacy `allowlisted domain`
    Trusted,
    /// legacy `blocklisted domain`
    Blocked,
}

impl Observable {
    /// Returns true if a label with this name is attached
    #[must_use]
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.contains(name)
    }

    /// Labels of the current vocabulary that are attached
    pub fn reputation_labels(&self) -> impl Iterator<Item = ReputationLabel> + '_ {
        self.labels.iter().filter_map(|l| ReputationLabel::from_name(l))
    }

    /// Labels of the legacy vocabulary that are attached
    pub fn legacy_labels(&self) -> impl Iterator<Item = LegacyLabel> + '_ {
        self.labels.iter().filter_map(|l| LegacyLabel::from_name(l))
    }

    /// The merged reputation signal; trust beats block
    #[must_use]
    pub fn signal(&self) -> Option<LabelSignal> {
        let trusted = self.reputation_labels().any(|l| l == ReputationLabel::Trusted);
        let mut legacy_allow = false;
        let mut legacy_block = false;
        for label in self.legacy_labels() {
            match label {
                LegacyLabel::Allowlisted => legacy_allow = true,
                LegacyLabel::Blocklisted => legacy_block = true,
            }
        }

        if trusted || legacy_allow {
            Some(LabelSignal::Trusted)
        } else if legacy_block {
            Some(LabelSignal::Blocked)
        } else {
            None
        }
    }
}
