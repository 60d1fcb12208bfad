//! Deterministic, content-addressed identifiers.
//!
//! Every identifier is `<type>--<uuid v5>` where the UUID is derived from the
//! canonical JSON (sorted keys, no whitespace) of the properties that make an
//! object unique. Creating the same object twice therefore targets the same
//! identifier, which is what lets the reconcilers look before they create.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::types::Content;

/// Namespace for STIX 2.1 cyber-observable identifiers
const STIX_NAMESPACE: Uuid = Uuid::from_u128(0x00ab_edb4_aa42_466c_9c01_fed2_3315_a9b7);

/// Namespace the threat-intel platform uses for its own deterministic ids
const PLATFORM_NAMESPACE: Uuid = Uuid::from_u128(0xb639_ff3b_00eb_42ed_aa36_a8dd_6f8f_b4cf);

/// TLP:CLEAR marking definition
pub const MARKING_TLP_CLEAR: &str = "marking-definition--94868c89-83c2-464b-929b-a1a8aa3c8487";

/// A STIX identifier such as `domain-name--0f2c…`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StixId(String);

impl StixId {
    /// Wrap an identifier received from the store
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The object type prefix (the part before `--`)
    #[must_use]
    pub fn object_type(&self) -> &str {
        self.0.split_once("--").map_or(&self.0, |(ty, _)| ty)
    }
}

impl std::fmt::Display for StixId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StixId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StixId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

fn derive(object_type: &str, namespace: &Uuid, properties: &Value) -> StixId {
    // serde_json maps are ordered by key, and `to_string` is compact.
    let canonical = properties.to_string();
    let uuid = Uuid::new_v5(namespace, canonical.as_bytes());
    StixId(format!("{object_type}--{uuid}"))
}

/// Identifier of the observable node for a piece of content
#[must_use]
pub fn observable_id(content: &Content) -> StixId {
    derive(
        content.kind.as_str(),
        &STIX_NAMESPACE,
        &json!({ "value": content.value }),
    )
}

/// Identifier of the indicator for a STIX pattern
#[must_use]
pub fn indicator_id(pattern: &str) -> StixId {
    derive("indicator", &PLATFORM_NAMESPACE, &json!({ "pattern": pattern }))
}

/// Identifier of a label entity; label names are case-insensitive
#[must_use]
pub fn label_id(name: &str) -> StixId {
    derive(
        "label",
        &PLATFORM_NAMESPACE,
        &json!({ "value": name.to_lowercase() }),
    )
}

/// Identifier of an identity (organization, individual, ...)
#[must_use]
pub fn identity_id(name: &str, identity_class: &str) -> StixId {
    derive(
        "identity",
        &PLATFORM_NAMESPACE,
        &json!({
            "identity_class": identity_class,
            "name": name.trim().to_lowercase(),
        }),
    )
}
