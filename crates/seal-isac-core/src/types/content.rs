use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use url::Url;

use crate::ids::{self, StixId};
use crate::{IsacError, Result};

/// The kinds of web content whose reputation can be tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentKind {
    /// A DNS domain name
    #[serde(rename = "domain-name")]
    DomainName,
    /// An IPv4 address
    #[serde(rename = "ipv4-addr")]
    Ipv4Addr,
    /// An IPv6 address
    #[serde(rename = "ipv6-addr")]
    Ipv6Addr,
    /// A URL
    #[serde(rename = "url")]
    Url,
}

impl ContentKind {
    /// STIX cyber-observable type name, also used as the pattern object path
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomainName => "domain-name",
            Self::Ipv4Addr => "ipv4-addr",
            Self::Ipv6Addr => "ipv6-addr",
            Self::Url => "url",
        }
    }

    /// Entity type name used by the threat-intel platform
    #[must_use]
    pub const fn platform_type(self) -> &'static str {
        match self {
            Self::DomainName => "Domain-Name",
            Self::Ipv4Addr => "IPv4-Addr",
            Self::Ipv6Addr => "IPv6-Addr",
            Self::Url => "Url",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece of web content: a domain, an IP address or a URL
///
/// Two values with the same kind and value always map to the same
/// observable and indicator identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    /// What kind of content this is
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// The raw value, kept exactly as supplied
    pub value: String,
}

impl Content {
    /// Create content of an explicit kind
    #[must_use]
    pub fn new(kind: ContentKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Domain name content
    #[must_use]
    pub fn domain(value: impl Into<String>) -> Self {
        Self::new(ContentKind::DomainName, value)
    }

    /// IPv4 address content
    #[must_use]
    pub fn ipv4(value: impl Into<String>) -> Self {
        Self::new(ContentKind::Ipv4Addr, value)
    }

    /// IPv6 address content
    #[must_use]
    pub fn ipv6(value: impl Into<String>) -> Self {
        Self::new(ContentKind::Ipv6Addr, value)
    }

    /// URL content
    #[must_use]
    pub fn url(value: impl Into<String>) -> Self {
        Self::new(ContentKind::Url, value)
    }

    /// Classify a free-form string.
    ///
    /// IP literals win over URLs, and URLs over domain names. A string that
    /// is none of these (including a hostname outside the ICANN suffix
    /// list) yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.parse::<Ipv4Addr>().is_ok() {
            return Some(Self::ipv4(raw));
        }
        if raw.parse::<Ipv6Addr>().is_ok() {
            return Some(Self::ipv6(raw));
        }
        if Url::parse(raw).is_ok() {
            return Some(Self::url(raw));
        }
        if is_icann_domain(raw) {
            return Some(Self::domain(raw));
        }
        None
    }

    /// Deterministic identifier of the observable for this content
    #[must_use]
    pub fn observable_id(&self) -> StixId {
        ids::observable_id(self)
    }

    /// STIX pattern matching exactly this content.
    ///
    /// Only single quotes are escaped; backslashes in the value pass
    /// through untouched.
    #[must_use]
    pub fn pattern(&self) -> String {
        format!(
            "[{}:value = '{}']",
            self.kind.as_str(),
            escape_single_quotes(&self.value)
        )
    }

    /// Deterministic identifier of the indicator for this content
    #[must_use]
    pub fn indicator_id(&self) -> StixId {
        ids::indicator_id(&self.pattern())
    }

    /// The host of a web URL as domain content.
    ///
    /// Returns `Ok(None)` for non-URL content and for URLs whose scheme is
    /// not `http` or `https` (for example `ipfs://`). URL content whose value
    /// does not parse is an [`IsacError::InvalidContent`].
    pub fn web_host(&self) -> Result<Option<Self>> {
        if self.kind != ContentKind::Url {
            return Ok(None);
        }
        let url = Url::parse(&self.value)
            .map_err(|e| IsacError::InvalidContent(format!("{}: {e}", self.value)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Ok(None);
        }
        let host = url
            .host_str()
            .ok_or_else(|| IsacError::InvalidUrl(format!("{} has no host", self.value)))?;
        Ok(Some(Self::domain(host)))
    }
}

impl std::fmt::Display for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// True when `value` is a syntactically valid hostname under an ICANN TLD.
///
/// Private public-suffix rules are ignored, so only the top-level label
/// decides.
fn is_icann_domain(value: &str) -> bool {
    let host = value.strip_suffix('.').unwrap_or(value).to_lowercase();
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    if !host.split('.').all(is_valid_label) {
        return false;
    }
    let tld = host.rsplit('.').next().unwrap_or_default();
    matches!(
        psl::suffix(tld.as_bytes()).and_then(|suffix| suffix.typ()),
        Some(psl::Type::Icann)
    )
}

fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label.chars().count() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
