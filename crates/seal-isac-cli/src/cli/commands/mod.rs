//! Command implementations.

pub mod allow;
pub mod block;
pub mod status;
pub mod unblock;
pub mod untrust;

use anyhow::{Context as _, Result};
use seal_isac::{Content, OpenCtiClient, StixId, WebContentClient};
use url::Url;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Platform API key
    pub api_key: Option<String>,

    /// Creator identity id
    pub identity: Option<String>,

    /// Platform base URL override
    pub host: Option<String>,

    /// Output format
    pub output_format: OutputFormat,
}

impl Context {
    /// Get the API key, returning an error if not set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow::anyhow!("please set SEAL_ISAC_API_KEY"))
    }

    /// Get the creator identity, returning an error if not set.
    pub fn require_identity(&self) -> Result<StixId> {
        let identity = self
            .identity
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow::anyhow!("please set SEAL_ISAC_IDENTITY"))?;

        let identity = StixId::from(identity);
        anyhow::ensure!(
            identity.object_type() == "identity",
            "SEAL_ISAC_IDENTITY must be an identity id (identity--...), got {identity}"
        );
        Ok(identity)
    }

    /// Create a reputation client with the configured API key and host.
    pub fn client(&self) -> Result<WebContentClient<OpenCtiClient>> {
        let key = self.require_api_key()?;
        let mut builder = OpenCtiClient::builder(key);
        if let Some(host) = &self.host {
            builder = builder.host(host);
        }
        let platform = builder.build().context("building platform client")?;
        Ok(WebContentClient::new(platform))
    }
}

/// The domain-name content a URL argument stands for: its host name.
pub fn url_host(raw: &str) -> Result<Content> {
    let url = Url::parse(raw).with_context(|| format!("invalid url: {raw}"))?;
    let host = url
        .host_str()
        .ok_or_else(|| anyhow::anyhow!("url has no host: {raw}"))?;
    Ok(Content::domain(host))
}
