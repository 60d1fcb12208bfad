//! Reputation reconciliation for SEAL-ISAC web content.
//!
//! Domains, IP addresses and URLs are tracked on an OpenCTI platform as
//! observables (the content itself) and indicators (detection patterns).
//! [`WebContentClient`] turns block/unblock/trust/untrust requests into the
//! minimal set of platform writes, so every operation is safe to repeat.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seal_isac::{ids, Content, OpenCtiClient, WebContentClient};
//!
//! #[tokio::main]
//! async fn main() -> seal_isac::Result<()> {
//!     let platform = OpenCtiClient::new("your-api-key")?;
//!     let client = WebContentClient::new(platform);
//!     let seal = ids::identity_id("SEAL", "organization");
//!
//!     let content = Content::parse("phish.example.com").expect("recognized content");
//!     client.block(&content, &seal).await?;
//!     println!("status: {}", client.status(&content).await?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/seal-isac/0.2.0")]

pub mod legacy;
pub mod memory;
pub mod web_content;

// Re-export core types
pub use seal_isac_core::*;

// Re-export client
pub use seal_isac_client::{OpenCtiClient, OpenCtiClientBuilder, DEFAULT_HOST};

pub use legacy::LegacyClient;
pub use memory::MemoryStore;
pub use web_content::{ObservableChange, ReputationSnapshot, WebContentClient};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
