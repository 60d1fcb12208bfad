//! Core types and the store contract for SEAL-ISAC web content reputation.
//!
//! This crate provides the foundational pieces shared by the client and the
//! reconciliation engine:
//!
//! - **Content**: [`Content`] classification, STIX patterns and host extraction
//! - **Identifiers**: deterministic, content-addressed [`ids`]
//! - **Records**: [`Observable`], [`Indicator`] and their creation drafts
//! - **Status**: the three-state [`Status`] and the legacy [`LegacyStatus`]
//! - **Store**: the [`Store`] trait any threat-intel backend implements
//! - **Errors**: [`IsacError`]
//!
//! # Example
//!
//! ```rust
//! use seal_isac_core::{Content, ContentKind};
//!
//! let content = Content::parse("1.2.3.4").unwrap();
//! assert_eq!(content.kind, ContentKind::Ipv4Addr);
//! assert_eq!(content.pattern(), "[ipv4-addr:value = '1.2.3.4']");
//! ```

#![doc(html_root_url = "https://docs.rs/seal-isac-core/0.2.0")]

mod error;
pub mod ids;
mod store;
pub mod types;

pub use error::{IsacError, Result};
pub use ids::StixId;
pub use store::Store;
pub use types::*;
