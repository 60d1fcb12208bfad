//! # seal-isac-cli
//!
//! Command-line interface for SEAL-ISAC web content reputation.
//!
//! ## Features
//!
//! - **URL commands**: `block-url`, `unblock-url`, `allow-url`, `untrust-url`
//!   act on the URL's host name
//! - **Status lookup**: `status` for any domain, IP address or URL
//! - **Configuration**: flags, `SEAL_ISAC_*` environment variables or a TOML file
//! - **Output formats**: pretty `[+]` lines or JSON

pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use cli::run;
