//! HTTP client for OpenCTI-compatible threat-intel stores.
//!
//! This crate provides [`OpenCtiClient`], which speaks the platform's GraphQL
//! API and implements [`seal_isac_core::Store`] so the reconciliation engine
//! can run against a live SEAL-ISAC instance.

#![doc(html_root_url = "https://docs.rs/seal-isac-client/0.2.0")]

pub mod api;
mod client;
mod store;

pub use client::{OpenCtiClient, OpenCtiClientBuilder, DEFAULT_HOST};
pub use seal_isac_core::{IsacError, Result};
