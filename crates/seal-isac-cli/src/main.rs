//! seal-isac - block, unblock and trust web content on SEAL-ISAC.

use anyhow::Result;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    seal_isac_cli::run().await
}
