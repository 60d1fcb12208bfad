//! `seal-isac status` - Show the status of any web content.

use anyhow::Result;
use seal_isac::Content;
use std::process::ExitCode;

use super::Context;
use crate::cli::args::StatusArgs;
use crate::output::{print_status, StatusReport};

pub async fn execute(ctx: Context, args: StatusArgs) -> Result<ExitCode> {
    let Some(content) = Content::parse(args.content.trim()) else {
        eprintln!(
            "unrecognized content: {} (expected a domain, IP address or URL)",
            args.content
        );
        return Ok(ExitCode::FAILURE);
    };

    let client = ctx.client()?;
    let status = client.status(&content).await?;

    print_status(ctx.output_format, &StatusReport::new(&content, status))?;
    Ok(ExitCode::SUCCESS)
}
