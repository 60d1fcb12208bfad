//! `seal-isac unblock-url` - Revoke the block on a URL's host.

use anyhow::Result;
use seal_isac::Status;
use std::process::ExitCode;

use super::{url_host, Context};
use crate::cli::args::UrlArgs;
use crate::output::progress;

pub async fn execute(ctx: Context, args: UrlArgs) -> Result<ExitCode> {
    let client = ctx.client()?;
    ctx.require_identity()?;

    progress(format_args!("unblocking url {}", args.url));
    let content = url_host(&args.url)?;

    if client.status(&content).await? != Status::Blocked {
        progress("url is not blocked");
        return Ok(ExitCode::FAILURE);
    }

    client.unblock(&content).await?;

    progress(format_args!("removed {} from blocklist", content.value));
    Ok(ExitCode::SUCCESS)
}
