//! `seal-isac allow-url` - Trust a URL's host.

use anyhow::Result;
use seal_isac::Status;
use std::process::ExitCode;

use super::{url_host, Context};
use crate::cli::args::UrlArgs;
use crate::output::progress;

pub async fn execute(ctx: Context, args: UrlArgs) -> Result<ExitCode> {
    let client = ctx.client()?;
    let identity = ctx.require_identity()?;

    progress(format_args!("allowing url {}", args.url));
    let content = url_host(&args.url)?;
    let status = client.status(&content).await?;

    client.trust(&content, &identity).await?;

    let unblocked = if status == Status::Blocked {
        " and unblocked"
    } else {
        ""
    };
    progress(format_args!("trusted{unblocked} {}", content.value));
    Ok(ExitCode::SUCCESS)
}
