//! `seal-isac block-url` - Block a URL's host.

use anyhow::Result;
use seal_isac::Status;
use std::process::ExitCode;

use super::{url_host, Context};
use crate::cli::args::BlockArgs;
use crate::output::progress;

pub async fn execute(ctx: Context, args: BlockArgs) -> Result<ExitCode> {
    let client = ctx.client()?;
    let identity = ctx.require_identity()?;

    progress(format_args!("blocking url {}", args.url));
    let content = url_host(&args.url)?;
    let status = client.status(&content).await?;

    if status == Status::Trusted && !args.force {
        progress("url is currently trusted, please use --force to override");
        return Ok(ExitCode::FAILURE);
    }

    if status == Status::Blocked {
        progress("url is already blocked");
        return Ok(ExitCode::SUCCESS);
    }

    client.block(&content, &identity).await?;

    let untrusted = if status == Status::Trusted {
        " and untrusted"
    } else {
        ""
    };
    progress(format_args!("blocked{untrusted} {}", content.value));
    Ok(ExitCode::SUCCESS)
}
