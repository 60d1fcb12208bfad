//! `seal-isac untrust-url` - Remove trust from a URL's host.

use anyhow::Result;
use std::process::ExitCode;

use super::{url_host, Context};
use crate::cli::args::UrlArgs;
use crate::output::{print_status, progress, OutputFormat, StatusReport};

pub async fn execute(ctx: Context, args: UrlArgs) -> Result<ExitCode> {
    let client = ctx.client()?;
    ctx.require_identity()?;

    let pretty = ctx.output_format == OutputFormat::Pretty;
    if pretty {
        progress(format_args!("untrusting url {}", args.url));
    }
    let content = url_host(&args.url)?;

    if client.untrust(&content).await?.is_none() && pretty {
        progress("url is not known");
    }

    // An indicator left active underneath makes the host read as blocked.
    let status = client.status(&content).await?;
    print_status(ctx.output_format, &StatusReport::new(&content, status))?;
    Ok(ExitCode::SUCCESS)
}
