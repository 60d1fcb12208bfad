//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Block, unblock and trust web content on SEAL-ISAC
///
/// URL commands act on the URL's host name. Credentials come from flags,
/// SEAL_ISAC_* environment variables, or the config file.
#[derive(Parser, Debug)]
#[command(name = "seal-isac")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Platform base URL (default https://sealisac.org)
    #[arg(long, env = "SEAL_ISAC_HOST", global = true)]
    pub host: Option<String>,

    /// Platform API key
    #[arg(short = 'k', long, env = "SEAL_ISAC_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Identity recorded as creator (identity--...)
    #[arg(long, env = "SEAL_ISAC_IDENTITY", global = true)]
    pub identity: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Block a given url
    BlockUrl(BlockArgs),

    /// Unblock a given url without trusting it
    UnblockUrl(UrlArgs),

    /// Trust a given url
    AllowUrl(UrlArgs),

    /// Remove trust from a given url
    UntrustUrl(UrlArgs),

    /// Show the status of a domain, IP address or URL
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct UrlArgs {
    /// The url to act on
    pub url: String,
}

#[derive(Args, Debug)]
pub struct BlockArgs {
    /// The url to block
    pub url: String,

    /// Force the url to be blocked, even if it's currently trusted
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Domain, IPv4/IPv6 address or URL
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_block_force_flag() {
        let cli = Cli::try_parse_from(["seal-isac", "block-url", "https://a.example.com", "--force"])
            .unwrap();
        match cli.command {
            Commands::BlockUrl(args) => {
                assert_eq!(args.url, "https://a.example.com");
                assert!(args.force);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_url_required() {
        assert!(Cli::try_parse_from(["seal-isac", "allow-url"]).is_err());
    }
}
