// src/cli.rs
// =============================================================================
// Command-line interface and configuration, using clap's derive API.
//
// Every search setting can also come from an environment variable
// (MAILJSON_*), which is the usual way to configure the server in a
// container. Flags win over environment variables.
// =============================================================================

use crate::fetch::{ContentFetcher, FetchOptions, DEFAULT_MAX_BODY_BYTES, DEFAULT_USER_AGENT};
use crate::resolver::{JsonResolver, ResolveOptions};
use crate::service::{EmailJsonService, DEFAULT_MAX_DEPTH};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::time::Duration;

/// The service as the binary runs it: real fetchers for both the email and
/// the links it follows.
pub type AppService = EmailJsonService<ContentFetcher, ContentFetcher>;

#[derive(Parser, Debug)]
#[command(
    name = "mailjson",
    version,
    about = "Find the JSON payload attached to or linked from an email",
    long_about = "mailjson reads an email (.eml) from a local path or URL and returns the JSON \
                  it carries: the first valid .json attachment, or the first JSON document \
                  reachable by following the links in the email body."
)]
pub struct Cli {
    #[command(flatten)]
    pub search: SearchArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    ///
    /// Example: mailjson serve --bind 127.0.0.1:8080
    Serve {
        /// Address to listen on
        #[arg(long, env = "MAILJSON_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },

    /// Extract the JSON from one email and print it
    ///
    /// Example: mailjson extract ~/Downloads/report.eml
    Extract {
        /// Local path or URL of the email (.eml) file
        path: String,

        /// Print the JSON on a single line
        #[arg(long)]
        compact: bool,
    },
}

// Settings shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Link hops followed from each link in the email body
    #[arg(long, global = true, env = "MAILJSON_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Timeout for fetching the email itself, in seconds
    #[arg(long, global = true, env = "MAILJSON_EMAIL_TIMEOUT_SECS", default_value_t = 15)]
    pub email_timeout_secs: u64,

    /// Timeout for each followed link, in seconds
    #[arg(long, global = true, env = "MAILJSON_LINK_TIMEOUT_SECS", default_value_t = 10)]
    pub link_timeout_secs: u64,

    /// Redirects followed per request
    #[arg(long, global = true, env = "MAILJSON_MAX_REDIRECTS", default_value_t = 5)]
    pub max_redirects: usize,

    /// User-Agent header sent with every HTTP request
    #[arg(long, global = true, env = "MAILJSON_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Largest response body read over HTTP, in bytes
    #[arg(long, global = true, env = "MAILJSON_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Fetch each URL at most once per email
    #[arg(long, global = true, env = "MAILJSON_SKIP_VISITED")]
    pub skip_visited: bool,
}

impl SearchArgs {
    fn fetch_options(&self, timeout_secs: u64) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(timeout_secs),
            max_redirects: self.max_redirects,
            user_agent: self.user_agent.clone(),
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn build_service(&self) -> Result<AppService> {
        let email_fetcher = ContentFetcher::new(&self.fetch_options(self.email_timeout_secs))
            .context("failed to build the HTTP client for emails")?;
        let link_fetcher = ContentFetcher::new(&self.fetch_options(self.link_timeout_secs))
            .context("failed to build the HTTP client for links")?;

        let resolver = JsonResolver::new(
            link_fetcher,
            ResolveOptions {
                skip_visited: self.skip_visited,
            },
        );
        Ok(EmailJsonService::new(email_fetcher, resolver, self.max_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mailjson", "extract", "mail.eml"]).unwrap();
        assert_eq!(cli.search.max_depth, 2);
        assert_eq!(cli.search.email_timeout_secs, 15);
        assert_eq!(cli.search.link_timeout_secs, 10);
        assert_eq!(cli.search.max_redirects, 5);
        assert_eq!(cli.search.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cli.search.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert!(!cli.search.skip_visited);
        assert!(matches!(
            cli.command,
            Commands::Extract { ref path, compact: false } if path == "mail.eml"
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mailjson",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--max-depth",
            "4",
            "--skip-visited",
        ])
        .unwrap();
        assert_eq!(cli.search.max_depth, 4);
        assert!(cli.search.skip_visited);
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.port(), 8080),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_build_service() {
        let cli = Cli::try_parse_from(["mailjson", "extract", "x.eml"]).unwrap();
        assert!(cli.search.build_service().is_ok());
    }
}
