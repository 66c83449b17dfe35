//! Command line argument parsing

use crate::core::ServerKind;
use crate::platform::client::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::platform::ClientConfig;
use clap::Parser;
use std::time::Duration;

/// Resolve playable stream URLs for a GogoCDN-hosted episode
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Episode page URL or episode id (e.g. 'spy-x-family-episode-1')
    pub episode: String,

    /// Server id ('anime' for the main player, anything else uses the vidcdn link)
    #[arg(short, long, value_name = "ID", default_value = "anime")]
    pub server: String,

    /// Try the supported servers in order until one has sources
    #[arg(long, conflicts_with = "server")]
    pub fallback: bool,

    /// List the servers offered on the episode page and exit
    #[arg(long)]
    pub list_servers: bool,

    /// Sort sources best quality first
    #[arg(long)]
    pub sort: bool,

    /// Print sources as JSON
    #[arg(long)]
    pub json: bool,

    /// Print only the first source URL
    #[arg(short = 'g', long)]
    pub print_url: bool,

    /// HTTP timeout (e.g., 30s, 1m)
    #[arg(long, value_name = "DURATION", default_value = "30s")]
    pub timeout: humantime::Duration,

    /// Override User-Agent header
    #[arg(long, value_name = "USER_AGENT")]
    pub user_agent: Option<String>,

    /// Proxy URL (http/https/socks)
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Site root used to expand episode ids
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Get HTTP timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        self.timeout.into()
    }

    /// Server ids to try, in order
    pub fn server_ids(&self) -> Vec<&str> {
        if self.fallback {
            ServerKind::supported_ids().to_vec()
        } else {
            vec![self.server.as_str()]
        }
    }

    /// HTTP configuration derived from the flags
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: self.timeout_duration(),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            proxy_url: self.proxy.clone(),
            base_url: self.base_url.clone(),
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default tracing filter for the verbosity level
    pub fn log_level(&self) -> &'static str {
        match self.verbosity_level() {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["goload", "spy-x-family-episode-1"]);
        assert_eq!(args.episode, "spy-x-family-episode-1");
        assert_eq!(args.server, "anime");
        assert_eq!(args.timeout_duration(), Duration::from_secs(30));
        assert_eq!(args.base_url, "https://anitaku.so");
        assert_eq!(args.server_ids(), vec!["anime"]);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Normal);
        assert_eq!(args.log_level(), "info");
    }

    #[test]
    fn test_args_server_and_flags() {
        let args = Args::parse_from([
            "goload",
            "--server",
            "vidcdn",
            "--sort",
            "--json",
            "--timeout",
            "1m",
            "-v",
            "https://anitaku.so/one-piece-episode-1",
        ]);
        assert_eq!(args.server_ids(), vec!["vidcdn"]);
        assert!(args.sort);
        assert!(args.json);
        assert_eq!(args.timeout_duration(), Duration::from_secs(60));
        assert_eq!(args.log_level(), "debug");
    }

    #[test]
    fn test_args_fallback() {
        let args = Args::parse_from(["goload", "--fallback", "ep"]);
        assert_eq!(args.server_ids(), vec!["anime", "vidcdn"]);
        assert!(Args::try_parse_from(["goload", "--fallback", "--server", "x", "ep"]).is_err());
    }

    #[test]
    fn test_client_config() {
        let args = Args::parse_from([
            "goload",
            "--user-agent",
            "ua",
            "--proxy",
            "socks5://127.0.0.1:9050",
            "--base-url",
            "https://mirror.example",
            "ep",
        ]);
        let config = args.client_config();
        assert_eq!(config.user_agent, "ua");
        assert_eq!(config.proxy_url.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.base_url, "https://mirror.example");
    }

    #[test]
    fn test_quiet_wins() {
        let args = Args::parse_from(["goload", "-q", "-v", "ep"]);
        assert_eq!(args.verbosity_level(), VerbosityLevel::Quiet);
        assert_eq!(args.log_level(), "error");
    }
}
