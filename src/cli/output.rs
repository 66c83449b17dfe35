//! Output formatting

use crate::cli::args::VerbosityLevel;
use crate::core::{EpisodeServer, VideoSource};
use colored::Colorize;

/// Output formatter for goload
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "info:".cyan(), message);
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("{} {}", "warning:".yellow(), message);
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "error:".red().bold(), message);
    }

    /// Print resolved sources, one per line
    pub fn print_sources(&self, sources: &[VideoSource]) {
        for source in sources {
            println!("{}", format_source_line(source));
        }
    }

    /// Print servers offered on an episode page
    pub fn print_servers(&self, servers: &[EpisodeServer]) {
        for server in servers {
            println!("{:<8} {}", server.id.bold(), server.display_name);
        }
    }
}

/// `<quality> <hls|file> <url>` with the quality column padded
pub fn format_source_line(source: &VideoSource) -> String {
    let kind = if source.is_adaptive { "hls" } else { "file" };
    format!("{:<8} {:<4} {}", source.quality, kind, source.url)
}

/// Serialize sources for `--json`
pub fn sources_to_json(sources: &[VideoSource]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(sources)
}
