//! Main entry point for goload CLI

use clap::Parser;
use goload::cli::output::sources_to_json;
use goload::cli::{Args, OutputFormatter};
use goload::{sort_by_quality, Resolver};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());
    debug!("Starting goload with args: {:?}", args);

    let formatter = OutputFormatter::new(args.verbosity_level());
    match run(&args, &formatter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            formatter.error(&e.to_string());
            if e.should_try_another_server() && !args.fallback {
                formatter.warning("try another server with --server or --fallback");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, formatter: &OutputFormatter) -> goload::Result<()> {
    let resolver = Resolver::new().with_config(args.client_config());

    if args.list_servers {
        let servers = resolver.servers(&args.episode).await?;
        formatter.print_servers(&servers);
        return Ok(());
    }

    let (server, mut sources) = resolver
        .resolve_first_available(&args.episode, &args.server_ids())
        .await?;
    info!("Server '{}' returned {} sources", server, sources.len());

    if args.sort {
        sort_by_quality(&mut sources);
    }

    if args.print_url {
        if let Some(first) = sources.first() {
            println!("{}", first.url);
        }
    } else if args.json {
        println!("{}", sources_to_json(&sources)?);
    } else {
        formatter.info(&format!("{} sources from server '{}'", sources.len(), server));
        formatter.print_sources(&sources);
    }

    Ok(())
}

/// Initialize logging system
fn init_logging(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
