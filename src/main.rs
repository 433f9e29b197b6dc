mod analysis;
mod config;
mod demos;
mod input;
mod report;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Diff-Focus: paste a source-control diff, get a heuristic risk assessment
/// (risk tier, file categories, summary, and flagged patterns).
#[derive(Parser, Debug)]
#[command(name = "diff-focus", version, about)]
struct Cli {
    /// Config file (defaults to .diff-focus.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a diff read from a file, a built-in demo, or stdin
    Analyze {
        /// Diff file to read; stdin is used when neither this nor --demo is given
        #[arg(conflicts_with = "demo")]
        file: Option<PathBuf>,

        /// Use a built-in demo diff (see `diff-focus demos`)
        #[arg(long)]
        demo: Option<String>,

        /// Print the report as JSON instead of the terminal layout
        #[arg(long)]
        json: bool,

        /// Write the report to a file (markdown, or JSON with --json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the analyzer over HTTP
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the built-in demo diffs
    Demos,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let mut config = config::Config::load(cli.config.as_deref())?;
    debug!(rules = config.rules.len(), port = config.server.port, "configuration loaded");

    let classifier = analysis::Classifier::with_rules(&config.rules)?;
    debug!(heuristics = classifier.heuristic_count(), "classifier ready");

    match cli.command {
        Command::Analyze {
            file,
            demo,
            json,
            output,
        } => {
            let source = match (&file, &demo) {
                (Some(path), _) => input::Source::File(path),
                (None, Some(key)) => input::Source::Demo(key),
                (None, None) => input::Source::Stdin,
            };
            let _span = info_span!("analyze", source = ?source).entered();

            let diff = input::read(source)?;
            info!(bytes = diff.len(), "classifying diff");
            let built_report = classifier.classify(&diff);
            report::output(&built_report, json, output.as_deref())?;
            info!(risk = %built_report.risk_level, "done");
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(&config.server, classifier).await?;
        }
        Command::Demos => {
            for demo in demos::DEMOS {
                println!("{:<24} {}", demo.key, demo.name);
                println!("{:<24} {}", "", demo.description);
            }
        }
    }

    Ok(())
}
