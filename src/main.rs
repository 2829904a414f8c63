use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use staylens_core::{config::Config, filter::Filter, Dataset, NormalizeReport, Report};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "staylens", about = "Hotel listing normalizer and dashboard")]
struct Cli {
    /// Dataset to load. Defaults to `[data] path` from the config file.
    path: Option<PathBuf>,

    /// Print the analysis report as JSON instead of opening the dashboard.
    #[arg(long)]
    headless: bool,

    /// Pretty-print the headless JSON.
    #[arg(long, requires = "headless")]
    pretty: bool,

    /// Write debug logs to $TMPDIR/staylens-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

#[derive(Serialize)]
struct HeadlessOutput<'a> {
    report: &'a Report,
    normalization: &'a NormalizeReport,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let log_path = std::env::temp_dir().join("staylens-debug.log");
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening {}", log_path.display()))?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!(path = %log_path.display(), "staylens debug log started");
    }

    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        if !cli.debug {
            eprintln!("warning: config unreadable ({err:#}), using defaults");
        }
        Config::defaults()
    });

    let path = cli.path.unwrap_or_else(|| config.data.path.clone());
    let dataset = Dataset::load(&path, &config.normalize)
        .with_context(|| format!("loading dataset {}", path.display()))?;

    if cli.headless {
        let rows = Filter::default().apply(dataset.records());
        let report = Report::build(&rows, &config.ui);
        let output = HeadlessOutput {
            report: &report,
            normalization: dataset.report(),
        };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        println!("{json}");
        return Ok(());
    }

    staylens_tui::run(dataset, config)
}
