//! Narcissus - reflected-origin CORS scanner CLI
//!
//! Records go to stdout as JSONL; everything user-facing (banner,
//! progress, logs, summary) goes to stderr.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing_subscriber::EnvFilter;

use narcissus::config;
use narcissus::models::RunSummary;
use narcissus::report::JsonlSink;
use narcissus::scanner::ScanPool;
use narcissus::source::HostSource;

/// Bulk reflected-origin CORS misconfiguration scanner
#[derive(Parser)]
#[command(name = "narcissus", version, about, long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override the configured worker count
    #[arg(long)]
    workers: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn print_banner() {
    let banner = r#"
    ╔═══════════════════════════════════════╗
    ║  NARCISSUS v0.1.0                     ║
    ║  Reflected-Origin CORS Scanner        ║
    ╚═══════════════════════════════════════╝
    "#;
    eprintln!("{}", banner.cyan());
}

fn print_summary(summary: &RunSummary) {
    let elapsed = summary.finished_at - summary.started_at;

    eprintln!("\n{}", "  Scan Summary".bold());
    eprintln!("  {}", "─".repeat(35));

    let mut builder = Builder::default();
    builder.push_record(["Hosts scanned".to_string(), summary.hosts_scanned.to_string()]);
    builder.push_record(["Vulnerable".to_string(), summary.vulnerable.to_string()]);
    builder.push_record([
        "Duration".to_string(),
        format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0),
    ]);

    let mut table = builder.build();
    table.with(Style::rounded());
    eprintln!("{table}");

    if summary.vulnerable > 0 {
        eprintln!(
            "\n  {}",
            format!("{} vulnerable host(s)", summary.vulnerable).red().bold()
        );
    } else {
        eprintln!("\n  {}", "No vulnerable hosts".green());
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "narcissus=debug"
    } else {
        "narcissus=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    print_banner();

    let mut scan_config = config::load_config(&cli.config)?;
    config::merge_cli_args(&mut scan_config, cli.workers);
    scan_config.validate()?;

    eprintln!(
        "  {} {}",
        "Sites files:".bold(),
        scan_config.sites.len().to_string().cyan()
    );
    eprintln!(
        "  {} {}\n",
        "Workers:".bold(),
        scan_config.workers.to_string().cyan()
    );

    // Every sites file is opened before the pool starts; a bad path
    // aborts the run here, not mid-scan.
    let source = HostSource::open(&scan_config.sites).await?;

    let sink = Arc::new(JsonlSink::stdout());
    let pool = ScanPool::new(&scan_config, sink)?;
    let summary = pool.run(source).await?;

    print_summary(&summary);

    Ok(())
}
