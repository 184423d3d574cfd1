use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use feedpress::config::Config;
use feedpress::pipeline;

#[derive(Parser, Debug)]
#[command(
    name = "feedpress",
    about = "Publish new RSS/Atom feed entries as static HTML posts"
)]
struct Args {
    /// Path to the TOML config file (a missing file uses built-in defaults)
    #[arg(long, value_name = "FILE", default_value = "feedpress.toml")]
    config: PathBuf,

    /// Override the output directory from the config
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config).context("Failed to load configuration")?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    // Per-feed failures are reported below but never change the exit status;
    // only a setup failure inside run() propagates a non-zero exit.
    let summary = pipeline::run(&config).await?;

    for report in &summary.reports {
        if let Some(e) = &report.error {
            println!("ERR feed: {} {}", report.url, e);
        }
    }
    println!("created {} posts", summary.created);

    Ok(())
}
