//! Command-line entry point.
//!
//! ```sh
//! jaundice_rate score https://inosmi.ru/politic/20210621/249959311.html
//! jaundice_rate serve --addr 127.0.0.1:8080
//! ```

use clap::Parser;
use jaundice_rate::adapters::InosmiExtractor;
use jaundice_rate::cli::{Cli, Command};
use jaundice_rate::config::{FileConfig, Settings};
use jaundice_rate::outputs::{json, report};
use jaundice_rate::server::{self, AppState};
use jaundice_rate::text_tools::LowercaseNormalizer;
use jaundice_rate::{Analyzer, Lexicon};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&args, file_config)?;
    debug!(?settings, "Resolved settings");

    // An empty or unreadable dictionary stops everything before any fetch.
    let lexicon = match Lexicon::global(&settings.dict_dir) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            error!(path = %settings.dict_dir.display(), error = %e, "Cannot load charged-word lexicon");
            return Err(e.into());
        }
    };

    let analyzer = Analyzer::new(
        lexicon,
        Arc::new(LowercaseNormalizer),
        Arc::new(InosmiExtractor),
    )
    .with_concurrency(settings.concurrency);

    match args.command {
        Command::Score { articles, json: json_path } => {
            let results = analyzer.process(&articles, Some(settings.timeout)).await?;
            println!("{}", report::render_results(&results));

            if let Some(path) = json_path {
                if let Err(e) = json::write_results(&results, &path).await {
                    error!(path = %path.display(), error = %e, "Failed to write JSON results");
                    return Err(e);
                }
            }
        }
        Command::Serve { .. } => {
            let state = AppState {
                analyzer,
                timeout: settings.timeout,
                max_urls: settings.max_urls,
            };
            server::serve(state, &settings.addr).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}
