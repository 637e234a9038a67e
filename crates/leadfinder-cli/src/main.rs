use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use leadfinder_client::{Phase, SearchClient, SessionController};
use leadfinder_core::{AppConfig, BusinessType, SearchRequest};
use leadfinder_export::{csv_file_label, write_csv};
use leadfinder_stream::SearchResult;

#[derive(Debug, Parser)]
#[command(name = "leadfinder")]
#[command(about = "Find automotive business leads via the places-search backend")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Streamed search across a batch of zip codes.
    Zip {
        /// Comma-separated 5-digit zip codes (max 50).
        #[arg(long)]
        zip_codes: String,

        /// Search radius in meters. Defaults to LEADFINDER_DEFAULT_RADIUS_M.
        #[arg(long)]
        radius: Option<u32>,

        /// Business types to include.
        #[arg(long, value_delimiter = ',', default_value = "car_wash,car_detailer")]
        types: Vec<String>,

        /// Write matched businesses to this CSV file.
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Single-shot free-text region search.
    Region {
        /// Free-text location, e.g. "Long Island, NY".
        region: String,

        /// Write matched businesses to this CSV file. Defaults to a name
        /// derived from the region.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = leadfinder_core::load_app_config().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Zip {
            zip_codes,
            radius,
            types,
            out,
        } => run_zip_search(&config, &zip_codes, radius, &types, out).await,
        Commands::Region { region, out } => run_region_search(&config, &region, out).await,
    }
}

async fn run_zip_search(
    config: &AppConfig,
    zip_codes: &str,
    radius: Option<u32>,
    types: &[String],
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let included_types = types
        .iter()
        .map(|t| t.parse::<BusinessType>())
        .collect::<Result<Vec<_>, _>>()?;

    let request = SearchRequest::from_raw(
        zip_codes,
        radius.unwrap_or(config.default_radius_meters),
        &included_types,
    )?;

    let client = SearchClient::from_config(config)?;
    let controller = SessionController::new(client);
    let mut rx = controller.subscribe();
    controller.start(request)?;

    // Print log entries as they stream in, then settle on the terminal state.
    let mut printed = 0;
    let final_state = loop {
        let state = rx.borrow_and_update().clone();
        for entry in &state.log[printed..] {
            println!("[{}] {}", entry.at.format("%H:%M:%S"), entry.message);
        }
        printed = state.log.len();

        if state.is_terminal() {
            break state;
        }
        if rx.changed().await.is_err() {
            break state;
        }
    };

    match final_state.phase {
        Phase::Completed => {
            let result = final_state
                .result
                .context("completed session is missing its result")?;
            report_result(&result);
            if final_state.malformed_lines > 0 {
                tracing::warn!(
                    count = final_state.malformed_lines,
                    "stream contained malformed lines"
                );
            }
            if let Some(path) = out {
                write_csv(&path, &result.records)?;
                println!("Wrote {} records to {}", result.records.len(), path.display());
            }
            Ok(())
        }
        _ => anyhow::bail!(
            "search failed: {}",
            final_state.error.as_deref().unwrap_or("unknown error")
        ),
    }
}

async fn run_region_search(
    config: &AppConfig,
    region: &str,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let client = SearchClient::from_config(config)?;
    let result = client.search_region(region).await?;
    report_result(&result);

    let path = out.unwrap_or_else(|| PathBuf::from(csv_file_label(region)));
    write_csv(&path, &result.records)?;
    println!("Wrote {} records to {}", result.records.len(), path.display());
    Ok(())
}

fn report_result(result: &SearchResult) {
    // Region-search payloads carry no zip-code counter.
    if result.num_zip_codes_searched > 0 {
        println!(
            "{} businesses found across {} zip codes in {:.1}s",
            result.num_results_found, result.num_zip_codes_searched, result.elapsed_seconds
        );
    } else {
        println!(
            "{} businesses found in {:.1}s",
            result.num_results_found, result.elapsed_seconds
        );
    }
}
