//! Placelens main entry point
//!
//! Command-line interface: load config, check the daily quota, run the
//! enrichment pipeline, print a summary, and export the results to CSV.

use anyhow::Context;
use clap::Parser;
use placelens::config::load_config_with_hash;
use placelens::output::export_csv;
use placelens::pipeline::{Pipeline, SearchRequest};
use placelens::quota::QuotaFile;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Placelens: a local-business social presence finder
///
/// Searches the places API for businesses matching a keyword near a
/// location, enriches each hit with phone/rating/website details, and
/// scrapes each website for social-network profile links.
#[derive(Parser, Debug)]
#[command(name = "placelens")]
#[command(version)]
#[command(about = "Find businesses and their social media presence", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Search keyword (e.g. "ramen")
    #[arg(short, long)]
    keyword: String,

    /// Place name to search near (e.g. a station name)
    #[arg(short, long)]
    place: String,

    /// Search radius in meters (overrides config)
    #[arg(long)]
    radius: Option<u32>,

    /// Maximum result pages to fetch (overrides config)
    #[arg(long)]
    pages: Option<u32>,

    /// Provider place type filter (overrides config; empty = all types)
    #[arg(long)]
    place_type: Option<String>,

    /// Only keep places with at least one social link
    #[arg(long)]
    social_only: bool,

    /// CSV output path (overrides config)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Validate config and show what would be searched without searching
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    let radius_m = cli.radius.unwrap_or(config.search.radius_m);
    let page_limit = cli.pages.unwrap_or(config.search.page_limit);
    // CLI overrides get the same bounds the config file does
    placelens::config::validate_search_bounds(radius_m, page_limit)?;
    let place_type = cli
        .place_type
        .clone()
        .unwrap_or_else(|| config.search.place_type.clone());
    let request = SearchRequest {
        keyword: cli.keyword.clone(),
        place: cli.place.clone(),
        radius_m,
        page_limit,
        place_type: Some(place_type).filter(|t| !t.is_empty()),
    };

    if cli.dry_run {
        print_dry_run(&config, &request);
        return Ok(());
    }

    // Quota gates pipeline invocations, not internal request rate
    let quota = QuotaFile::new(&config.output.quota_path, config.output.daily_search_limit);
    let today = chrono::Local::now().date_naive();
    quota.check(today)?;

    let pipeline = Pipeline::new(&config)?;
    let mut places = pipeline.run(&request).await?;

    let used = quota.record_search(today)?;
    tracing::info!(
        "Daily searches used: {} / {}",
        used,
        config.output.daily_search_limit
    );

    if cli.social_only {
        places.retain(|p| !p.social.is_empty());
        tracing::info!("{} places with social links", places.len());
    }

    print_summary(&places);

    let csv_path = cli
        .csv
        .unwrap_or_else(|| PathBuf::from(&config.output.csv_path));
    export_csv(&csv_path, &places)?;
    println!("\nExported {} places to {}", places.len(), csv_path.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("placelens=info,warn"),
            1 => EnvFilter::new("placelens=debug,info"),
            2 => EnvFilter::new("placelens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Prints what a search would do without issuing any provider requests
fn print_dry_run(config: &placelens::Config, request: &SearchRequest) {
    println!("=== Placelens Dry Run ===\n");

    println!("Search:");
    println!("  Keyword: {}", request.keyword);
    println!("  Place: {}", request.place);
    println!("  Radius: {}m", request.radius_m);
    println!("  Page limit: {}", request.page_limit);
    println!(
        "  Place type: {}",
        request.place_type.as_deref().unwrap_or("(all)")
    );

    println!("\nProvider:");
    println!("  Geocode endpoint: {}", config.provider.geocode_endpoint);
    println!("  Nearby endpoint: {}", config.provider.nearby_endpoint);
    println!("  Details endpoint: {}", config.provider.details_endpoint);
    println!("  Region/language: {}/{}", config.provider.region, config.provider.language);

    println!("\nTuning:");
    println!(
        "  Page token delay: {}ms",
        config.search.page_token_delay_ms
    );
    println!(
        "  Max concurrent requests: {}",
        config.search.max_concurrent_requests
    );
    println!(
        "  Request timeout: {}s",
        config.search.request_timeout_secs
    );

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);
    println!("  Quota file: {}", config.output.quota_path);
    println!("  Daily limit: {}", config.output.daily_search_limit);

    println!("\n✓ Configuration is valid");
}

/// Prints a human-readable summary of the enriched places
fn print_summary(places: &[placelens::EnrichedPlace]) {
    for place in places {
        println!("\n{}", place.name);
        println!("  Map: {}", place.map_url);
        if let Some(details) = &place.details {
            if let Some(phone) = &details.phone {
                println!("  Phone: {}", phone);
            }
            if let Some(rating) = details.rating {
                println!("  Rating: {}", rating);
            }
            if let Some(website) = &details.website {
                println!("  Website: {}", website);
            }
        }
        for link in &place.social {
            println!("  Social: {}", link);
        }
    }
}
