mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memehoard_core::{
    generate_placeholders, load_config_or_default, validate_config, CatalogStore, Config,
    Fetcher, MemeApiClient, Optimizer,
};

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(Cli::parse()).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_paths(&mut config);

    match &cli.command {
        Command::Fetch(args) => {
            args.apply(&mut config);
            validate_config(&config).context("Configuration validation failed")?;
            fetch(&config).await
        }
        Command::Optimize => {
            validate_config(&config).context("Configuration validation failed")?;
            optimize(&config).await
        }
        Command::Generate(args) => {
            args.apply(&mut config);
            validate_config(&config).context("Configuration validation failed")?;
            generate(&config).await
        }
    }
}

async fn fetch(config: &Config) -> Result<()> {
    let store = CatalogStore::new(&config.paths.catalog_path);
    let source =
        Arc::new(MemeApiClient::new(&config.upstream).context("Failed to create HTTP client")?);

    info!("Output directory: {:?}", config.paths.output_dir);
    info!("Catalog: {:?}", config.paths.catalog_path);

    let catalog = store.load().await;
    let fetcher = Fetcher::new(
        config.fetch.clone(),
        source,
        store,
        &config.paths.output_dir,
    );
    let report = fetcher.run(catalog).await;

    info!(
        "Done: {} new memes in {} batches ({} total), stopped: {}",
        report.retained, report.batches, report.catalog.count, report.stop
    );
    Ok(())
}

async fn optimize(config: &Config) -> Result<()> {
    let store = CatalogStore::new(&config.paths.catalog_path);
    let catalog = store.load().await;

    let optimizer = Optimizer::new(config.optimize.clone(), store, &config.paths.output_dir);
    let report = optimizer
        .run(catalog)
        .await
        .context("Failed to optimize images")?;

    info!(
        "Optimized {} images, created {} thumbnails ({} skipped, {} failed). Metadata updated at {:?}",
        report.optimized,
        report.thumbnails,
        report.skipped,
        report.failed,
        config.paths.catalog_path
    );
    Ok(())
}

async fn generate(config: &Config) -> Result<()> {
    let placeholder = config.placeholder.clone();
    let out_dir = config.paths.output_dir.clone();

    let written = tokio::task::spawn_blocking(move || generate_placeholders(&placeholder, &out_dir))
        .await
        .context("Placeholder worker failed")?
        .context("Failed to generate placeholders")?;

    info!(
        "Done: {} generated in {:?}",
        written.len(),
        config.paths.output_dir
    );
    Ok(())
}
