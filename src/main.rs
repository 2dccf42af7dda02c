use clap::Parser;
use prospekt_etl::utils::{logger, validation::Validate};
use prospekt_etl::{CliConfig, LocalStorage, ScrapeEngine, ScrapePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting leaflet scraper for all hypermarket chains");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = ScrapePipeline::new(storage, config)?;
    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Scraping completed successfully");
            tracing::info!(
                "Shops processed: {} ({} failed)",
                summary.shops_total,
                summary.shops_failed
            );
            tracing::info!(
                "Leaflets written: {} ({} regular, {} open-ended), skipped: {}",
                summary.leaflets_written,
                summary.leaflets_written - summary.open_ended,
                summary.open_ended,
                summary.leaflets_skipped
            );
            println!(
                "✅ Scraping completed. {} leaflets written to {}",
                summary.leaflets_written, summary.output_path
            );
        }
        Err(e) => {
            tracing::error!(
                "❌ Scraping failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                prospekt_etl::utils::error::ErrorSeverity::Low => 0,
                prospekt_etl::utils::error::ErrorSeverity::Medium => 2,
                prospekt_etl::utils::error::ErrorSeverity::High => 1,
                prospekt_etl::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
