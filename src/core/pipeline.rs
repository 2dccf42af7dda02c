use chrono::Local;

use crate::core::catalog;
use crate::core::extract::extract_leaflets;
use crate::core::fetch::FetchClient;
use crate::core::{CatalogExtract, ConfigProvider, Pipeline, ScrapeResult, Storage};
use crate::domain::model::ShopPage;
use crate::utils::error::Result;

pub struct ScrapePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: FetchClient,
}

impl<S: Storage, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = FetchClient::new(config.delay(), config.timeout())?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    /// Fetch the index page, list the shops, then fetch every shop page
    /// sequentially. A failed shop fetch is logged and skipped; only an
    /// empty catalog or an unreachable index page aborts the run.
    async fn extract(&self) -> Result<CatalogExtract> {
        tracing::info!("Fetching shop list from {}", self.config.index_url());
        let index_html = self.client.get(self.config.index_url()).await?;
        let shops = catalog::extract_shops(&index_html, self.config.base_url())?;

        let shops_total = shops.len();
        tracing::info!("Starting to scrape {} shops", shops_total);

        let mut pages = Vec::new();
        let mut shops_failed = 0;
        for (index, shop) in shops.into_iter().enumerate() {
            tracing::info!("[{}/{}] Processing: {}", index + 1, shops_total, shop.name);
            match self.client.get(&shop.url).await {
                Ok(html) => pages.push(ShopPage { shop, html }),
                Err(e) => {
                    shops_failed += 1;
                    tracing::error!("Failed to scrape shop {}: {}", shop.name, e);
                }
            }
        }

        Ok(CatalogExtract {
            pages,
            shops_total,
            shops_failed,
        })
    }

    /// Parse every fetched page into leaflet records. The capture
    /// timestamp is taken once so all records of a run agree.
    async fn transform(&self, extracted: CatalogExtract) -> Result<ScrapeResult> {
        let captured_at = Local::now().naive_local();

        let mut leaflets = Vec::new();
        let mut leaflets_skipped = 0;
        for page in &extracted.pages {
            let (found, skipped) = extract_leaflets(
                &page.html,
                Some(&page.shop.name),
                captured_at,
                self.config.base_url(),
            );

            let open_ended = found.iter().filter(|l| l.is_open_ended()).count();
            if open_ended > 0 {
                tracing::info!(
                    "  → Found {} leaflets for {} ({} regular, {} open-ended)",
                    found.len(),
                    page.shop.name,
                    found.len() - open_ended,
                    open_ended
                );
            } else {
                tracing::info!("  → Found {} leaflets for {}", found.len(), page.shop.name);
            }

            leaflets_skipped += skipped;
            leaflets.extend(found);
        }

        let open_ended = leaflets.iter().filter(|l| l.is_open_ended()).count();
        Ok(ScrapeResult {
            leaflets,
            leaflets_skipped,
            open_ended,
            shops_total: extracted.shops_total,
            shops_failed: extracted.shops_failed,
        })
    }

    /// Serialize all records to the configured output file, overwriting
    /// any previous run. Zero records still produce a valid empty array.
    async fn load(&self, result: ScrapeResult) -> Result<String> {
        let json = serde_json::to_string_pretty(&result.leaflets)?;
        self.storage
            .write_file(self.config.output_file(), json.as_bytes())
            .await?;

        tracing::info!(
            "Exported {} leaflets to {}",
            result.leaflets.len(),
            self.config.output_file()
        );
        Ok(self.config.output_file().to_string())
    }
}
