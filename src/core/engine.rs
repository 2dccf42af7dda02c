use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting scrape...");

        let extracted = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} of {} shop pages",
            extracted.pages.len(),
            extracted.shops_total
        );

        let result = self.pipeline.transform(extracted).await?;
        tracing::info!(
            "Parsed {} leaflets ({} skipped)",
            result.leaflets.len(),
            result.leaflets_skipped
        );

        let leaflets_written = result.leaflets.len();
        let leaflets_skipped = result.leaflets_skipped;
        let open_ended = result.open_ended;
        let shops_total = result.shops_total;
        let shops_failed = result.shops_failed;

        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            leaflets_written,
            leaflets_skipped,
            open_ended,
            shops_total,
            shops_failed,
        })
    }
}
