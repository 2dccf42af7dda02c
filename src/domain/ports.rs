use crate::domain::model::{CatalogExtract, ScrapeResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn index_url(&self) -> &str;
    fn output_file(&self) -> &str;
    fn delay(&self) -> Duration;
    fn timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CatalogExtract>;
    async fn transform(&self, extracted: CatalogExtract) -> Result<ScrapeResult>;
    async fn load(&self, result: ScrapeResult) -> Result<String>;
}
