pub mod catalog;
pub mod engine;
pub mod extract;
pub mod fetch;
pub mod pipeline;

pub use crate::domain::model::{CatalogExtract, Leaflet, RunSummary, ScrapeResult, Shop, ShopPage};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
