pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{engine::ScrapeEngine, pipeline::ScrapePipeline};
pub use utils::error::{Result, ScrapeError};
