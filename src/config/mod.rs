pub mod cli;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const BASE_URL: &str = "https://www.prospektmaschine.de";
pub const HYPERMARKETS_URL: &str = "https://www.prospektmaschine.de/hypermarkte/";

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const DEFAULT_DELAY_SECS: f64 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "prospekt-etl")]
#[command(about = "Scrapes hypermarket leaflet listings into a JSON file")]
pub struct CliConfig {
    #[arg(long, default_value = HYPERMARKETS_URL)]
    pub index_url: String,

    #[arg(long, default_value = BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = "leaflets.json")]
    pub output_file: String,

    #[arg(long, default_value_t = DEFAULT_DELAY_SECS, help = "Seconds to wait before each request")]
    pub delay: f64,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, help = "Per-request timeout in seconds")]
    pub timeout: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn index_url(&self) -> &str {
        &self.index_url
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }

    fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("index_url", &self.index_url)?;
        validate_url("base_url", &self.base_url)?;
        validate_path("output_file", &self.output_file)?;
        validate_range("delay", self.delay, 0.0, 60.0)?;
        validate_range("timeout", self.timeout, 1, 600)?;
        Ok(())
    }
}
