#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use chrono::Datelike;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Landsat 8 上線的第一個完整年度，年份輸入的下限
pub const FIRST_LANDSAT_YEAR: i32 = 2013;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "landsat-dash")]
#[command(about = "Generate Landsat median composites for Indonesian provinces")]
pub struct CliConfig {
    #[arg(long, default_value = "Bali")]
    pub province: String,

    #[arg(long, default_value = "2023")]
    pub year: i32,

    #[arg(long, default_value = "20", help = "Maximum cloud cover (%)")]
    pub cloud_cover: u8,

    #[arg(long, default_value = "true_color")]
    pub vis_type: String,

    #[arg(long, default_value = "https://earthengine.example.com")]
    pub endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "1200")]
    pub map_width: u32,

    #[arg(long, default_value = "700")]
    pub map_height: u32,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "List available provinces and exit")]
    pub list_provinces: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log resource stats after the run")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn engine_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn map_width(&self) -> u32 {
        self.map_width
    }

    fn map_height(&self) -> u32 {
        self.map_height
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("province", &self.province)?;
        validation::validate_path("output_path", &self.output_path)?;

        let current_year = chrono::Utc::now().year();
        validation::validate_range("year", self.year, FIRST_LANDSAT_YEAR, current_year)?;
        validation::validate_range("cloud_cover", self.cloud_cover, 0u8, 100u8)?;

        validation::validate_positive_number("map_width", self.map_width as usize, 1)?;
        validation::validate_positive_number("map_height", self.map_height as usize, 1)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds as usize, 1)?;

        Ok(())
    }
}
