use crate::core::ConfigProvider;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub dashboard: DashboardConfig,
    pub engine: EngineConfig,
    pub map: MapConfig,
    pub defaults: DefaultsConfig,
    pub environment: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub output_path: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// generate 動作的預設輸入值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub province: String,
    pub year: i32,
    pub cloud_cover: u8,
    pub vis_type: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EE_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("valid pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("engine.endpoint", &self.engine.endpoint)?;
        validation::validate_path("map.output_path", &self.map.output_path)?;
        validation::validate_non_empty_string("defaults.province", &self.defaults.province)?;

        let current_year = chrono::Utc::now().year();
        validation::validate_range(
            "defaults.year",
            self.defaults.year,
            super::FIRST_LANDSAT_YEAR,
            current_year,
        )?;
        validation::validate_range("defaults.cloud_cover", self.defaults.cloud_cover, 0u8, 100u8)?;

        if let Some(timeout) = self.engine.timeout_seconds {
            validation::validate_positive_number("engine.timeout_seconds", timeout as usize, 1)?;
        }

        Ok(())
    }

    pub fn vis_type(&self) -> &str {
        self.defaults.vis_type.as_deref().unwrap_or("true_color")
    }
}

impl ConfigProvider for TomlConfig {
    fn engine_endpoint(&self) -> &str {
        &self.engine.endpoint
    }

    fn output_path(&self) -> &str {
        &self.map.output_path
    }

    fn map_width(&self) -> u32 {
        self.map.width.unwrap_or(1200)
    }

    fn map_height(&self) -> u32 {
        self.map.height.unwrap_or(700)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.engine.timeout_seconds.unwrap_or(30)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
