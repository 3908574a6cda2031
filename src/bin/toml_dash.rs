use landsat_dash::config::toml_config::TomlConfig;
use landsat_dash::core::ConfigProvider;
use landsat_dash::utils::error::Result;
use landsat_dash::utils::validation::Validate;
use landsat_dash::{Dashboard, GeeClient, GenerateOutcome, GenerateRequest, LeafletMap, LocalStorage};
use std::time::Duration;

/// 用 TOML 配置檔跑一次 generate（省去一長串 CLI 參數）
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dashboard.toml".to_string());

    println!("🚀 Loading dashboard config from {}", config_path);
    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    println!("✅ Configuration validated: {}", config.dashboard.name);

    let request = GenerateRequest {
        province: config.defaults.province.clone(),
        year: config.defaults.year,
        max_cloud_cover: config.defaults.cloud_cover,
        vis_type: config.vis_type().to_string(),
    };

    let engine = GeeClient::with_timeout(
        config.engine_endpoint(),
        Duration::from_secs(config.request_timeout_seconds()),
    )?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let mut dashboard = Dashboard::new(engine, storage, config);
    let mut map = LeafletMap::new();

    match dashboard.generate(&request, &mut map).await? {
        GenerateOutcome::Rendered {
            output_file,
            image_count,
            ..
        } => {
            println!("✅ {} images composited", image_count);
            println!("📁 Map saved to: {}", output_file);
        }
        GenerateOutcome::NoImages {
            province,
            year,
            max_cloud_cover,
        } => {
            println!(
                "⚠️ No Landsat images found for {} in {} with cloud cover < {}%",
                province, year, max_cloud_cover
            );
        }
    }

    Ok(())
}
