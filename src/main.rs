use clap::Parser;
use landsat_dash::core::region;
use landsat_dash::utils::monitor::CycleMonitor;
use landsat_dash::utils::{logger, validation::Validate};
use landsat_dash::{
    CliConfig, Dashboard, GeeClient, GenerateOutcome, GenerateRequest, LeafletMap, LocalStorage,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting landsat-dash CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let engine = GeeClient::with_timeout(
        &config.endpoint,
        Duration::from_secs(config.timeout_seconds),
    )?;

    // 只列省份就提早結束
    if config.list_provinces {
        for name in region::list_provinces(&engine).await {
            println!("{}", name);
        }
        return Ok(());
    }

    let request = GenerateRequest {
        province: config.province.clone(),
        year: config.year,
        max_cloud_cover: config.cloud_cover,
        vis_type: config.vis_type.clone(),
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let mut dashboard = Dashboard::new(engine, storage, config.clone());
    let mut map = LeafletMap::new();

    // 先放一張空地圖當占位；成功的 generate 會覆寫它
    dashboard.render_empty(&mut map).await?;

    let mut monitor = CycleMonitor::new(config.monitor);

    match dashboard.generate(&request, &mut map).await {
        Ok(GenerateOutcome::Rendered {
            output_file,
            image_count,
            vis_label,
        }) => {
            tracing::info!("✅ Imagery generation completed successfully!");
            println!(
                "✅ Generated Landsat imagery for {} ({}) with {} visualization ({} images).",
                request.province,
                request.year,
                vis_label.to_lowercase(),
                image_count
            );
            println!("📁 Map saved to: {}", output_file);
            println!("📌 Data source: USGS/NASA Landsat 8 & 9");
        }
        Ok(GenerateOutcome::NoImages {
            province,
            year,
            max_cloud_cover,
        }) => {
            println!(
                "⚠️ No Landsat images found for {} in {} with cloud cover < {}%. Try adjusting your filters.",
                province, year, max_cloud_cover
            );
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Imagery generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                landsat_dash::utils::error::ErrorSeverity::Low => 0,
                landsat_dash::utils::error::ErrorSeverity::Medium => 2,
                landsat_dash::utils::error::ErrorSeverity::High => 1,
                landsat_dash::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    monitor.log_stats();

    Ok(())
}
