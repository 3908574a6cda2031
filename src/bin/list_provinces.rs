use anyhow::{Context, Result};
use landsat_dash::core::region;
use landsat_dash::GeeClient;
use std::time::Duration;

/// 快速查詢可用省份清單（服務掛了就退回內建清單）
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let endpoint = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://earthengine.example.com".to_string());

    let engine = GeeClient::with_timeout(&endpoint, Duration::from_secs(10))
        .context("building Earth Engine client")?;

    println!("🌍 Indonesian provinces:");
    for (index, name) in region::list_provinces(&engine).await.iter().enumerate() {
        println!("{:2}. {}", index + 1, name);
    }

    Ok(())
}
