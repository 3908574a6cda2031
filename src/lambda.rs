#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use landsat_dash::config::lambda::{LambdaConfig, S3Storage};
#[cfg(feature = "lambda")]
use landsat_dash::core::dashboard::Dashboard;
#[cfg(feature = "lambda")]
use landsat_dash::{GeeClient, GenerateOutcome, GenerateRequest, LeafletMap};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub province: String,
    pub year: i32,
    pub cloud_cover: u8,
    pub vis_type: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_prefix: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    pub message: String,
    pub output_path: String,
    pub image_count: u64,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting imagery Lambda function");

    // 事件可以覆寫輸出位置
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(prefix) = &event.payload.s3_prefix {
        std::env::set_var("S3_PREFIX", prefix);
    }

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    // 創建AWS配置和S3客戶端
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let engine = GeeClient::with_timeout(
        &lambda_config.engine_endpoint,
        std::time::Duration::from_secs(lambda_config.timeout_seconds),
    )
    .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let request = GenerateRequest {
        province: event.payload.province,
        year: event.payload.year,
        max_cloud_cover: event.payload.cloud_cover,
        vis_type: event
            .payload
            .vis_type
            .unwrap_or_else(|| "true_color".to_string()),
    };

    let mut dashboard = Dashboard::new(engine, storage, lambda_config);
    let mut map = LeafletMap::new();

    let outcome = dashboard
        .generate(&request, &mut map)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let response = match outcome {
        GenerateOutcome::Rendered {
            output_file,
            image_count,
            ..
        } => Response {
            message: "Imagery generated successfully".to_string(),
            output_path: output_file,
            image_count,
        },
        GenerateOutcome::NoImages {
            province,
            year,
            max_cloud_cover,
        } => Response {
            message: format!(
                "No Landsat images found for {} in {} with cloud cover < {}%",
                province, year, max_cloud_cover
            ),
            output_path: String::new(),
            image_count: 0,
        },
    };

    tracing::info!("Imagery Lambda function completed");
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    landsat_dash::utils::logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
