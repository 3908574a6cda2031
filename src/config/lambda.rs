use crate::core::{ConfigProvider, Storage};
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use aws_sdk_s3::Client as S3Client;
use std::env;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub engine_endpoint: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub map_width: u32,
    pub map_height: u32,
    pub timeout_seconds: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            engine_endpoint: env::var("EE_ENDPOINT")
                .unwrap_or_else(|_| "https://earthengine.example.com".to_string()),
            s3_bucket: env::var("S3_BUCKET").map_err(|_| DashError::MissingConfigError {
                field: "S3_BUCKET".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "landsat-maps".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            map_width: env::var("MAP_WIDTH")
                .unwrap_or_else(|_| "1200".to_string())
                .parse()
                .unwrap_or(1200),
            map_height: env::var("MAP_HEIGHT")
                .unwrap_or_else(|_| "700".to_string())
                .parse()
                .unwrap_or(700),
            timeout_seconds: env::var("EE_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
        })
    }
}

impl ConfigProvider for LambdaConfig {
    fn engine_endpoint(&self) -> &str {
        &self.engine_endpoint
    }

    fn output_path(&self) -> &str {
        &self.s3_prefix
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

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("engine_endpoint", &self.engine_endpoint)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validation::validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        validate_aws_region("s3_region", &self.s3_region)?;
        validation::validate_positive_number("map_width", self.map_width as usize, 1)?;
        validation::validate_positive_number("map_height", self.map_height as usize, 1)?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(DashError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(DashError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(DashError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validation::validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DashError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| DashError::ConfigError {
                message: format!("Failed to read from S3: {}", e),
            })?;

        let data = resp.body.collect().await.map_err(|e| DashError::ConfigError {
            message: format!("Failed to collect S3 data: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| DashError::ConfigError {
                message: format!("Failed to write to S3: {}", e),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_name_validation() {
        assert!(validate_s3_bucket_name("s3_bucket", "landsat-maps").is_ok());
        assert!(validate_s3_bucket_name("s3_bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("s3_bucket", "Has-Uppercase").is_err());
        assert!(validate_s3_bucket_name("s3_bucket", "-leading").is_err());
    }

    #[test]
    fn test_region_validation() {
        assert!(validate_aws_region("s3_region", "ap-southeast-2").is_ok());
        assert!(validate_aws_region("s3_region", "AP_SOUTHEAST").is_err());
        assert!(validate_aws_region("s3_region", "").is_err());
    }
}
