use crate::core::{
    BoundaryFilter, BoundaryGeometry, CollectionQuery, CompositeHandle, FieldFilter, Result,
    VisParams,
};
use crate::domain::ports::EarthEngine;
use crate::utils::error::DashError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Earth Engine REST 客戶端
///
/// All evaluation happens server-side; this adapter only ships query
/// descriptions over and deserializes the handles that come back.
pub struct GeeClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    values: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SizeResponse {
    size: u64,
}

impl GeeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, operation: &str) -> String {
        format!("{}/v1/{}", self.base_url.trim_end_matches('/'), operation)
    }
}

#[async_trait]
impl EarthEngine for GeeClient {
    async fn aggregate_strings(
        &self,
        dataset: &str,
        filters: &[FieldFilter],
        field: &str,
    ) -> Result<Vec<String>> {
        let url = self.url("tables:aggregate");
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "dataset": dataset,
                "filters": filters,
                "field": field,
            }))
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::DatasetUnavailable {
                message: format!("aggregate returned HTTP {}", response.status()),
            });
        }

        let body: AggregateResponse = response.json().await?;
        Ok(body.values)
    }

    async fn collection_size(&self, query: &CollectionQuery) -> Result<u64> {
        let url = self.url("collections:size");
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::ArchiveQueryFailed {
                message: format!("size evaluation returned HTTP {}", response.status()),
            });
        }

        let body: SizeResponse = response.json().await?;
        Ok(body.size)
    }

    async fn median_composite(
        &self,
        query: &CollectionQuery,
        clip: &BoundaryFilter,
        vis: &VisParams,
    ) -> Result<CompositeHandle> {
        let url = self.url("collections:composite");
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "query": query,
                "reducer": "median",
                "clip": clip,
                "vis": vis,
            }))
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::ArchiveQueryFailed {
                message: format!("composite returned HTTP {}", response.status()),
            });
        }

        let handle: CompositeHandle = response.json().await?;
        Ok(handle)
    }

    async fn boundary_geometry(&self, boundary: &BoundaryFilter) -> Result<BoundaryGeometry> {
        let url = self.url("tables:geometry");
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "dataset": &boundary.dataset,
                "filters": boundary.filters(),
            }))
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        if !response.status().is_success() {
            return Err(DashError::DatasetUnavailable {
                message: format!("geometry lookup returned HTTP {}", response.status()),
            });
        }

        let geometry: BoundaryGeometry = response.json().await?;
        Ok(geometry)
    }
}
