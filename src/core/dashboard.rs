use crate::core::cache::{CacheStats, SessionCache};
use crate::core::{imagery, region};
use crate::core::{
    ConfigProvider, EarthEngine, GenerateOutcome, GenerateRequest, LayerSource, MapLayer,
    MapSurface, Result, Storage,
};
use crate::utils::error::DashError;
use std::time::Instant;

/// 邊界置中時的固定縮放層級
pub const BOUNDARY_ZOOM: u8 = 11;
pub const MAP_FILE: &str = "map.html";

/// Dashboard controller: one generate interaction per call.
///
/// Owns the session cache; resolve/build results are memoized by their input
/// tuples so unrelated re-renders never rebuild identical queries.
pub struct Dashboard<E, S, C> {
    engine: E,
    storage: S,
    config: C,
    cache: SessionCache,
}

impl<E: EarthEngine, S: Storage, C: ConfigProvider> Dashboard<E, S, C> {
    pub fn new(engine: E, storage: S, config: C) -> Self {
        Self {
            engine,
            storage,
            config,
            cache: SessionCache::new(),
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub async fn list_provinces(&self) -> Vec<String> {
        region::list_provinces(&self.engine).await
    }

    /// 跑一次完整互動：resolve → build → count → composite → render
    ///
    /// Zero matching images is an expected outcome, not an error; the map is
    /// left exactly as it was. Port failures abort the cycle before any map
    /// mutation and propagate to the caller.
    pub async fn generate<M: MapSurface>(
        &mut self,
        request: &GenerateRequest,
        map: &mut M,
    ) -> Result<GenerateOutcome> {
        let started = Instant::now();

        if request.province.trim().is_empty() {
            return Err(DashError::InvalidRegion {
                name: request.province.clone(),
                reason: "province name is empty".to_string(),
            });
        }

        tracing::info!(
            "🚀 Generating imagery for {} ({}), cloud cover < {}%",
            request.province,
            request.year,
            request.max_cloud_cover
        );

        // 純查詢建構，皆走快取
        let boundary = self
            .cache
            .boundary_for(&request.province, || {
                region::resolve_province(&request.province)
            });
        let query = self
            .cache
            .query_for(&request.province, request.year, request.max_cloud_cover, || {
                imagery::build_collection_query(&boundary, request.year, request.max_cloud_cover)
            });

        // 第一次真正碰遠端服務的地方
        let image_count = self.engine.collection_size(&query).await?;
        tracing::debug!("Collection size: {} images", image_count);

        if image_count == 0 {
            tracing::warn!(
                "⚠️ No Landsat images found for {} in {} with cloud cover < {}%",
                request.province,
                request.year,
                request.max_cloud_cover
            );
            return Ok(GenerateOutcome::NoImages {
                province: request.province.clone(),
                year: request.year,
                max_cloud_cover: request.max_cloud_cover,
            });
        }

        let vis = imagery::visualization_params(Some(request.vis_type.as_str()));
        let composite = self.engine.median_composite(&query, &boundary, vis).await?;
        let geometry = self.engine.boundary_geometry(&boundary).await?;

        let vis_label = imagery::vis_label(&request.vis_type);

        map.clear();
        map.center_on(geometry.centroid, BOUNDARY_ZOOM);
        map.add_layer(MapLayer {
            label: format!("Landsat {}", vis_label),
            visible: true,
            source: LayerSource::Tiles {
                url_template: composite.tile_url,
            },
        });
        map.add_layer(MapLayer {
            label: format!("{} Boundary", request.province),
            visible: false,
            source: LayerSource::GeoJson {
                data: geometry.geometry,
                color: "red".to_string(),
            },
        });

        let html = map.render(self.config.map_width(), self.config.map_height())?;
        self.storage.write_file(MAP_FILE, html.as_bytes()).await?;

        let output_file = format!("{}/{}", self.config.output_path(), MAP_FILE);
        tracing::info!(
            "✅ Rendered {} images to {} in {:.2}s",
            image_count,
            output_file,
            started.elapsed().as_secs_f64()
        );

        Ok(GenerateOutcome::Rendered {
            output_file,
            image_count,
            vis_label,
        })
    }

    /// 閒置狀態的空地圖（無圖層的占位文件）
    pub async fn render_empty<M: MapSurface>(&self, map: &mut M) -> Result<String> {
        map.clear();
        let html = map.render(self.config.map_width(), self.config.map_height())?;
        self.storage.write_file(MAP_FILE, html.as_bytes()).await?;
        Ok(format!("{}/{}", self.config.output_path(), MAP_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        BoundaryFilter, BoundaryGeometry, CollectionQuery, CompositeHandle, FieldFilter, LngLat,
        VisParams,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct MockEngine {
        size: u64,
        fail_composite: bool,
        size_calls: AtomicUsize,
        composite_calls: AtomicUsize,
    }

    impl MockEngine {
        fn with_size(size: u64) -> Self {
            Self {
                size,
                fail_composite: false,
                size_calls: AtomicUsize::new(0),
                composite_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl EarthEngine for MockEngine {
        async fn aggregate_strings(
            &self,
            _dataset: &str,
            _filters: &[FieldFilter],
            _field: &str,
        ) -> Result<Vec<String>> {
            Ok(vec!["Bali".to_string()])
        }

        async fn collection_size(&self, _query: &CollectionQuery) -> Result<u64> {
            self.size_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.size)
        }

        async fn median_composite(
            &self,
            _query: &CollectionQuery,
            _clip: &BoundaryFilter,
            _vis: &VisParams,
        ) -> Result<CompositeHandle> {
            self.composite_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_composite {
                return Err(DashError::ArchiveQueryFailed {
                    message: "composite worker crashed".to_string(),
                });
            }
            Ok(CompositeHandle {
                tile_url: "https://tiles.example.com/abc/{z}/{x}/{y}".to_string(),
            })
        }

        async fn boundary_geometry(&self, _boundary: &BoundaryFilter) -> Result<BoundaryGeometry> {
            Ok(BoundaryGeometry {
                centroid: LngLat {
                    lon: 115.09,
                    lat: -8.37,
                },
                geometry: serde_json::json!({"type": "Polygon", "coordinates": []}),
            })
        }
    }

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().unwrap();
            files.get(path).cloned().ok_or_else(|| {
                DashError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn engine_endpoint(&self) -> &str {
            "http://test.invalid"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }

        fn map_width(&self) -> u32 {
            1200
        }

        fn map_height(&self) -> u32 {
            700
        }

        fn request_timeout_seconds(&self) -> u64 {
            30
        }
    }

    /// 記錄圖層操作的測試地圖
    #[derive(Default)]
    struct RecordingMap {
        layers: Vec<MapLayer>,
        center: Option<(LngLat, u8)>,
    }

    impl MapSurface for RecordingMap {
        fn clear(&mut self) {
            self.layers.clear();
            self.center = None;
        }

        fn center_on(&mut self, center: LngLat, zoom: u8) {
            self.center = Some((center, zoom));
        }

        fn add_layer(&mut self, layer: MapLayer) {
            self.layers.push(layer);
        }

        fn layer_count(&self) -> usize {
            self.layers.len()
        }

        fn render(&self, _width: u32, _height: u32) -> Result<String> {
            Ok(format!("<html>{} layers</html>", self.layers.len()))
        }
    }

    fn request(province: &str, year: i32) -> GenerateRequest {
        GenerateRequest {
            province: province.to_string(),
            year,
            max_cloud_cover: 20,
            vis_type: "true_color".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_cycle_renders_composite_and_boundary() {
        let storage = MockStorage::default();
        let mut dashboard =
            Dashboard::new(MockEngine::with_size(7), storage.clone(), MockConfig);
        let mut map = RecordingMap::default();

        let outcome = dashboard.generate(&request("Bali", 2019), &mut map).await.unwrap();

        match outcome {
            GenerateOutcome::Rendered {
                image_count,
                vis_label,
                output_file,
            } => {
                assert_eq!(image_count, 7);
                assert_eq!(vis_label, "True Color");
                assert_eq!(output_file, "test_output/map.html");
            }
            other => panic!("expected Rendered, got {:?}", other),
        }

        assert_eq!(map.layer_count(), 2);
        assert_eq!(map.layers[0].label, "Landsat True Color");
        assert!(map.layers[0].visible);
        assert_eq!(map.layers[1].label, "Bali Boundary");
        assert!(!map.layers[1].visible);
        assert_eq!(map.center.unwrap().1, BOUNDARY_ZOOM);

        let html = storage.read_file(MAP_FILE).await.unwrap();
        assert!(!html.is_empty());
    }

    #[tokio::test]
    async fn test_zero_images_is_a_warning_not_an_error() {
        let storage = MockStorage::default();
        let engine = MockEngine::with_size(0);
        let mut dashboard = Dashboard::new(engine, storage.clone(), MockConfig);
        let mut map = RecordingMap::default();

        let outcome = dashboard.generate(&request("Bali", 2013), &mut map).await.unwrap();

        assert_eq!(
            outcome,
            GenerateOutcome::NoImages {
                province: "Bali".to_string(),
                year: 2013,
                max_cloud_cover: 20,
            }
        );
        // 地圖與輸出都不能被動到
        assert_eq!(map.layer_count(), 0);
        assert!(storage.read_file(MAP_FILE).await.is_err());
    }

    #[tokio::test]
    async fn test_composite_failure_leaves_map_untouched() {
        let mut engine = MockEngine::with_size(3);
        engine.fail_composite = true;
        let mut dashboard = Dashboard::new(engine, MockStorage::default(), MockConfig);
        let mut map = RecordingMap::default();

        let err = dashboard
            .generate(&request("Bali", 2019), &mut map)
            .await
            .unwrap_err();

        assert!(matches!(err, DashError::ArchiveQueryFailed { .. }));
        assert_eq!(map.layer_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_province_is_rejected_before_any_remote_call() {
        let engine = MockEngine::with_size(3);
        let mut dashboard = Dashboard::new(engine, MockStorage::default(), MockConfig);
        let mut map = RecordingMap::default();

        let err = dashboard
            .generate(&request("  ", 2019), &mut map)
            .await
            .unwrap_err();

        assert!(matches!(err, DashError::InvalidRegion { .. }));
        assert_eq!(dashboard.engine.size_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeat_generate_reuses_cached_resolve_and_build() {
        let mut dashboard =
            Dashboard::new(MockEngine::with_size(5), MockStorage::default(), MockConfig);
        let mut map = RecordingMap::default();

        dashboard.generate(&request("Bali", 2019), &mut map).await.unwrap();
        let first = dashboard.cache_stats();
        assert_eq!(first.misses, 2);
        assert_eq!(first.hits, 0);

        dashboard.generate(&request("Bali", 2019), &mut map).await.unwrap();
        let second = dashboard.cache_stats();
        assert_eq!(second.misses, 2);
        assert_eq!(second.hits, 2);

        // 快取只記住純查詢建構；評估每次都要重新問遠端
        assert_eq!(dashboard.engine.size_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_render_empty_writes_placeholder_document() {
        let storage = MockStorage::default();
        let dashboard =
            Dashboard::new(MockEngine::with_size(0), storage.clone(), MockConfig);
        let mut map = RecordingMap::default();

        let path = dashboard.render_empty(&mut map).await.unwrap();
        assert_eq!(path, "test_output/map.html");
        assert!(storage.read_file(MAP_FILE).await.is_ok());
    }
}
