use crate::domain::model::{
    BoundaryFilter, BoundaryGeometry, CollectionQuery, CompositeHandle, FieldFilter, LngLat,
    MapLayer, VisParams,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 遠端地理資料平台：集合查詢的評估都發生在這裡
#[async_trait]
pub trait EarthEngine: Send + Sync {
    /// Aggregate the distinct values of `field` over a filtered table.
    async fn aggregate_strings(
        &self,
        dataset: &str,
        filters: &[FieldFilter],
        field: &str,
    ) -> Result<Vec<String>>;

    /// Materialize the query far enough to know how many images match.
    async fn collection_size(&self, query: &CollectionQuery) -> Result<u64>;

    /// Per-pixel median across the collection, clipped to the boundary.
    async fn median_composite(
        &self,
        query: &CollectionQuery,
        clip: &BoundaryFilter,
        vis: &VisParams,
    ) -> Result<CompositeHandle>;

    /// Concrete geometry for a boundary filter (centroid + GeoJSON outline).
    async fn boundary_geometry(&self, boundary: &BoundaryFilter) -> Result<BoundaryGeometry>;
}

/// 地圖渲染表面：收一組有序圖層，輸出可嵌入的文件
pub trait MapSurface: Send {
    fn clear(&mut self);
    fn center_on(&mut self, center: LngLat, zoom: u8);
    fn add_layer(&mut self, layer: MapLayer);
    fn layer_count(&self) -> usize;
    fn render(&self, width: u32, height: u32) -> Result<String>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn engine_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn map_width(&self) -> u32;
    fn map_height(&self) -> u32;
    fn request_timeout_seconds(&self) -> u64;
}
