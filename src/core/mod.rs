pub mod cache;
pub mod dashboard;
pub mod imagery;
pub mod region;

pub use crate::domain::model::{
    BoundaryFilter, BoundaryGeometry, CollectionQuery, CompositeHandle, DateWindow, FieldFilter,
    FilterOp, GenerateOutcome, GenerateRequest, LayerSource, LngLat, MapLayer, VisParams,
};
pub use crate::domain::ports::{ConfigProvider, EarthEngine, MapSurface, Storage};
pub use crate::utils::error::Result;
