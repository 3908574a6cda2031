use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 行政邊界過濾器：以 (國家, 省份) 等值條件選取單一省界
///
/// Resolving never checks existence; an unmatched province simply selects an
/// empty region, which shows up downstream as a zero-image collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryFilter {
    pub dataset: String,
    pub country: String,
    pub province: String,
}

impl BoundaryFilter {
    /// Wire form: the equality filters the boundary dataset understands.
    pub fn filters(&self) -> Vec<FieldFilter> {
        vec![
            FieldFilter::eq(crate::core::region::COUNTRY_FIELD, self.country.clone()),
            FieldFilter::eq(crate::core::region::PROVINCE_FIELD, self.province.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Lt,
}

/// 單一欄位的中繼資料過濾條件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub op: FilterOp,
    pub value: serde_json::Value,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            value: value.into(),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Lt,
            value: value.into(),
        }
    }
}

/// 查詢的日期窗口（含首尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Jan 1 .. Dec 31 of the given year.
    pub fn for_year(year: i32) -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1).expect("valid calendar date"),
            end: NaiveDate::from_ymd_opt(year, 12, 31).expect("valid calendar date"),
        }
    }
}

/// 純查詢描述：不做任何 I/O，直到交給 EarthEngine 執行才會被評估
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionQuery {
    pub archives: Vec<String>,
    pub bands: Vec<String>,
    pub date_window: DateWindow,
    pub boundary: BoundaryFilter,
    pub metadata_filters: Vec<FieldFilter>,
}

/// 視覺化參數：波段到 RGB 的對應、強度範圍、gamma
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisParams {
    pub bands: [&'static str; 3],
    pub min: f64,
    pub max: f64,
    pub gamma: f64,
}

/// Remote handle for an evaluated median composite (a tile layer URL).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeHandle {
    pub tile_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lon: f64,
    pub lat: f64,
}

/// 邊界的具體幾何：質心（地圖置中用）加 GeoJSON 外框
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryGeometry {
    pub centroid: LngLat,
    pub geometry: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerSource {
    /// 影像圖磚（合成結果）
    Tiles { url_template: String },
    /// 向量外框
    GeoJson {
        data: serde_json::Value,
        color: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub label: String,
    pub visible: bool,
    pub source: LayerSource,
}

/// 一次 generate 互動的輸入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub province: String,
    pub year: i32,
    pub max_cloud_cover: u8,
    pub vis_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    Rendered {
        output_file: String,
        image_count: u64,
        vis_label: String,
    },
    /// 零筆影像不是錯誤，是一個預期中的結果
    NoImages {
        province: String,
        year: i32,
        max_cloud_cover: u8,
    },
}
