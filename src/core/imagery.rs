use crate::core::{BoundaryFilter, CollectionQuery, DateWindow, FieldFilter, VisParams};

pub const LANDSAT8_ARCHIVE: &str = "LANDSAT/LC08/C02/T1_TOA";
pub const LANDSAT9_ARCHIVE: &str = "LANDSAT/LC09/C02/T1_TOA";
/// Landsat 9 加入合併的起始年
pub const LANDSAT9_FIRST_YEAR: i32 = 2021;
pub const CLOUD_COVER_FIELD: &str = "CLOUD_COVER";
pub const QUERY_BANDS: [&str; 4] = ["B4", "B3", "B2", "B5"];

pub static TRUE_COLOR: VisParams = VisParams {
    bands: ["B4", "B3", "B2"],
    min: 0.0,
    max: 0.3,
    gamma: 1.4,
};

pub static FALSE_COLOR: VisParams = VisParams {
    bands: ["B5", "B4", "B3"],
    min: 0.0,
    max: 0.3,
    gamma: 1.4,
};

/// 組出一年份的 Landsat 集合查詢。純函數：真正的評估交給 EarthEngine。
///
/// 2021 年起 Landsat 9 上線，查詢變成兩個檔案庫的聯集；之前只查 Landsat 8。
pub fn build_collection_query(
    boundary: &BoundaryFilter,
    year: i32,
    max_cloud_cover: u8,
) -> CollectionQuery {
    let archives = if year >= LANDSAT9_FIRST_YEAR {
        vec![LANDSAT8_ARCHIVE.to_string(), LANDSAT9_ARCHIVE.to_string()]
    } else {
        vec![LANDSAT8_ARCHIVE.to_string()]
    };

    CollectionQuery {
        archives,
        bands: QUERY_BANDS.iter().map(|b| b.to_string()).collect(),
        date_window: DateWindow::for_year(year),
        boundary: boundary.clone(),
        metadata_filters: vec![FieldFilter::lt(CLOUD_COVER_FIELD, max_cloud_cover)],
    }
}

/// 視覺化預設表是封閉的：未知或缺的 key 一律退回 true_color
pub fn visualization_params(vis_type: Option<&str>) -> &'static VisParams {
    match vis_type {
        Some("false_color") => &FALSE_COLOR,
        _ => &TRUE_COLOR,
    }
}

/// "true_color" -> "True Color"（圖層標籤用）
pub fn vis_label(vis_type: &str) -> String {
    vis_type
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
