use crate::core::{LayerSource, LngLat, MapLayer, Result};
use crate::domain::ports::MapSurface;
use crate::utils::error::DashError;

/// 無圖層時的預設視角：全印尼
const DEFAULT_CENTER: LngLat = LngLat {
    lon: 118.0,
    lat: -2.5,
};
const DEFAULT_ZOOM: u8 = 5;
const BASEMAP_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const BASEMAP_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Self-contained Leaflet map document.
///
/// Layers are rendered in insertion order; hidden layers are registered with
/// the layers control but not added to the map until toggled by the user.
pub struct LeafletMap {
    center: LngLat,
    zoom: u8,
    layers: Vec<MapLayer>,
}

impl LeafletMap {
    pub fn new() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            layers: Vec::new(),
        }
    }
}

impl Default for LeafletMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for LeafletMap {
    fn clear(&mut self) {
        self.layers.clear();
        self.center = DEFAULT_CENTER;
        self.zoom = DEFAULT_ZOOM;
    }

    fn center_on(&mut self, center: LngLat, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    fn add_layer(&mut self, layer: MapLayer) {
        self.layers.push(layer);
    }

    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn render(&self, width: u32, height: u32) -> Result<String> {
        if width == 0 || height == 0 {
            return Err(DashError::RenderFailed {
                message: format!("map dimensions must be non-zero, got {}x{}", width, height),
            });
        }

        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\"/>\n");
        html.push_str("<title>Landsat Imagery</title>\n");
        html.push_str(
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.css\"/>\n",
        );
        html.push_str("<script src=\"https://unpkg.com/leaflet@1.9.4/dist/leaflet.js\"></script>\n");
        html.push_str(&format!(
            "<style>#map {{ width: {}px; height: {}px; }}</style>\n",
            width, height
        ));
        html.push_str("</head>\n<body>\n<div id=\"map\"></div>\n<script>\n");

        html.push_str(&format!(
            "var map = L.map('map').setView([{}, {}], {});\n",
            self.center.lat, self.center.lon, self.zoom
        ));
        html.push_str(&format!(
            "L.tileLayer({}, {{ attribution: {} }}).addTo(map);\n",
            serde_json::to_string(BASEMAP_URL)?,
            serde_json::to_string(BASEMAP_ATTRIBUTION)?
        ));
        html.push_str("var overlays = {};\n");

        for (index, layer) in self.layers.iter().enumerate() {
            match &layer.source {
                LayerSource::Tiles { url_template } => {
                    html.push_str(&format!(
                        "var layer{} = L.tileLayer({}, {{ maxZoom: 20 }});\n",
                        index,
                        serde_json::to_string(url_template)?
                    ));
                }
                LayerSource::GeoJson { data, color } => {
                    html.push_str(&format!(
                        "var layer{} = L.geoJSON({}, {{ style: {{ color: {}, fill: false }} }});\n",
                        index,
                        serde_json::to_string(data)?,
                        serde_json::to_string(color)?
                    ));
                }
            }
            html.push_str(&format!(
                "overlays[{}] = layer{};\n",
                serde_json::to_string(&layer.label)?,
                index
            ));
            if layer.visible {
                html.push_str(&format!("layer{}.addTo(map);\n", index));
            }
        }

        html.push_str("L.control.layers(null, overlays).addTo(map);\n");
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }
}
