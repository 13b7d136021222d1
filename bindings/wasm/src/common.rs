use anyhow::{Context, Result};
use serde::Serialize;
use wasm_bindgen::JsValue;

use choropleth_core::{ColorScale, MapConfig};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Config from optional JSON text; absent or empty text gives the defaults.
pub(crate) fn parse_config(config: Option<String>) -> Result<MapConfig> {
    match config.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => MapConfig::from_json(json.as_bytes())
            .context("[wasm] Invalid config JSON"),
        _ => Ok(MapConfig::default()),
    }
}

/// Plain-data view of a color scale for the page legend.
#[derive(Serialize)]
pub(crate) struct BreaksView {
    pub attribute: String,
    pub boundaries: Vec<f64>,
    pub colors: Vec<String>,
    pub missing: String,
}

impl From<&ColorScale> for BreaksView {
    fn from(scale: &ColorScale) -> Self {
        Self {
            attribute: scale.attribute().to_string(),
            boundaries: scale.boundaries().to_vec(),
            colors: scale.palette().classes().iter().map(|c| c.to_string()).collect(),
            missing: scale.palette().missing().to_string(),
        }
    }
}
