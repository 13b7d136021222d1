use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use choropleth_core::{MapConfig, Session, read_features_str, read_rows_str, render_chart_string, render_map_string};

use crate::common::*;

#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
    config: MapConfig,
}

#[wasm_bindgen]
impl WasmSession {
    /// Build a session from already-fetched inputs:
    /// topology: TopoJSON or GeoJSON text, csv: table text with a header row,
    /// config: optional JSON overriding the default attributes, palette and frames.
    /// Fails if either input cannot be parsed; nothing is rendered in that case.
    #[wasm_bindgen(constructor)]
    pub fn new(topology: &str, csv: &str, config: Option<String>) -> Result<WasmSession, JsValue> {
        let config = parse_config(config).map_err(js_err)?;
        let features = read_features_str(topology, &config.key_field, config.topology_object.as_deref())
            .map_err(|e| js_err(format!("failed to load topology: {e:#}")))?;
        let rows = read_rows_str(csv, &config.key_field)
            .map_err(|e| js_err(format!("failed to load table: {e:#}")))?;

        let inner = Session::new(features, rows, config.attributes.clone(), config.palette.clone())
            .map_err(js_err)?;
        Ok(WasmSession { inner, config })
    }

    /// Configured attribute names, in menu order.
    pub fn attributes(&self) -> Vec<String> {
        self.inner.attributes().to_vec()
    }

    /// Currently expressed attribute.
    pub fn expressed(&self) -> String {
        self.inner.expressed().to_string()
    }

    /// Switch the expressed attribute; returns the new breaks (see `breaks`).
    pub fn select(&mut self, attribute: &str) -> Result<JsValue, JsValue> {
        let scale = self.inner.select(attribute).map_err(js_err)?;
        serde_wasm_bindgen::to_value(&BreaksView::from(scale)).map_err(|e| e.into())
    }

    /// { attribute, boundaries: number[], colors: string[], missing: string }
    pub fn breaks(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&BreaksView::from(self.inner.scale())).map_err(|e| e.into())
    }

    /// Map SVG text for the expressed attribute.
    #[wasm_bindgen(js_name = "map_svg")]
    pub fn map_svg(&self) -> Result<String, JsValue> {
        render_map_string(&self.inner, &self.config).map_err(js_err)
    }

    /// Bar chart SVG text for the expressed attribute.
    #[wasm_bindgen(js_name = "chart_svg")]
    pub fn chart_svg(&self) -> Result<String, JsValue> {
        render_chart_string(&self.inner, &self.config).map_err(js_err)
    }
}
