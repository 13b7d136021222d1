//! Map and chart configuration, read from JSON.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::classify::{Palette, Rgb};

/// Everything that shapes a rendered page: which attributes exist, how inputs are keyed,
/// colors, and frame dimensions. Missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Ordered attribute names; the first is selected initially.
    pub attributes: Vec<String>,
    /// Column / property holding the region key in both inputs.
    pub key_field: String,
    /// TopoJSON object to read; `None` picks the first object.
    pub topology_object: Option<String>,
    pub palette: Palette,
    pub map: MapFrameConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapFrameConfig {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub background: Rgb,
    /// Graticule spacing in degrees; 0 disables the graticule.
    pub graticule_step: f64,
    pub title: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_bottom_padding: f64,
    /// Upper end of the y axis; `None` uses 110% of the largest value.
    pub y_max: Option<f64>,
    pub ticks: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            attributes: [
                "Total Housing (million)",
                "Average sq footage",
                "Heated",
                "Cooled",
                "Average Usage",
            ].iter().map(|s| s.to_string()).collect(),
            key_field: "adm1_code".to_string(),
            topology_object: None,
            palette: Palette::default(),
            map: MapFrameConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl Default for MapFrameConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 480.0,
            margin: 10.0,
            background: Rgb::new(0xE0, 0xF3, 0xFF),
            graticule_step: 5.0,
            title: "Energy Usage per Household in the US".to_string(),
            source: "Source: US Energy, US census data".to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 816.0,
            height: 473.0,
            left_padding: 25.0,
            right_padding: 2.0,
            top_bottom_padding: 5.0,
            y_max: None,
            ticks: 10,
        }
    }
}

impl ChartConfig {
    pub fn inner_width(&self) -> f64 { self.width - self.left_padding - self.right_padding }

    pub fn inner_height(&self) -> f64 { self.height - self.top_bottom_padding * 2.0 }
}

impl MapConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        Self::from_json(&bytes)
            .with_context(|| format!("[config] Invalid config in {}", path.display()))
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let config: MapConfig = serde_json::from_slice(bytes)
            .context("[config] Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.attributes.is_empty(), "[config] At least one attribute is required");
        ensure!(!self.key_field.is_empty(), "[config] key_field must not be empty");
        ensure!(self.map.width > 2.0 * self.map.margin && self.map.height > 2.0 * self.map.margin,
            "[config] Map frame {}x{} is too small for margin {}", self.map.width, self.map.height, self.map.margin);
        ensure!(self.chart.inner_width() > 0.0 && self.chart.inner_height() > 0.0,
            "[config] Chart frame {}x{} is too small for its padding", self.chart.width, self.chart.height);
        ensure!(self.map.graticule_step >= 0.0, "[config] graticule_step must not be negative");
        if let Some(y_max) = self.chart.y_max {
            ensure!(y_max > 0.0, "[config] chart.y_max must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MapConfig;
    use crate::classify::Palette;

    #[test]
    fn defaults_validate() {
        let config = MapConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.attributes[0], "Total Housing (million)");
        assert_eq!(config.palette, Palette::default());
        assert_eq!(config.chart.inner_height(), 463.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MapConfig::from_json(br#"{"attributes": ["Heated", "Cooled"], "chart": {"y_max": 110}}"#).unwrap();
        assert_eq!(config.attributes, vec!["Heated".to_string(), "Cooled".to_string()]);
        assert_eq!(config.chart.y_max, Some(110.0));
        assert_eq!(config.chart.height, 473.0);
        assert_eq!(config.key_field, "adm1_code");
    }

    #[test]
    fn rejects_invalid_configs() {
        assert!(MapConfig::from_json(br#"{"attributes": []}"#).is_err());
        assert!(MapConfig::from_json(br#"{"map": {"width": 10, "margin": 10}}"#).is_err());
        assert!(MapConfig::from_json(br#"{"palette": {"classes": []}}"#).is_err());
        assert!(MapConfig::from_json(b"not json").is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"key_field": "regionKey"}"#).unwrap();
        assert_eq!(MapConfig::from_path(&path).unwrap().key_field, "regionKey");
        assert!(MapConfig::from_path(&dir.path().join("missing.json")).is_err());
    }
}
