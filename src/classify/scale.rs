use tracing::debug;

use crate::types::Attributed;
use super::{Breaks, Palette, Rgb};

/// Threshold color scale for one attribute: value -> class -> palette color.
#[derive(Debug, Clone)]
pub struct ColorScale {
    attribute: String,
    breaks: Breaks,
    palette: Palette,
}

impl ColorScale {
    /// Classify `attribute` across `records`. Records without a parseable value are left
    /// out of the clustering entirely. Never fails.
    pub fn build<R: Attributed>(records: &[R], attribute: &str, palette: &Palette) -> Self {
        let values: Vec<f64> = records.iter()
            .filter_map(|record| record.value(attribute))
            .collect();
        let breaks = Breaks::compute(&values, palette.len());

        debug!(attribute, values = values.len(), "[classify] boundaries {:?}", breaks.boundaries());
        Self { attribute: attribute.to_string(), breaks, palette: palette.clone() }
    }

    pub fn attribute(&self) -> &str { &self.attribute }

    pub fn breaks(&self) -> &Breaks { &self.breaks }

    pub fn boundaries(&self) -> &[f64] { self.breaks.boundaries() }

    pub fn palette(&self) -> &Palette { &self.palette }

    /// Class of a value, or `None` for missing data.
    pub fn class_of(&self, value: Option<f64>) -> Option<usize> {
        value.filter(|v| v.is_finite()).map(|v| self.breaks.class_of(v))
    }

    /// Fill color for a value; missing data gets the palette's fallback color.
    pub fn color(&self, value: Option<f64>) -> Rgb {
        match self.class_of(value) {
            Some(class) => self.palette.class_color(class),
            None => self.palette.missing(),
        }
    }

    /// Color for a record's value of this scale's attribute.
    pub fn color_of<R: Attributed>(&self, record: &R) -> Rgb {
        self.color(record.value(&self.attribute))
    }
}
