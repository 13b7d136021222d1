//! Page session: joined data plus the active attribute selection.

use anyhow::{Result, anyhow, ensure};
use tracing::info;

use crate::{
    classify::{ColorScale, Palette, Rgb},
    join::{JoinReport, join},
    types::{Attributed, Feature, RegionKey, Row},
};

/// One bar of the coordinated chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub region_key: RegionKey,
    pub value: Option<f64>,
    pub color: Rgb,
}

/// Owns everything a rendered page needs. Features are joined once at construction;
/// selecting another attribute only rebuilds the color scale.
#[derive(Debug, Clone)]
pub struct Session {
    features: Vec<Feature>,
    rows: Vec<Row>,
    attributes: Vec<String>,
    palette: Palette,
    scale: ColorScale,
    report: JoinReport,
}

impl Session {
    /// Join `rows` onto `features` and classify the first attribute.
    pub fn new(mut features: Vec<Feature>, rows: Vec<Row>, attributes: Vec<String>, palette: Palette) -> Result<Self> {
        let first = attributes.first()
            .ok_or_else(|| anyhow!("[session] At least one attribute is required"))?;

        let report = join(&mut features, &rows, &attributes);
        let scale = ColorScale::build(&rows, first, &palette);
        info!(
            "[session] {} features, {} rows ({} unmatched), expressing {first:?}",
            features.len(), rows.len(), report.unmatched_rows.len()
        );

        Ok(Self { features, rows, attributes, palette, scale, report })
    }

    /// Make `attribute` the expressed attribute, recomputing its class boundaries from
    /// scratch. Unknown names are rejected and leave the session untouched.
    pub fn select(&mut self, attribute: &str) -> Result<&ColorScale> {
        ensure!(self.attributes.iter().any(|a| a == attribute),
            "[session] Unknown attribute {attribute:?}; expected one of {:?}", self.attributes);

        self.scale = ColorScale::build(&self.rows, attribute, &self.palette);
        info!("[session] expressing {attribute:?}, boundaries {:?}", self.scale.boundaries());
        Ok(&self.scale)
    }

    pub fn attributes(&self) -> &[String] { &self.attributes }

    pub fn expressed(&self) -> &str { self.scale.attribute() }

    pub fn scale(&self) -> &ColorScale { &self.scale }

    pub fn features(&self) -> &[Feature] { &self.features }

    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn join_report(&self) -> &JoinReport { &self.report }

    /// Fill color of every feature for the expressed attribute, in feature order.
    pub fn feature_colors(&self) -> Vec<Rgb> {
        self.features.iter().map(|feature| self.scale.color_of(feature)).collect()
    }

    /// Chart bars: one per row, tallest first, rows without a value last (in input order).
    pub fn bars(&self) -> Vec<Bar> {
        let attribute = self.expressed();
        let mut bars: Vec<Bar> = self.rows.iter()
            .map(|row| {
                let value = row.value(attribute);
                Bar { region_key: row.region_key.clone(), value, color: self.scale.color(value) }
            })
            .collect();

        bars.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        bars
    }
}
