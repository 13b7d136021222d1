use ahash::AHashMap;
use geo::MultiPolygon;

use super::{Attributed, RegionKey};

/// A geographic unit (one state) with its joined attribute values.
#[derive(Debug, Clone)]
pub struct Feature {
    pub region_key: RegionKey,
    pub geometry: MultiPolygon<f64>,  // Lon/lat, never touched by join or classify
    pub properties: AHashMap<String, f64>,
}

impl Feature {
    pub fn new(region_key: impl Into<RegionKey>, geometry: MultiPolygon<f64>) -> Self {
        Self { region_key: region_key.into(), geometry, properties: AHashMap::new() }
    }

    /// Feature with no geometry, mostly useful for tests and table-only pipelines.
    pub fn without_geometry(region_key: impl Into<RegionKey>) -> Self {
        Self::new(region_key, MultiPolygon(Vec::new()))
    }

    #[inline]
    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.properties.get(attribute).copied()
    }
}

impl Attributed for Feature {
    fn region_key(&self) -> &str { &self.region_key }

    fn value(&self, attribute: &str) -> Option<f64> { self.get(attribute) }
}
