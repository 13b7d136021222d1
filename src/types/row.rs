use ahash::AHashMap;

use super::{Attributed, RegionKey, parse_value};

/// One line of the tabular input: a region key and raw, not yet numeric, cells.
#[derive(Debug, Clone)]
pub struct Row {
    pub region_key: RegionKey,
    pub cells: AHashMap<String, String>,
}

impl Row {
    pub fn new(region_key: impl Into<RegionKey>) -> Self {
        Self { region_key: region_key.into(), cells: AHashMap::new() }
    }

    /// Builder-style cell insertion.
    pub fn with(mut self, attribute: impl Into<String>, raw: impl Into<String>) -> Self {
        self.cells.insert(attribute.into(), raw.into());
        self
    }

    pub fn raw(&self, attribute: &str) -> Option<&str> {
        self.cells.get(attribute).map(String::as_str)
    }
}

impl Attributed for Row {
    fn region_key(&self) -> &str { &self.region_key }

    fn value(&self, attribute: &str) -> Option<f64> {
        self.raw(attribute).and_then(parse_value)
    }
}

#[cfg(test)]
mod tests {
    use super::Row;
    use crate::types::Attributed;

    #[test]
    fn value_parses_raw_cell() {
        let row = Row::new("A").with("x", "10").with("y", "bad");
        assert_eq!(row.value("x"), Some(10.0));
        assert_eq!(row.value("y"), None);
        assert_eq!(row.value("z"), None);
        assert_eq!(row.raw("y"), Some("bad"));
    }
}
