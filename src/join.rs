//! Attribute join between tabular rows and geographic features.

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::types::{Feature, Row, parse_value};

/// Counts collected while joining. Unmatched records are expected, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub matched_rows: usize,
    pub unmatched_rows: Vec<String>,  // Keys of rows that matched no feature, in input order
    pub unmatched_features: usize,
    pub parse_failures: usize,  // Cells present but not numeric; absent cells are not counted
}

/// Copy each row's `attributes` onto every feature sharing its region key.
///
/// Rows are applied in input order, so when several rows share a key the last one wins,
/// including when its cell fails to parse: the attribute is then removed rather than
/// kept from an earlier row. Features are indexed by key once, which gives the same
/// result as comparing every row against every feature.
pub fn join(features: &mut [Feature], rows: &[Row], attributes: &[String]) -> JoinReport {
    let mut index: AHashMap<&str, Vec<usize>> = AHashMap::with_capacity(features.len());
    for (i, feature) in features.iter().enumerate() {
        index.entry(&*feature.region_key).or_default().push(i);
    }

    let mut report = JoinReport::default();
    let mut touched: AHashSet<usize> = AHashSet::new();
    let mut updates: Vec<(usize, &str, Option<f64>)> = Vec::new();

    for row in rows {
        let Some(targets) = index.get(&*row.region_key) else {
            report.unmatched_rows.push(row.region_key.to_string());
            continue;
        };
        report.matched_rows += 1;

        for attribute in attributes {
            let raw = row.raw(attribute);
            let value = raw.and_then(parse_value);
            if raw.is_some() && value.is_none() { report.parse_failures += 1 }
            for &i in targets {
                updates.push((i, attribute.as_str(), value));
            }
        }
        touched.extend(targets.iter().copied());
    }

    drop(index);
    for (i, attribute, value) in updates {
        let properties = &mut features[i].properties;
        match value {
            Some(v) => { properties.insert(attribute.to_string(), v); }
            None => { properties.remove(attribute); }
        }
    }

    report.unmatched_features = features.len() - touched.len();
    debug!(
        matched = report.matched_rows,
        unmatched_rows = report.unmatched_rows.len(),
        unmatched_features = report.unmatched_features,
        parse_failures = report.parse_failures,
        "[join] joined {} rows onto {} features", rows.len(), features.len()
    );
    report
}
