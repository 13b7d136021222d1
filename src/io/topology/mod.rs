//! Geographic input: TopoJSON topologies and GeoJSON feature collections.

mod geojson;
mod topojson;

use std::path::Path;

use anyhow::{Context, Result, bail};
use geo::MultiPolygon;
use serde_json::Value;
use tracing::{info, warn};

use crate::types::{Feature, RegionKey};
use topojson::{TopoFeature, Topology};

/// Read features from a TopoJSON or GeoJSON file.
pub fn read_features(path: &Path, key_field: &str, object: Option<&str>) -> Result<Vec<Feature>> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("[io::topology] Failed to read {}", path.display()))?;
    let features = read_features_bytes(&bytes, key_field, object)
        .with_context(|| format!("[io::topology] Failed to decode {}", path.display()))?;

    info!("[io::topology] read {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Read features from TopoJSON or GeoJSON text (for WASM/browser use).
pub fn read_features_str(json: &str, key_field: &str, object: Option<&str>) -> Result<Vec<Feature>> {
    read_features_bytes(json.as_bytes(), key_field, object)
}

fn read_features_bytes(bytes: &[u8], key_field: &str, object: Option<&str>) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_slice(bytes).context("[io::topology] Failed to parse JSON")?;

    let decoded = match value["type"].as_str() {
        Some("Topology") => {
            let topology: Topology = serde_json::from_value(value)
                .context("[io::topology] Malformed TopoJSON topology")?;
            topology.features(object)?
        }
        Some("FeatureCollection") => geojson::read_feature_collection(&value)?,
        other => bail!("[io::topology] Expected a Topology or FeatureCollection, found {other:?}"),
    };

    Ok(decoded.into_iter()
        .enumerate()
        .filter_map(|(i, feature)| into_feature(i, feature, key_field))
        .collect())
}

/// Key from `properties[key_field]`, falling back to the feature id. Numbers are
/// stringified so numeric FIPS-style ids still join against CSV text. Surrounding
/// whitespace is trimmed, the same as for CSV keys.
fn region_key(feature: &TopoFeature, key_field: &str) -> Option<RegionKey> {
    let value = feature.properties.get(key_field).or(feature.id.as_ref())?;
    match value {
        Value::String(s) => Some(s.trim()).filter(|k| !k.is_empty()).map(RegionKey::from),
        Value::Number(n) => Some(RegionKey::from(n.to_string())),
        _ => None,
    }
}

fn into_feature(index: usize, feature: TopoFeature, key_field: &str) -> Option<Feature> {
    let Some(key) = region_key(&feature, key_field) else {
        warn!("[io::topology] skipping feature {index}: no {key_field:?} property or id");
        return None;
    };

    let geometry = feature.geometry.unwrap_or_else(|| {
        warn!("[io::topology] feature {key}: unsupported geometry type {:?}, drawing nothing", feature.kind);
        MultiPolygon(Vec::new())
    });
    Some(Feature::new(key, geometry))
}

#[cfg(test)]
mod tests {
    use super::{read_features, read_features_str};

    const GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"adm1_code": "USA-3514"},
             "geometry": {"type": "Polygon", "coordinates": [[[-97, 43], [-89, 43], [-89, 49], [-97, 49]]]}},
            {"type": "Feature", "id": 48, "properties": {},
             "geometry": {"type": "Polygon", "coordinates": [[[-106, 26], [-94, 26], [-94, 36], [-106, 36]]]}},
            {"type": "Feature", "properties": {"name": "keyless"},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}},
            {"type": "Feature", "properties": {"adm1_code": "USA-0000"},
             "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}}
        ]
    }"#;

    #[test]
    fn keys_from_property_or_id() {
        let features = read_features_str(GEOJSON, "adm1_code", None).unwrap();
        let keys: Vec<&str> = features.iter().map(|f| &*f.region_key).collect();
        assert_eq!(keys, vec!["USA-3514", "48", "USA-0000"]);
        assert!(features[2].geometry.0.is_empty());
    }

    #[test]
    fn keys_are_trimmed_like_csv_keys() {
        let json = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {"adm1_code": " USA-3514 "},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}},
            {"type": "Feature", "properties": {"adm1_code": "   "},
             "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1]]]}}
        ]}"#;
        let features = read_features_str(json, "adm1_code", None).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(&*features[0].region_key, "USA-3514");

        let rows = crate::io::read_rows_str("adm1_code,x\n USA-3514 ,1\n", "adm1_code").unwrap();
        assert_eq!(rows[0].region_key, features[0].region_key);
    }

    #[test]
    fn topojson_is_detected() {
        let topo = r#"{"type": "Topology", "objects": {"s": {"type": "GeometryCollection", "geometries": [
            {"type": "Polygon", "arcs": [[0]], "properties": {"adm1_code": "X"}}
        ]}}, "arcs": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}"#;
        let features = read_features_str(topo, "adm1_code", None).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(&*features[0].region_key, "X");
        assert_eq!(features[0].geometry.0[0].exterior().0.len(), 4);
    }

    #[test]
    fn rejects_other_documents() {
        assert!(read_features_str(r#"{"type": "Feature"}"#, "adm1_code", None).is_err());
        assert!(read_features_str("[1, 2", "adm1_code", None).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("states.geojson");
        std::fs::write(&path, GEOJSON).unwrap();
        assert_eq!(read_features(&path, "adm1_code", None).unwrap().len(), 3);
        assert!(read_features(&dir.path().join("nope.json"), "adm1_code", None).is_err());
    }
}
