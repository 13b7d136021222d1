use anyhow::{Result, anyhow};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::Value;

use super::topojson::TopoFeature;

/// Read the features of a GeoJSON FeatureCollection.
pub(crate) fn read_feature_collection(value: &Value) -> Result<Vec<TopoFeature>> {
    let features = value["features"].as_array()
        .ok_or_else(|| anyhow!("[io::geojson] FeatureCollection has no features array"))?;

    features.iter().map(|feature| {
        let geometry = &feature["geometry"];
        let kind = geometry["type"].as_str().unwrap_or_default().to_string();
        let coords = geometry["coordinates"].as_array();

        let shape = match (kind.as_str(), coords) {
            ("Polygon", Some(rings)) => Some(MultiPolygon(vec![parse_polygon_coords(rings)?])),
            ("MultiPolygon", Some(polygons)) => Some(MultiPolygon(polygons.iter()
                .map(|polygon| polygon.as_array()
                    .ok_or_else(|| anyhow!("[io::geojson] Invalid MultiPolygon: polygon is not an array"))
                    .and_then(|rings| parse_polygon_coords(rings)))
                .collect::<Result<Vec<_>>>()?)),
            _ => None,
        };

        Ok(TopoFeature {
            id: feature.get("id").cloned(),
            properties: feature["properties"].as_object().cloned().unwrap_or_default(),
            geometry: shape,
            kind,
        })
    }).collect()
}

/// Parse GeoJSON Polygon coordinates: `[exterior, hole, hole, ...]`.
fn parse_polygon_coords(rings: &[Value]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|ring| {
        ring.as_array()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid Polygon: ring is not an array"))
            .and_then(|coords| parse_ring_coords(coords))
    });

    let exterior = rings.next().unwrap_or_else(|| Ok(LineString(Vec::new())))?;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Parse a ring (exterior or interior) from GeoJSON coordinates.
/// Format: [[x, y], [x, y], ...]
fn parse_ring_coords(coords: &[Value]) -> Result<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());

    for coord_pair in coords {
        let x = coord_pair[0].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: x must be a number"))?;
        let y = coord_pair[1].as_f64()
            .ok_or_else(|| anyhow!("[io::geojson] Invalid coordinate: y must be a number"))?;
        points.push(Coord { x, y });
    }

    // Ensure ring is closed (first point == last point)
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }

    Ok(LineString(points))
}
