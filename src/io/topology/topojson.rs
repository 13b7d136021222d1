//! TopoJSON decoding: shared arcs stitched back into per-feature polygons.

use anyhow::{Context, Result, anyhow, bail, ensure};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub(crate) struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

/// One decoded geometry with the properties and id it carried.
pub(crate) struct TopoFeature {
    pub id: Option<Value>,
    pub properties: Map<String, Value>,
    pub geometry: Option<MultiPolygon<f64>>,  // None for unsupported geometry types
    pub kind: String,
}

impl Topology {
    /// Decode the geometries of `object` (or the first object when `None`).
    pub(crate) fn features(&self, object: Option<&str>) -> Result<Vec<TopoFeature>> {
        let (name, collection) = match object {
            Some(name) => self.objects.get(name)
                .map(|collection| (name, collection))
                .ok_or_else(|| anyhow!("[io::topojson] Object {name:?} not found in topology"))?,
            None => self.objects.iter().next()
                .map(|(name, collection)| (name.as_str(), collection))
                .ok_or_else(|| anyhow!("[io::topojson] Topology has no objects"))?,
        };

        let arcs = self.decode_arcs()?;

        let geometries = match collection["type"].as_str() {
            Some("GeometryCollection") => collection["geometries"].as_array()
                .ok_or_else(|| anyhow!("[io::topojson] Object {name:?} has no geometries array"))?
                .iter().collect::<Vec<_>>(),
            Some(_) => vec![collection],
            None => bail!("[io::topojson] Object {name:?} has no type"),
        };

        geometries.into_iter()
            .map(|geometry| decode_geometry(geometry, &arcs))
            .collect()
    }

    /// Absolute lon/lat arcs: quantized arcs are delta-decoded and then transformed.
    fn decode_arcs(&self) -> Result<Vec<Vec<Coord<f64>>>> {
        self.arcs.iter().enumerate().map(|(a, arc)| {
            let mut x = 0.0;
            let mut y = 0.0;
            arc.iter().map(|position| {
                ensure!(position.len() >= 2, "[io::topojson] Arc {a} has a position with fewer than two numbers");
                Ok(match &self.transform {
                    Some(t) => {
                        x += position[0];
                        y += position[1];
                        Coord { x: x * t.scale[0] + t.translate[0], y: y * t.scale[1] + t.translate[1] }
                    }
                    None => Coord { x: position[0], y: position[1] },
                })
            }).collect()
        }).collect()
    }
}

fn decode_geometry(geometry: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<TopoFeature> {
    let kind = geometry["type"].as_str().unwrap_or_default().to_string();
    let properties = geometry["properties"].as_object().cloned().unwrap_or_default();
    let id = geometry.get("id").cloned();

    let shape = match kind.as_str() {
        "Polygon" => Some(MultiPolygon(vec![decode_polygon(&geometry["arcs"], arcs)?])),
        "MultiPolygon" => {
            let polygons = geometry["arcs"].as_array()
                .ok_or_else(|| anyhow!("[io::topojson] MultiPolygon without arcs"))?
                .iter()
                .map(|polygon| decode_polygon(polygon, arcs))
                .collect::<Result<Vec<_>>>()?;
            Some(MultiPolygon(polygons))
        }
        _ => None,
    };

    Ok(TopoFeature { id, properties, geometry: shape, kind })
}

/// A polygon is a list of rings; the first ring is the exterior.
fn decode_polygon(rings: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>> {
    let mut rings = rings.as_array()
        .ok_or_else(|| anyhow!("[io::topojson] Polygon arcs must be an array of rings"))?
        .iter()
        .map(|ring| decode_ring(ring, arcs));

    let exterior = rings.next()
        .unwrap_or_else(|| Ok(LineString(Vec::new())))?;
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Stitch a ring from arc references. Index `!i` (negative) walks arc `i` backwards;
/// consecutive arcs share an endpoint, which is kept only once.
fn decode_ring(ring: &Value, arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>> {
    let indices = ring.as_array()
        .ok_or_else(|| anyhow!("[io::topojson] Ring must be an array of arc indices"))?;

    let mut coords: Vec<Coord<f64>> = Vec::new();
    for index in indices {
        let index = index.as_i64()
            .ok_or_else(|| anyhow!("[io::topojson] Arc index {index} is not an integer"))?;
        let (arc_idx, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = usize::try_from(arc_idx).ok()
            .and_then(|i| arcs.get(i))
            .with_context(|| format!("[io::topojson] Arc index {index} out of range ({} arcs)", arcs.len()))?;

        let skip = usize::from(!coords.is_empty());
        if reversed {
            coords.extend(arc.iter().rev().skip(skip).copied());
        } else {
            coords.extend(arc.iter().skip(skip).copied());
        }
    }

    // Ensure ring is closed (first point == last point)
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last { coords.push(first) }
    }
    Ok(LineString(coords))
}
