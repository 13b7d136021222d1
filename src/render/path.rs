use geo::{Coord, CoordsIter, LineString, MultiPolygon};

/// Projection function: planar coords -> SVG coords (x,y)
pub(crate) type Projection<'a> = dyn Fn(&Coord<f64>) -> (f64, f64) + 'a;

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, project: &Projection<'_>) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), project, true));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, project, true));
        }
    }

    out
}

/// Build an open SVG path string for a polyline.
pub(crate) fn line_to_path(line: &LineString<f64>, project: &Projection<'_>) -> String {
    ring_to_path(line, project, false)
}

/// Append "M x,y L x,y ..." for a LineString, closing it with "Z" for rings.
fn ring_to_path(ring: &LineString<f64>, project: &Projection<'_>, close: bool) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        if close { out.push('Z') }
    }

    out
}
