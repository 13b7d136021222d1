use std::io::Write;

use anyhow::{Result, anyhow};
use geo::{Coord, LineString, MultiPolygon, Rect};

use super::{
    path::{line_to_path, multipolygon_to_path},
    projection::{AlbersUsa, Fit, Region, combined_bounds},
    writer::{escape, write_svg_footer, write_svg_header, write_svg_styles},
};
use crate::{config::MapFrameConfig, session::Session};

const MAP_CSS: &str = r#".state { stroke: #FFFFFF; stroke-width: 0.5; stroke-linejoin: round; }
.gratLines { fill: none; stroke: #999999; stroke-width: 0.5; }
.mapTitle { font: bold 20px sans-serif; text-anchor: middle; }
.mapSource { font: 11px sans-serif; text-anchor: end; fill: #555555; }
"#;

/// Write the choropleth map of `session`'s expressed attribute.
pub(super) fn write_map<W: Write>(writer: &mut W, session: &Session, frame: &MapFrameConfig) -> Result<()> {
    let albers = AlbersUsa::new()?;
    let shapes = session.features().iter()
        .map(|feature| albers.project_shape(&feature.geometry))
        .collect::<Result<Vec<_>>>()?;

    let bounds = combined_bounds(&shapes)
        .ok_or_else(|| anyhow!("[render::map] Could not determine bounds; nothing to draw."))?;
    let fit = Fit::new(bounds, frame.width, frame.height, frame.margin)?;
    let project = |coord: &Coord<f64>| fit.apply(coord);

    write_svg_header(writer, frame.width, frame.height, "map")?;
    write_svg_styles(writer, MAP_CSS)?;
    writeln!(writer, r#"<rect class="background" width="100%" height="100%" fill="{}"/>"#, frame.background)?;

    let graticule = graticule(session, frame.graticule_step)
        .iter()
        .map(|line| albers.project_line(line).map(|line| line_to_path(&line, &project)))
        .collect::<Result<String>>()?;
    if !graticule.is_empty() {
        writeln!(writer, r#"<path class="gratLines" d="{graticule}"/>"#)?;
    }

    let scale = session.scale();
    for ((feature, shape), color) in session.features().iter().zip(&shapes).zip(session.feature_colors()) {
        let value = match feature.get(scale.attribute()) {
            Some(value) => format!(r#" data-value="{value}""#),
            None => String::new(),
        };
        writeln!(writer, r#"<path class="state {}" style="fill:{color}"{value} d="{}"/>"#,
            escape(&feature.region_key), multipolygon_to_path(shape, &project))?;
    }

    writeln!(writer, r#"<text class="mapTitle" x="{}" y="30">{}</text>"#, frame.width / 2.0, escape(&frame.title))?;
    writeln!(writer, r#"<text class="mapSource" x="{}" y="{}">{}</text>"#,
        frame.width - 20.0, frame.height - 20.0, escape(&frame.source))?;

    write_svg_footer(writer)
}

/// Meridians and parallels at multiples of `step` degrees across the lower-48 extent,
/// densified to one vertex per degree so they curve under the conic projection.
fn graticule(session: &Session, step: f64) -> Vec<LineString<f64>> {
    if !(step > 0.0) { return Vec::new() }

    let lower48: Vec<&MultiPolygon<f64>> = session.features().iter()
        .map(|feature| &feature.geometry)
        .filter(|shape| Region::of(shape) == Region::Lower48)
        .collect();
    let Some(extent) = combined_bounds(lower48) else { return Vec::new() };

    let meridians = multiples(extent.min().x, extent.max().x, step)
        .map(|lon| densify(Coord { x: lon, y: extent.min().y }, Coord { x: lon, y: extent.max().y }));
    let parallels = multiples(extent.min().y, extent.max().y, step)
        .map(|lat| densify(Coord { x: extent.min().x, y: lat }, Coord { x: extent.max().x, y: lat }));

    meridians.chain(parallels).collect()
}

fn multiples(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(move |i| i as f64 * step)
}

fn densify(from: Coord<f64>, to: Coord<f64>) -> LineString<f64> {
    let span = Rect::new(from, to);
    let segments = span.width().max(span.height()).ceil().max(1.0) as usize;
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            Coord { x: from.x + (to.x - from.x) * t, y: from.y + (to.y - from.y) * t }
        })
        .collect()
}
