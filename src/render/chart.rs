use std::io::Write;

use anyhow::{Result, ensure};

use super::writer::{escape, write_svg_footer, write_svg_header, write_svg_styles};
use crate::{config::ChartConfig, session::Session};

const CHART_CSS: &str = r#".chartBackground { fill: #FFFFFF; }
.chartFrame { fill: none; stroke: #999999; stroke-width: 1px; }
.chartTitle { font: bold 18px sans-serif; }
.axis line, .axis path { stroke: #000000; shape-rendering: crispEdges; }
.axis text { font: 10px sans-serif; text-anchor: end; }
"#;

/// Linear value -> pixel mapping for the bar heights, `[0, max]` onto `[height, 0]`.
#[derive(Clone, Copy, Debug)]
struct YScale {
    max: f64,
    height: f64,
}

impl YScale {
    /// Pixel offset from the top of the plot area, clamped to the axis range.
    fn y(&self, value: f64) -> f64 {
        self.height - value.clamp(0.0, self.max) / self.max * self.height
    }
}

/// Write the bar chart of `session`'s expressed attribute, tallest bar first.
pub(super) fn write_chart<W: Write>(writer: &mut W, session: &Session, chart: &ChartConfig) -> Result<()> {
    let (inner_w, inner_h) = (chart.inner_width(), chart.inner_height());
    ensure!(inner_w > 0.0 && inner_h > 0.0,
        "[render::chart] Chart {}x{} leaves no room inside its padding", chart.width, chart.height);

    let bars = session.bars();
    let scale = YScale { max: axis_max(chart.y_max, bars.iter().filter_map(|bar| bar.value)), height: inner_h };
    let (left, top) = (chart.left_padding, chart.top_bottom_padding);

    write_svg_header(writer, chart.width, chart.height, "chart")?;
    write_svg_styles(writer, CHART_CSS)?;
    writeln!(writer, r#"<rect class="chartBackground" width="{inner_w}" height="{inner_h}" transform="translate({left},{top})"/>"#)?;

    let slot = inner_w / bars.len().max(1) as f64;
    for (i, bar) in bars.iter().enumerate() {
        let y = bar.value.map_or(inner_h, |value| scale.y(value));
        writeln!(writer, r#"<rect class="bar {}" x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" style="fill:{}"/>"#,
            escape(&bar.region_key), i as f64 * slot + left, y + top, (slot - 1.0).max(0.0), inner_h - y, bar.color)?;
    }

    writeln!(writer, r#"<text class="chartTitle" x="40" y="40">Number of {} in each state</text>"#,
        escape(session.expressed()))?;

    writeln!(writer, r#"<g class="axis" transform="translate({left},{top})">"#)?;
    writeln!(writer, r#"<line x1="0" y1="0" x2="0" y2="{inner_h}"/>"#)?;
    let step = tick_step(scale.max, chart.ticks);
    for tick in ticks(scale.max, step) {
        let y = scale.y(tick);
        writeln!(writer, r#"<line x1="-6" y1="{y:.3}" x2="0" y2="{y:.3}"/><text x="-9" y="{y:.3}" dy="0.32em">{}</text>"#,
            tick_label(tick, step))?;
    }
    writeln!(writer, "</g>")?;

    writeln!(writer, r#"<rect class="chartFrame" width="{inner_w}" height="{inner_h}" transform="translate({left},{top})"/>"#)?;
    write_svg_footer(writer)
}

/// Configured maximum, else 110% of the largest value, else 1.
fn axis_max(configured: Option<f64>, values: impl Iterator<Item = f64>) -> f64 {
    if let Some(max) = configured.filter(|max| *max > 0.0) { return max }
    match values.fold(f64::NEG_INFINITY, f64::max) {
        max if max > 0.0 => max * 1.1,
        _ => 1.0,
    }
}

/// Round tick spacing (1, 2 or 5 times a power of ten) giving about `count` ticks.
fn tick_step(max: f64, count: usize) -> f64 {
    let raw = max / count.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0].into_iter()
        .map(|factor| factor * magnitude)
        .find(|step| *step >= raw);
    step.unwrap_or(10.0 * magnitude)
}

fn ticks(max: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = (max / step + 1e-9).floor() as usize;
    (0..=count).map(move |i| i as f64 * step)
}

fn tick_label(tick: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10() - 1e-9).ceil() as usize };
    format!("{tick:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::{YScale, axis_max, tick_label, tick_step, ticks, write_chart};
    use crate::{
        classify::Palette, config::ChartConfig, render::writer::SvgStringWriter, session::Session,
        types::{Feature, Row},
    };

    fn render(y_max: Option<f64>) -> String {
        let rows = vec![
            Row::new("A").with("Heated", "40"),
            Row::new("B").with("Heated", "100"),
            Row::new("C").with("Heated", "n/a"),
            Row::new("D").with("Heated", "70"),
        ];
        let features = vec![Feature::without_geometry("A")];
        let session = Session::new(features, rows, vec!["Heated".to_string()], Palette::default()).unwrap();

        let config = ChartConfig { y_max, ..ChartConfig::default() };
        let mut writer = SvgStringWriter::new();
        write_chart(&mut writer, &session, &config).unwrap();
        writer.into_string().unwrap()
    }

    #[test]
    fn bars_in_descending_order() {
        let svg = render(Some(110.0));
        let order: Vec<usize> = ["bar B", "bar D", "bar A", "bar C"].iter()
            .map(|class| svg.find(class).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
        assert!(svg.contains("Number of Heated in each state"));
        assert!(svg.contains(r#"class="chartFrame""#));
    }

    #[test]
    fn bar_geometry() {
        // inner width 816 - 25 - 2 = 789 over 4 bars; inner height 473 - 10 = 463.
        let svg = render(Some(100.0));
        assert!(svg.contains(r#"class="bar B" x="25.000" y="5.000" width="196.250" height="463.000""#));
        assert!(svg.contains(r#"class="bar C" x="616.750" y="468.000" width="196.250" height="0.000""#));
    }

    #[test]
    fn derived_axis_max() {
        assert_eq!(axis_max(Some(110.0), [5.0].into_iter()), 110.0);
        assert!((axis_max(None, [40.0, 100.0].into_iter()) - 110.0).abs() < 1e-9);
        assert_eq!(axis_max(None, std::iter::empty()), 1.0);
        assert_eq!(axis_max(None, [-3.0].into_iter()), 1.0);
    }

    #[test]
    fn nice_ticks() {
        assert_eq!(tick_step(110.0, 10), 20.0);
        assert!((tick_step(1.0, 4) - 0.5).abs() < 1e-12);
        assert_eq!(ticks(110.0, 20.0).collect::<Vec<_>>(), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        assert_eq!(tick_label(40.0, 20.0), "40");
        assert_eq!(tick_label(0.5, 0.1), "0.5");
        assert_eq!(tick_label(0.5, 0.5), "0.5");
    }

    #[test]
    fn y_scale_clamps() {
        let scale = YScale { max: 100.0, height: 200.0 };
        assert_eq!(scale.y(0.0), 200.0);
        assert_eq!(scale.y(50.0), 100.0);
        assert_eq!(scale.y(150.0), 0.0);
        assert_eq!(scale.y(-5.0), 200.0);
    }
}
