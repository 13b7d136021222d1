//! SVG output for the map and its coordinated bar chart.

mod chart;
mod map;
mod path;
mod projection;
mod writer;

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::{config::MapConfig, session::Session};
use writer::{SvgStringWriter, SvgWriter};

/// Write the choropleth map for the expressed attribute to `path`.
pub fn render_map(session: &Session, config: &MapConfig, path: &Path) -> Result<()> {
    let mut writer = SvgWriter::new(path)?;
    map::write_map(&mut writer, session, &config.map)?;
    writer.flush()
        .with_context(|| format!("[render] Failed to flush {}", path.display()))?;

    info!("[render] wrote map of {:?} to {}", session.expressed(), path.display());
    Ok(())
}

/// Render the choropleth map to an SVG string.
pub fn render_map_string(session: &Session, config: &MapConfig) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    map::write_map(&mut writer, session, &config.map)?;
    writer.into_string()
}

/// Write the bar chart for the expressed attribute to `path`.
pub fn render_chart(session: &Session, config: &MapConfig, path: &Path) -> Result<()> {
    let mut writer = SvgWriter::new(path)?;
    chart::write_chart(&mut writer, session, &config.chart)?;
    writer.flush()
        .with_context(|| format!("[render] Failed to flush {}", path.display()))?;

    info!("[render] wrote chart of {:?} to {}", session.expressed(), path.display());
    Ok(())
}

pub fn render_chart_string(session: &Session, config: &MapConfig) -> Result<String> {
    let mut writer = SvgStringWriter::new();
    chart::write_chart(&mut writer, session, &config.chart)?;
    writer.into_string()
}
