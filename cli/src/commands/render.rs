use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use choropleth::{MapConfig, Session, load_inputs, render_chart, render_map};
use tracing::warn;

pub fn run(config: &MapConfig, args: &crate::cli::RenderArgs) -> Result<()> {
    let map_path = args.map.clone().unwrap_or_else(|| PathBuf::from("./map.svg"));
    let chart_path = args.chart.clone().unwrap_or_else(|| PathBuf::from("./chart.svg"));
    check_output(&map_path, args.force)?;
    check_output(&chart_path, args.force)?;

    let inputs = load_inputs(&args.topology, &args.data, config)?;
    let mut session = Session::new(inputs.features, inputs.rows, config.attributes.clone(), config.palette.clone())?;
    if let Some(attribute) = &args.attribute {
        session.select(attribute)?;
    }

    let report = session.join_report();
    if !report.unmatched_rows.is_empty() {
        warn!("[render] {} rows matched no region: {:?}", report.unmatched_rows.len(), report.unmatched_rows);
    }

    render_map(&session, config, &map_path)?;
    render_chart(&session, config, &chart_path)?;
    println!("{} -> {}, {}", session.expressed(), map_path.display(), chart_path.display());

    Ok(())
}

fn check_output(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("[render] {} already exists; pass --force to overwrite", path.display());
    }
    Ok(())
}
