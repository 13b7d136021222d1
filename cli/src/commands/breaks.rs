use anyhow::Result;
use choropleth::{ColorScale, LoadError, MapConfig, read_rows};

use tracing::warn;

use super::resolve_attribute;

pub fn run(config: &MapConfig, args: &crate::cli::BreaksArgs) -> Result<()> {
    let attribute = resolve_attribute(config, args.attribute.as_deref())?;

    let rows = read_rows(&args.data, &config.key_field)
        .map_err(|source| LoadError::Table { path: args.data.clone(), source })?;
    let scale = ColorScale::build(&rows, attribute, &config.palette);

    let boundaries = scale.boundaries();
    if boundaries.is_empty() && scale.breaks().class_count() > 1 {
        warn!("[breaks] No numeric values for {attribute:?} in {}", args.data.display());
    }

    println!("{attribute}: {} classes, boundaries {boundaries:?}", scale.breaks().class_count());
    for class in 0..scale.breaks().class_count() {
        let lower = class.checked_sub(1).and_then(|i| boundaries.get(i));
        let upper = boundaries.get(class);
        let range = match (lower, upper) {
            (None, Some(hi)) => format!("< {hi}"),
            (Some(lo), Some(hi)) => format!("[{lo}, {hi})"),
            (Some(lo), None) => format!(">= {lo}"),
            (None, None) => "all values".to_string(),
        };
        println!("  {class}  {}  {range}", scale.palette().class_color(class));
    }
    println!("  -  {}  no value", scale.palette().missing());

    Ok(())
}
