pub mod attributes;
pub mod breaks;
pub mod render;

use anyhow::{Result, ensure};
use choropleth::MapConfig;

/// Explicit attribute if given, else the configured default. Must be a configured attribute.
fn resolve_attribute<'a>(config: &'a MapConfig, requested: Option<&'a str>) -> Result<&'a str> {
    let attribute = match requested {
        Some(attribute) => attribute,
        None => config.attributes.first().map(String::as_str).unwrap_or_default(),
    };
    ensure!(config.attributes.iter().any(|a| a == attribute),
        "[cli] Unknown attribute {attribute:?}; expected one of {:?}", config.attributes);
    Ok(attribute)
}
