use anyhow::Result;
use choropleth::MapConfig;

pub fn run(config: &MapConfig) -> Result<()> {
    for (i, attribute) in config.attributes.iter().enumerate() {
        let marker = if i == 0 { " (default)" } else { "" };
        println!("{attribute}{marker}");
    }
    Ok(())
}
