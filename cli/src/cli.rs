use std::path::PathBuf;

/// Choropleth map and bar chart renderer
#[derive(clap::Parser, Debug)]
#[command(name = "choropleth", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON config file (attributes, palette, frame sizes); defaults are used when omitted
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// List the configured attributes, first one is the default
    Attributes,

    /// Print natural-breaks class boundaries and colors for one attribute
    Breaks(BreaksArgs),

    /// Render the map and bar chart as SVG
    Render(RenderArgs),
}

#[derive(clap::Args, Debug)]
pub struct BreaksArgs {
    /// Input CSV table keyed by region
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Attribute to classify, defaults to the first configured attribute
    #[arg(short, long)]
    pub attribute: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Input TopoJSON or GeoJSON file with the region shapes
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub topology: PathBuf,

    /// Input CSV table keyed by region
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub data: PathBuf,

    /// Attribute to express, defaults to the first configured attribute
    #[arg(short, long)]
    pub attribute: Option<String>,

    /// Output map file, defaults to "./map.svg"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub map: Option<PathBuf>,

    /// Output chart file, defaults to "./chart.svg"
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub chart: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(short, long)]
    pub force: bool,
}
