#![doc = "Choropleth public API"]
mod classify;
mod config;
mod error;
mod io;
mod join;
mod render;
mod session;
mod types;

#[doc(inline)]
pub use types::{Attributed, Feature, RegionKey, Row, parse_value};

#[doc(inline)]
pub use join::{JoinReport, join};

#[doc(inline)]
pub use classify::{Breaks, ColorScale, Palette, Rgb, natural_breaks};

#[doc(inline)]
pub use session::{Bar, Session};

#[doc(inline)]
pub use config::{ChartConfig, MapConfig, MapFrameConfig};

#[doc(inline)]
pub use error::LoadError;

#[doc(inline)]
pub use io::{Inputs, load_inputs, read_features, read_features_str, read_rows, read_rows_str};

#[doc(inline)]
pub use render::{render_chart, render_chart_string, render_map, render_map_string};
