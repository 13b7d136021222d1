mod feature;
mod row;
mod value;

pub use feature::Feature;
pub use row::Row;
pub use value::{Attributed, parse_value};

/// Join key shared by tabular rows and geographic features.
/// Compared by exact, case-sensitive string equality.
pub type RegionKey = std::sync::Arc<str>;
