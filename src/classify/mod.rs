//! Value classification and color mapping.

mod breaks;
mod color;
mod scale;

pub use breaks::{Breaks, natural_breaks};
pub use color::{Palette, Rgb};
pub use scale::ColorScale;
