/// Coerce a raw cell into a number.
///
/// Surrounding whitespace is ignored. Anything that is not a finite decimal number
/// (including `NaN` and `inf`) is "no value", never zero.
pub fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A record that can be looked up by region key and asked for a numeric attribute.
pub trait Attributed {
    fn region_key(&self) -> &str;

    /// Numeric value of `attribute`, or `None` when absent or unparseable.
    fn value(&self, attribute: &str) -> Option<f64>;
}
