//! Decimal rounding used for every reported figure.
//!
//! Rounding is half away from zero at the requested decimal place
//! (`f64::round` semantics), the same rule used for currency amounts.

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Currency amounts and percentages shown with two decimals.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Loss-of-profit percent is reported with three decimals.
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}
