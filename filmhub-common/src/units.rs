//! Height unit conversion
//!
//! Converts centimeter totals into the feet-and-inches rendering used by the
//! character view metadata.

use std::fmt;

/// Centimeters per foot
const CM_PER_FOOT: f64 = 30.48;

/// A height expressed as whole feet plus fractional inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeetInches {
    pub feet: i64,
    pub inches: f64,
}

impl fmt::Display for FeetInches {
    /// Renders as `<feet>ft and <inches>inches` with inches to 2 decimal
    /// places, e.g. `5ft and 7.72inches`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ft and {:.2}inches", self.feet, self.inches)
    }
}

/// Convert a centimeter total to feet and inches.
///
/// Feet is the whole-foot part; the remainder becomes inches. No carry is
/// applied if the rendered inches rounds to 12.00 (accepted cosmetic edge).
///
/// # Examples
///
/// ```
/// use filmhub_common::units::to_feet_inches;
///
/// let h = to_feet_inches(3048);
/// assert_eq!(h.feet, 100);
/// assert_eq!(format!("{}", h), "100ft and 0.00inches");
/// ```
pub fn to_feet_inches(total_cm: u64) -> FeetInches {
    let total_feet = total_cm as f64 / CM_PER_FOOT;
    let feet = total_feet as i64;
    let inches = (total_feet - feet as f64) * 12.0;
    FeetInches { feet, inches }
}

/// Render a centimeter total as `<n>cm`
pub fn format_cm(total_cm: u64) -> String {
    format!("{}cm", total_cm)
}
