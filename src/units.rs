//! # Unit Conversion Module
//!
//! Converts quantities between the small fixed set of units the pantry
//! understands: grams/kilograms for mass and milliliters/liters for volume.
//! Any other unit pair passes through unchanged.
//!
//! ## Design
//!
//! The source product silently returned the input quantity for unsupported
//! pairs, which can mask unit-mismatch bugs. Here `convert` returns a tagged
//! [`Conversion`] so callers can tell a real conversion from an identity
//! fallback. Call sites that want the old permissive behavior use
//! [`convert_value`], which logs a warning on fallback.

use lazy_static::lazy_static;
use log::warn;
use std::collections::HashMap;

/// Outcome of a conversion attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    /// The unit pair was supported (or identical) and the value was converted
    Converted(f64),
    /// Unsupported unit pair; the quantity passed through unchanged
    Identity(f64),
}

impl Conversion {
    /// The numeric result regardless of how it was obtained
    pub fn value(&self) -> f64 {
        match self {
            Conversion::Converted(v) | Conversion::Identity(v) => *v,
        }
    }

    /// True when the unit pair was actually supported
    pub fn is_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }
}

// Fixed conversion table. Keys are (from, to) in normalized lowercase form.
lazy_static! {
    static ref CONVERSION_FACTORS: HashMap<(String, String), f64> = {
        let mut factors = HashMap::new();
        factors.insert(("g".to_string(), "kg".to_string()), 0.001);
        factors.insert(("kg".to_string(), "g".to_string()), 1000.0);
        factors.insert(("ml".to_string(), "l".to_string()), 0.001);
        factors.insert(("l".to_string(), "ml".to_string()), 1000.0);
        factors
    };
}

/// Normalize a unit spelling for lookup (trim and lowercase, so "L" and "l"
/// are the same liter)
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Convert a quantity from one unit to another
///
/// Pure and total: never fails. Identical units (after normalization) are a
/// trivial conversion; unknown pairs return [`Conversion::Identity`].
///
/// # Examples
///
/// ```rust
/// use pantry::units::{convert, Conversion};
///
/// assert_eq!(convert(2.0, "kg", "g"), Conversion::Converted(2000.0));
/// assert_eq!(convert(0.8, "L", "ml"), Conversion::Converted(800.0));
/// assert_eq!(convert(3.0, "each", "kg"), Conversion::Identity(3.0));
/// ```
pub fn convert(quantity: f64, from: &str, to: &str) -> Conversion {
    let from_unit = normalize_unit(from);
    let to_unit = normalize_unit(to);

    if from_unit == to_unit {
        return Conversion::Converted(quantity);
    }

    match CONVERSION_FACTORS.get(&(from_unit, to_unit)) {
        Some(factor) => Conversion::Converted(quantity * factor),
        None => Conversion::Identity(quantity),
    }
}

/// Permissive conversion matching the original product behavior
///
/// Returns the converted value for supported pairs and the unchanged
/// quantity otherwise, logging a warning so the mismatch is at least
/// visible in diagnostics.
pub fn convert_value(quantity: f64, from: &str, to: &str) -> f64 {
    match convert(quantity, from, to) {
        Conversion::Converted(value) => value,
        Conversion::Identity(value) => {
            warn!(
                "No conversion from '{}' to '{}'; passing {} through unchanged",
                from, to, value
            );
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_conversions() {
        assert_eq!(convert(1.0, "kg", "g"), Conversion::Converted(1000.0));
        assert_eq!(convert(500.0, "g", "kg"), Conversion::Converted(0.5));
    }

    #[test]
    fn test_volume_conversions() {
        assert_eq!(convert(2.0, "l", "ml"), Conversion::Converted(2000.0));
        assert_eq!(convert(250.0, "ml", "l"), Conversion::Converted(0.25));
    }

    #[test]
    fn test_case_insensitive_units() {
        assert_eq!(convert(0.8, "L", "ml"), Conversion::Converted(800.0));
        assert_eq!(convert(1.5, "KG", "G"), Conversion::Converted(1500.0));
    }

    #[test]
    fn test_same_unit_is_trivially_converted() {
        assert_eq!(convert(7.0, "kg", "kg"), Conversion::Converted(7.0));
        assert_eq!(convert(3.0, "each", "each"), Conversion::Converted(3.0));
    }

    #[test]
    fn test_unsupported_pair_is_identity() {
        assert_eq!(convert(4.0, "cups", "g"), Conversion::Identity(4.0));
        assert!(!convert(4.0, "cups", "g").is_converted());
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for quantity in [0.001, 0.8, 1.0, 42.5, 900.0] {
            let there_and_back = convert(convert(quantity, "g", "kg").value(), "kg", "g").value();
            assert!((there_and_back - quantity).abs() < 1e-9);

            let there_and_back = convert(convert(quantity, "ml", "l").value(), "l", "ml").value();
            assert!((there_and_back - quantity).abs() < 1e-9);
        }
    }

    #[test]
    fn test_convert_value_falls_back_unchanged() {
        assert_eq!(convert_value(900.0, "ml", "kg"), 900.0);
        assert_eq!(convert_value(0.8, "l", "ml"), 800.0);
    }
}
