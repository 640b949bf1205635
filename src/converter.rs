//! Unit conversion for length, weight and temperature.
//!
//! Length and weight are linear: values pass through the category's base
//! unit (metres, kilograms). Temperature passes through Celsius.

use std::fmt;

use thiserror::Error;

use crate::calculator::format::round_to;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid unit for category {0}")]
    InvalidUnit(Category),
    #[error("Invalid temperature unit: {0}")]
    InvalidTemperatureUnit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Length,
    Weight,
    Temperature,
}

impl Category {
    pub const ALL: [Category; 3] = [Self::Length, Self::Weight, Self::Temperature];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Weight => "weight",
            Self::Temperature => "temperature",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Units of a linear category with their factor relative to the base
    /// unit. Empty for temperature.
    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Length => LENGTH_FACTORS,
            Self::Weight => WEIGHT_FACTORS,
            Self::Temperature => &[],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Amount of each unit in one metre.
const LENGTH_FACTORS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 0.001),
    ("cm", 100.0),
    ("mm", 1000.0),
    ("in", 39.3701),
    ("ft", 3.28084),
    ("yd", 1.09361),
    ("mi", 0.000621371),
];

/// Amount of each unit in one kilogram.
const WEIGHT_FACTORS: &[(&str, f64)] = &[
    ("kg", 1.0),
    ("g", 1000.0),
    ("mg", 1_000_000.0),
    ("lb", 2.20462),
    ("oz", 35.274),
];

const TEMPERATURE_UNITS: &[&str] = &["C", "F", "K"];

/// Convert `value` from one unit to another within `category`.
///
/// Converting a unit to itself returns `value` untouched without looking
/// at the category. Linear results are rounded to 10 decimals and
/// temperatures to 2, both through a fixed-point rendering of the exact
/// binary result.
pub fn convert(value: f64, from: &str, to: &str, category: &str) -> Result<f64, ConvertError> {
    if from == to {
        return Ok(value);
    }

    let category = Category::from_name(category)
        .ok_or_else(|| ConvertError::InvalidCategory(category.to_string()))?;

    if category == Category::Temperature {
        return convert_temperature(value, from, to);
    }

    let factor = |unit: &str| {
        category
            .factors()
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, factor)| *factor)
    };
    let (Some(from_factor), Some(to_factor)) = (factor(from), factor(to)) else {
        return Err(ConvertError::InvalidUnit(category));
    };

    let base_value = value / from_factor;
    Ok(round_to(base_value * to_factor, 10))
}

/// Convert between Celsius, Fahrenheit and Kelvin.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<f64, ConvertError> {
    let celsius = match from {
        "C" => value,
        "F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        other => return Err(ConvertError::InvalidTemperatureUnit(other.to_string())),
    };

    let result = match to {
        "C" => celsius,
        "F" => celsius * 9.0 / 5.0 + 32.0,
        "K" => celsius + 273.15,
        other => return Err(ConvertError::InvalidTemperatureUnit(other.to_string())),
    };

    Ok(round_to(result, 2))
}

/// Unit abbreviations available in `category`, empty if it is unknown.
pub fn units(category: &str) -> Vec<&'static str> {
    match Category::from_name(category) {
        Some(Category::Temperature) => TEMPERATURE_UNITS.to_vec(),
        Some(category) => category.factors().iter().map(|(name, _)| *name).collect(),
        None => Vec::new(),
    }
}

pub fn categories() -> Vec<&'static str> {
    Category::ALL.iter().map(Category::name).collect()
}

/// Human-readable name of a unit, or the abbreviation itself if unknown.
pub fn unit_name(unit: &str) -> &str {
    match unit {
        "m" => "meter",
        "km" => "kilometer",
        "cm" => "centimeter",
        "mm" => "millimeter",
        "in" => "inch",
        "ft" => "foot",
        "yd" => "yard",
        "mi" => "mile",
        "kg" => "kilogram",
        "g" => "gram",
        "mg" => "milligram",
        "lb" => "pound",
        "oz" => "ounce",
        "C" => "Celsius",
        "F" => "Fahrenheit",
        "K" => "Kelvin",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 0.005
    }

    #[test]
    fn test_length() {
        assert!(close(convert(1000.0, "m", "km", "length").unwrap(), 1.0));
        assert_eq!(convert(1.0, "km", "m", "length"), Ok(1000.0));
        assert_eq!(convert(1.0, "m", "cm", "length"), Ok(100.0));
        assert!(close(convert(1.0, "in", "cm", "length").unwrap(), 2.54));
        assert!(close(convert(1.0, "ft", "m", "length").unwrap(), 0.3048));
    }

    #[test]
    fn test_weight() {
        assert_eq!(convert(1.0, "kg", "g", "weight"), Ok(1000.0));
        assert!(close(convert(1.0, "lb", "kg", "weight").unwrap(), 0.4536));
        assert!(close(convert(1.0, "oz", "g", "weight").unwrap(), 28.35));
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert(0.0, "C", "F", "temperature"), Ok(32.0));
        assert_eq!(convert(100.0, "C", "F", "temperature"), Ok(212.0));
        assert_eq!(convert(32.0, "F", "C", "temperature"), Ok(0.0));
        assert_eq!(convert(212.0, "F", "C", "temperature"), Ok(100.0));
        assert_eq!(convert(0.0, "C", "K", "temperature"), Ok(273.15));
        assert_eq!(convert(273.15, "K", "C", "temperature"), Ok(0.0));
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        assert_eq!(convert(0.045, "C", "K", "temperature"), Ok(273.19));
        assert_eq!(
            convert(6.866, "km", "in", "length"),
            Ok(270315.1065999999)
        );
    }

    #[test]
    fn test_same_unit_skips_validation() {
        assert_eq!(convert(100.0, "m", "m", "length"), Ok(100.0));
        assert_eq!(convert(5.0, "x", "x", "nonsense"), Ok(5.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            convert(100.0, "m", "km", "invalid"),
            Err(ConvertError::InvalidCategory("invalid".to_string()))
        );
        assert_eq!(
            convert(100.0, "invalid", "km", "length"),
            Err(ConvertError::InvalidUnit(Category::Length))
        );
        assert_eq!(
            convert(1.0, "C", "R", "temperature"),
            Err(ConvertError::InvalidTemperatureUnit("R".to_string()))
        );
        assert_eq!(
            ConvertError::InvalidUnit(Category::Weight).to_string(),
            "Invalid unit for category weight"
        );
    }

    #[test]
    fn test_listings() {
        let length = units("length");
        assert!(length.contains(&"m"));
        assert!(length.contains(&"km"));
        assert!(length.contains(&"cm"));
        assert_eq!(units("temperature"), ["C", "F", "K"]);
        assert!(units("volume").is_empty());
        assert_eq!(categories(), ["length", "weight", "temperature"]);
    }

    #[test]
    fn test_unit_names() {
        assert_eq!(unit_name("ft"), "foot");
        assert_eq!(unit_name("K"), "Kelvin");
        assert_eq!(unit_name("parsec"), "parsec");
    }
}
