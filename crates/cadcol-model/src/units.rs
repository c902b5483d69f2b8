// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Length unit conversion
//!
//! The document stores lengths in its internal unit (feet, the host
//! convention). The UI layer works in a user-selected display unit; values
//! crossing into the pipeline are converted to internal units first.

use serde::{Deserialize, Serialize};

/// Millimeters per internal length unit (foot)
pub const MM_PER_FOOT: f64 = 304.8;

/// Convert a length from internal units to millimeters
pub fn to_millimeters(internal: f64) -> f64 {
    internal * MM_PER_FOOT
}

/// Convert a length from millimeters to internal units
pub fn from_millimeters(mm: f64) -> f64 {
    mm / MM_PER_FOOT
}

/// Display units offered by the settings layer
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DisplayUnit {
    Millimeters,
    Centimeters,
    Meters,
    Feet,
    Inches,
}

impl DisplayUnit {
    /// Factor that converts one display unit to internal units
    pub fn factor_to_internal(self) -> f64 {
        match self {
            DisplayUnit::Millimeters => 1.0 / MM_PER_FOOT,
            DisplayUnit::Centimeters => 10.0 / MM_PER_FOOT,
            DisplayUnit::Meters => 1000.0 / MM_PER_FOOT,
            DisplayUnit::Feet => 1.0,
            DisplayUnit::Inches => 1.0 / 12.0,
        }
    }

    /// Short label for display (e.g., "mm")
    pub fn label(self) -> &'static str {
        match self {
            DisplayUnit::Millimeters => "mm",
            DisplayUnit::Centimeters => "cm",
            DisplayUnit::Meters => "m",
            DisplayUnit::Feet => "ft",
            DisplayUnit::Inches => "in",
        }
    }
}

/// Display-unit aware conversion seam
pub trait UnitConverter {
    /// Convert a value from `unit` to internal units
    fn to_internal(&self, value: f64, unit: DisplayUnit) -> f64;

    /// Convert a value from internal units to `unit`
    fn from_internal(&self, value: f64, unit: DisplayUnit) -> f64;

    /// Format a display-unit value with its unit label
    fn format_with_unit(&self, value: f64, unit: DisplayUnit) -> String {
        format!("{value} {}", unit.label())
    }
}

/// Straightforward converter over the [`DisplayUnit`] factors
#[derive(Default)]
pub struct LengthUnitConverter;

impl UnitConverter for LengthUnitConverter {
    fn to_internal(&self, value: f64, unit: DisplayUnit) -> f64 {
        value * unit.factor_to_internal()
    }

    fn from_internal(&self, value: f64, unit: DisplayUnit) -> f64 {
        value / unit.factor_to_internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimeter_round_trip() {
        let internal = from_millimeters(300.0);
        assert!((to_millimeters(internal) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_unit_factors() {
        let converter = LengthUnitConverter;
        assert!((converter.to_internal(304.8, DisplayUnit::Millimeters) - 1.0).abs() < 1e-12);
        assert!((converter.to_internal(1.0, DisplayUnit::Meters) - 1000.0 / 304.8).abs() < 1e-12);
        assert!((converter.to_internal(12.0, DisplayUnit::Inches) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_format_with_unit() {
        let converter = LengthUnitConverter;
        assert_eq!(converter.format_with_unit(100.0, DisplayUnit::Millimeters), "100 mm");
    }
}
