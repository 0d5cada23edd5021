//! # Unit Types
//!
//! Type-safe wrappers for measurement units. Rooms are measured and priced
//! in US customary units (feet, square feet); metric wrappers exist so the
//! display layer can show the same values in meters when the user asks for it.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::units::{Feet, Meters, SqFt, SqMeters};
//!
//! let width = Feet(10.0);
//! let meters: Meters = width.into();
//! assert!((meters.0 - 3.048).abs() < 1e-9);
//!
//! let area = SqFt(100.0);
//! let sqm: SqMeters = area.into();
//! assert!((sqm.0 - 9.290304).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Meters per foot (exact by definition)
pub const METERS_PER_FOOT: f64 = 0.3048;

/// Square meters per square foot
pub const SQ_METERS_PER_SQ_FOOT: f64 = METERS_PER_FOOT * METERS_PER_FOOT;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Feet> for Meters {
    fn from(ft: Feet) -> Self {
        Meters(ft.0 * METERS_PER_FOOT)
    }
}

impl From<Meters> for Feet {
    fn from(m: Meters) -> Self {
        Feet(m.0 / METERS_PER_FOOT)
    }
}

impl Mul for Feet {
    type Output = SqFt;
    fn mul(self, rhs: Self) -> SqFt {
        SqFt(self.0 * rhs.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

impl From<SqFt> for SqMeters {
    fn from(sqft: SqFt) -> Self {
        SqMeters(sqft.0 * SQ_METERS_PER_SQ_FOOT)
    }
}

impl From<SqMeters> for SqFt {
    fn from(sqm: SqMeters) -> Self {
        SqFt(sqm.0 / SQ_METERS_PER_SQ_FOOT)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Meters);
impl_arithmetic!(SqFt);
impl_arithmetic!(SqMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_meters_and_back() {
        let ft = Feet(10.0);
        let m: Meters = ft.into();
        assert!((m.0 - 3.048).abs() < 1e-12);

        let back: Feet = m.into();
        assert!((back.0 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_feet_product_is_area() {
        let area = Feet(10.0) * Feet(12.0);
        assert_eq!(area, SqFt(120.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = SqFt(20.0);
        let b = SqFt(3.0);
        assert_eq!((a + b).0, 23.0);
        assert_eq!((a - b).0, 17.0);
        assert_eq!((a * 2.0).0, 40.0);
        assert_eq!((a / 2.0).0, 10.0);
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Feet = serde_json::from_str(&json).unwrap();
        assert_eq!(ft, roundtrip);
    }
}
