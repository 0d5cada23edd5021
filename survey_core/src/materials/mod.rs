//! # Materials and Price Tables
//!
//! Selectable finishes and their unit prices.
//!
//! ## Material Types
//!
//! - **Flooring**: priced per square foot of floor area
//! - **Walls**: priced per square foot, weighted by [`crate::pricing::WALL_COST_FACTOR`]
//! - **Furniture packages**: priced per square foot of total measured area
//!
//! Prices live in [`PriceTable`]s. A table is an explicit list of
//! `(key, price)` entries plus a mandatory default. Selectable options
//! without an entry, and unselected options, price at the default. A
//! partially filled room therefore still produces a number.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::materials::{FlooringMaterial, FLOORING_PRICES};
//!
//! assert_eq!(FLOORING_PRICES.price(Some(FlooringMaterial::Hardwood)), 8.5);
//! assert_eq!(FLOORING_PRICES.price(None), 5.0);
//! ```

pub mod finishes;
pub mod packages;

pub use finishes::{FlooringMaterial, WallMaterial, FLOORING_PRICES, WALL_PRICES};
pub use packages::{FurniturePackage, WallColor, PACKAGE_PRICES};

/// Unit price lookup keyed by an enumerated option.
///
/// `K` is one of the option enums in this module. Lookups never fail:
/// keys without an entry fall back to `default`.
#[derive(Debug, Clone, Copy)]
pub struct PriceTable<K: 'static> {
    entries: &'static [(K, f64)],
    default: f64,
}

impl<K: Copy + PartialEq + 'static> PriceTable<K> {
    /// Build a table from static entries and the fallback price
    pub const fn new(entries: &'static [(K, f64)], default: f64) -> Self {
        PriceTable { entries, default }
    }

    /// The explicit entry for `key`, if the table has one
    pub fn entry(&self, key: K) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, price)| *price)
    }

    /// Price per square foot for a possibly unselected option
    pub fn price(&self, key: Option<K>) -> f64 {
        key.and_then(|k| self.entry(k)).unwrap_or(self.default)
    }

    /// The fallback price
    pub fn default_price(&self) -> f64 {
        self.default
    }

    /// All explicit entries, in table order
    pub fn entries(&self) -> &'static [(K, f64)] {
        self.entries
    }
}

/// Format a price-per-square-foot label, e.g. `"Hardwood ($8.50/sq ft)"`.
pub fn price_label(name: &str, price: f64) -> String {
    format!("{} (${:.2}/sq ft)", name, price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Grade {
        Low,
        High,
        Unpriced,
    }

    const TABLE: PriceTable<Grade> = PriceTable::new(&[(Grade::Low, 1.0), (Grade::High, 2.5)], 9.0);

    #[test]
    fn test_explicit_entries() {
        assert_eq!(TABLE.price(Some(Grade::Low)), 1.0);
        assert_eq!(TABLE.price(Some(Grade::High)), 2.5);
        assert_eq!(TABLE.entry(Grade::High), Some(2.5));
    }

    #[test]
    fn test_missing_entry_falls_back_to_default() {
        assert_eq!(TABLE.entry(Grade::Unpriced), None);
        assert_eq!(TABLE.price(Some(Grade::Unpriced)), 9.0);
    }

    #[test]
    fn test_unselected_falls_back_to_default() {
        assert_eq!(TABLE.price(None), 9.0);
        assert_eq!(TABLE.default_price(), 9.0);
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label("Marble", 12.0), "Marble ($12.00/sq ft)");
    }
}
