//! Floor and wall finishes.
//!
//! Option codes serialize in kebab-case (`"wood-paneling"`), matching the
//! codes accepted by [`FlooringMaterial::from_str_flexible`] and
//! [`WallMaterial::from_str_flexible`].

use serde::{Deserialize, Serialize};

use super::PriceTable;
use crate::errors::{SurveyError, SurveyResult};

/// Flooring price per square foot. Concrete has no entry and prices at the default.
pub const FLOORING_PRICES: PriceTable<FlooringMaterial> = PriceTable::new(
    &[
        (FlooringMaterial::Hardwood, 8.5),
        (FlooringMaterial::Tile, 6.2),
        (FlooringMaterial::Carpet, 4.8),
        (FlooringMaterial::Vinyl, 3.5),
        (FlooringMaterial::Marble, 12.0),
        (FlooringMaterial::Laminate, 5.5),
    ],
    5.0,
);

/// Wall finish price per square foot. Concrete and plaster price at the default.
pub const WALL_PRICES: PriceTable<WallMaterial> = PriceTable::new(
    &[
        (WallMaterial::Drywall, 2.0),
        (WallMaterial::Brick, 4.5),
        (WallMaterial::WoodPaneling, 6.0),
        (WallMaterial::Stone, 8.0),
        (WallMaterial::Tile, 5.5),
    ],
    3.0,
);

/// Flooring options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlooringMaterial {
    Hardwood,
    Tile,
    Carpet,
    Vinyl,
    Marble,
    Laminate,
    Concrete,
}

impl FlooringMaterial {
    /// All flooring variants for UI selection
    pub const ALL: [FlooringMaterial; 7] = [
        FlooringMaterial::Hardwood,
        FlooringMaterial::Tile,
        FlooringMaterial::Carpet,
        FlooringMaterial::Vinyl,
        FlooringMaterial::Marble,
        FlooringMaterial::Laminate,
        FlooringMaterial::Concrete,
    ];

    /// Short code used in serialized data
    pub fn code(&self) -> &'static str {
        match self {
            FlooringMaterial::Hardwood => "hardwood",
            FlooringMaterial::Tile => "tile",
            FlooringMaterial::Carpet => "carpet",
            FlooringMaterial::Vinyl => "vinyl",
            FlooringMaterial::Marble => "marble",
            FlooringMaterial::Laminate => "laminate",
            FlooringMaterial::Concrete => "concrete",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "hardwood" | "wood" => Ok(FlooringMaterial::Hardwood),
            "tile" | "tiles" => Ok(FlooringMaterial::Tile),
            "carpet" => Ok(FlooringMaterial::Carpet),
            "vinyl" => Ok(FlooringMaterial::Vinyl),
            "marble" => Ok(FlooringMaterial::Marble),
            "laminate" => Ok(FlooringMaterial::Laminate),
            "concrete" => Ok(FlooringMaterial::Concrete),
            _ => Err(SurveyError::invalid_input("flooring", s, "Unknown flooring material")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FlooringMaterial::Hardwood => "Hardwood",
            FlooringMaterial::Tile => "Tile",
            FlooringMaterial::Carpet => "Carpet",
            FlooringMaterial::Vinyl => "Vinyl",
            FlooringMaterial::Marble => "Marble",
            FlooringMaterial::Laminate => "Laminate",
            FlooringMaterial::Concrete => "Concrete",
        }
    }

    /// Price per square foot, falling back to the table default
    pub fn price_per_sqft(&self) -> f64 {
        FLOORING_PRICES.price(Some(*self))
    }
}

impl std::fmt::Display for FlooringMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wall finish options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallMaterial {
    Drywall,
    Brick,
    WoodPaneling,
    Stone,
    Tile,
    Concrete,
    Plaster,
}

impl WallMaterial {
    /// All wall variants for UI selection
    pub const ALL: [WallMaterial; 7] = [
        WallMaterial::Drywall,
        WallMaterial::Brick,
        WallMaterial::WoodPaneling,
        WallMaterial::Stone,
        WallMaterial::Tile,
        WallMaterial::Concrete,
        WallMaterial::Plaster,
    ];

    /// Short code used in serialized data
    pub fn code(&self) -> &'static str {
        match self {
            WallMaterial::Drywall => "drywall",
            WallMaterial::Brick => "brick",
            WallMaterial::WoodPaneling => "wood-paneling",
            WallMaterial::Stone => "stone",
            WallMaterial::Tile => "tile",
            WallMaterial::Concrete => "concrete",
            WallMaterial::Plaster => "plaster",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "drywall" | "dry-wall" => Ok(WallMaterial::Drywall),
            "brick" => Ok(WallMaterial::Brick),
            "wood-paneling" | "wood" | "paneling" => Ok(WallMaterial::WoodPaneling),
            "stone" => Ok(WallMaterial::Stone),
            "tile" | "tiles" => Ok(WallMaterial::Tile),
            "concrete" => Ok(WallMaterial::Concrete),
            "plaster" => Ok(WallMaterial::Plaster),
            _ => Err(SurveyError::invalid_input("walls", s, "Unknown wall material")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WallMaterial::Drywall => "Drywall",
            WallMaterial::Brick => "Brick",
            WallMaterial::WoodPaneling => "Wood Paneling",
            WallMaterial::Stone => "Stone",
            WallMaterial::Tile => "Tile",
            WallMaterial::Concrete => "Concrete",
            WallMaterial::Plaster => "Plaster",
        }
    }

    /// Price per square foot, falling back to the table default
    pub fn price_per_sqft(&self) -> f64 {
        WALL_PRICES.price(Some(*self))
    }
}

impl std::fmt::Display for WallMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flooring_prices() {
        assert_eq!(FlooringMaterial::Hardwood.price_per_sqft(), 8.5);
        assert_eq!(FlooringMaterial::Tile.price_per_sqft(), 6.2);
        assert_eq!(FlooringMaterial::Marble.price_per_sqft(), 12.0);
    }

    #[test]
    fn test_unpriced_options_use_default() {
        assert_eq!(FlooringMaterial::Concrete.price_per_sqft(), 5.0);
        assert_eq!(WallMaterial::Concrete.price_per_sqft(), 3.0);
        assert_eq!(WallMaterial::Plaster.price_per_sqft(), 3.0);
    }

    #[test]
    fn test_wall_prices() {
        assert_eq!(WallMaterial::Drywall.price_per_sqft(), 2.0);
        assert_eq!(WallMaterial::WoodPaneling.price_per_sqft(), 6.0);
        assert_eq!(WallMaterial::Stone.price_per_sqft(), 8.0);
    }

    #[test]
    fn test_parse_flexible() {
        assert_eq!(FlooringMaterial::from_str_flexible(" Hardwood ").unwrap(), FlooringMaterial::Hardwood);
        assert_eq!(WallMaterial::from_str_flexible("Wood Paneling").unwrap(), WallMaterial::WoodPaneling);
        assert_eq!(WallMaterial::from_str_flexible("wood_paneling").unwrap(), WallMaterial::WoodPaneling);
        assert!(FlooringMaterial::from_str_flexible("granite").is_err());
        assert!(WallMaterial::from_str_flexible("").is_err());
    }

    #[test]
    fn test_serialization_uses_codes() {
        for wall in WallMaterial::ALL {
            let json = serde_json::to_string(&wall).unwrap();
            assert_eq!(json, format!("\"{}\"", wall.code()));
        }
        for floor in FlooringMaterial::ALL {
            let json = serde_json::to_string(&floor).unwrap();
            assert_eq!(json, format!("\"{}\"", floor.code()));
        }
    }
}
