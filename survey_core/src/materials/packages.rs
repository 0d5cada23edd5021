//! Interior design options: furniture packages and the wall colour palette.

use serde::{Deserialize, Serialize};

use super::PriceTable;
use crate::errors::{SurveyError, SurveyResult};

/// Furniture package price per square foot of measured area.
/// No package selected means no interior cost.
pub const PACKAGE_PRICES: PriceTable<FurniturePackage> = PriceTable::new(
    &[
        (FurniturePackage::Basic, 15.0),
        (FurniturePackage::Premium, 25.0),
        (FurniturePackage::Luxury, 40.0),
    ],
    0.0,
);

/// Furniture and finishing package tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurniturePackage {
    Basic,
    Premium,
    Luxury,
}

impl FurniturePackage {
    /// All packages for UI selection
    pub const ALL: [FurniturePackage; 3] = [
        FurniturePackage::Basic,
        FurniturePackage::Premium,
        FurniturePackage::Luxury,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().trim_end_matches(" package") {
            "basic" => Ok(FurniturePackage::Basic),
            "premium" => Ok(FurniturePackage::Premium),
            "luxury" => Ok(FurniturePackage::Luxury),
            _ => Err(SurveyError::invalid_input("furniture_package", s, "Unknown furniture package")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FurniturePackage::Basic => "Basic Package",
            FurniturePackage::Premium => "Premium Package",
            FurniturePackage::Luxury => "Luxury Package",
        }
    }

    /// One-line description shown next to the package
    pub fn description(&self) -> &'static str {
        match self {
            FurniturePackage::Basic => "Essential furnishing with quality basics",
            FurniturePackage::Premium => "Upgraded materials and designer touches",
            FurniturePackage::Luxury => "High-end materials and bespoke design",
        }
    }

    /// What the package includes
    pub fn features(&self) -> &'static [&'static str] {
        match self {
            FurniturePackage::Basic => &["Standard furniture", "Basic lighting", "Simple decor"],
            FurniturePackage::Premium => &[
                "Designer furniture",
                "Enhanced lighting",
                "Quality decor",
                "Custom accents",
            ],
            FurniturePackage::Luxury => &[
                "Luxury furniture",
                "Smart lighting",
                "Premium decor",
                "Bespoke elements",
                "Artwork included",
            ],
        }
    }

    /// Price per square foot
    pub fn price_per_sqft(&self) -> f64 {
        PACKAGE_PRICES.price(Some(*self))
    }
}

impl std::fmt::Display for FurniturePackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wall colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallColor {
    PureWhite,
    WarmCream,
    SoftGray,
    LightBlue,
    SageGreen,
    BlushPink,
    Lavender,
    Peach,
}

impl WallColor {
    /// All colours in palette order
    pub const ALL: [WallColor; 8] = [
        WallColor::PureWhite,
        WallColor::WarmCream,
        WallColor::SoftGray,
        WallColor::LightBlue,
        WallColor::SageGreen,
        WallColor::BlushPink,
        WallColor::Lavender,
        WallColor::Peach,
    ];

    /// CSS hex token
    pub fn hex(&self) -> &'static str {
        match self {
            WallColor::PureWhite => "#ffffff",
            WallColor::WarmCream => "#f9f7f4",
            WallColor::SoftGray => "#f5f5f5",
            WallColor::LightBlue => "#e8f4f8",
            WallColor::SageGreen => "#e8f2e8",
            WallColor::BlushPink => "#fdf2f2",
            WallColor::Lavender => "#f3f2ff",
            WallColor::Peach => "#fff4e8",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            WallColor::PureWhite => "Pure White",
            WallColor::WarmCream => "Warm Cream",
            WallColor::SoftGray => "Soft Gray",
            WallColor::LightBlue => "Light Blue",
            WallColor::SageGreen => "Sage Green",
            WallColor::BlushPink => "Blush Pink",
            WallColor::Lavender => "Lavender",
            WallColor::Peach => "Peach",
        }
    }

    /// Parse from a display name or a hex token
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        let needle = s.trim().to_lowercase();
        WallColor::ALL
            .into_iter()
            .find(|c| c.display_name().to_lowercase() == needle || c.hex() == needle)
            .ok_or_else(|| SurveyError::invalid_input("wall_color", s, "Unknown wall colour"))
    }
}

impl std::fmt::Display for WallColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
