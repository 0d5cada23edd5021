//! Interior design choices.

use serde::{Deserialize, Serialize};

use crate::errors::{SurveyError, SurveyResult};
use crate::materials::{FurniturePackage, WallColor};

/// Highest lighting level (percent)
pub const MAX_LIGHTING_PERCENT: u8 = 100;

/// Lighting level for a fresh survey (percent)
pub const DEFAULT_LIGHTING_PERCENT: u8 = 50;

/// User-selected finish package, colour and lighting level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteriorChoices {
    pub furniture_package: Option<FurniturePackage>,
    pub wall_color: Option<WallColor>,
    /// 0..=100
    pub lighting_ambiance_percent: u8,
}

impl Default for InteriorChoices {
    fn default() -> Self {
        InteriorChoices {
            furniture_package: None,
            wall_color: None,
            lighting_ambiance_percent: DEFAULT_LIGHTING_PERCENT,
        }
    }
}

impl InteriorChoices {
    pub(crate) fn apply(&mut self, edit: InteriorEdit) {
        match edit {
            InteriorEdit::FurniturePackage(package) => self.furniture_package = package,
            InteriorEdit::WallColor(color) => self.wall_color = color,
            InteriorEdit::LightingAmbiance(percent) => {
                self.lighting_ambiance_percent = percent.min(MAX_LIGHTING_PERCENT);
            }
        }
    }

    /// Reject a lighting level above 100, as can appear in a hand-edited snapshot
    pub fn validate(&self) -> SurveyResult<()> {
        if self.lighting_ambiance_percent > MAX_LIGHTING_PERCENT {
            return Err(SurveyError::invalid_input(
                "lighting_ambiance_percent",
                self.lighting_ambiance_percent.to_string(),
                format!("Lighting must be between 0 and {MAX_LIGHTING_PERCENT}"),
            ));
        }
        Ok(())
    }
}

/// A single change to the interior choices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InteriorEdit {
    FurniturePackage(Option<FurniturePackage>),
    WallColor(Option<WallColor>),
    /// Values above 100 are clamped
    LightingAmbiance(u8),
}
