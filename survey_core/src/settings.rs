//! Application preferences.
//!
//! Display-only: pricing and step validation never read these. Every field
//! is `#[serde(default)]` so an older or partial settings file still loads.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{SurveyError, SurveyResult};
use crate::file_io;
use crate::units::{Feet, Meters, SqFt, SqMeters};

/// Largest accepted decimal precision
pub const MAX_DECIMAL_PRECISION: u8 = 4;

/// Measurement system used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Feet and square feet
    #[default]
    Imperial,
    /// Meters and square meters
    Metric,
}

impl UnitSystem {
    pub const ALL: [UnitSystem; 2] = [UnitSystem::Imperial, UnitSystem::Metric];

    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "ft" | "feet" => Ok(UnitSystem::Imperial),
            "metric" | "m" | "meters" | "metres" => Ok(UnitSystem::Metric),
            _ => Err(SurveyError::invalid_input("units", s, "Expected 'imperial' or 'metric'")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "Imperial (ft, in)",
            UnitSystem::Metric => "Metric (m, cm)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    /// Follow the system setting
    Auto,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Auto];

    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" | "system" => Ok(Theme::Auto),
            _ => Err(SurveyError::invalid_input("theme", s, "Expected 'light', 'dark' or 'auto'")),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light Theme",
            Theme::Dark => "Dark Theme",
            Theme::Auto => "System Default",
        }
    }
}

/// Interface language. Only English is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
        }
    }
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_true")]
    pub auto_save: bool,

    #[serde(default)]
    pub units: UnitSystem,

    /// Decimal places for displayed measurements, 0..=4
    #[serde(default = "default_precision")]
    pub decimal_precision: u8,

    #[serde(default = "default_true")]
    pub notifications: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub language: Language,
}

fn default_true() -> bool {
    true
}

fn default_precision() -> u8 {
    2
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            units: UnitSystem::default(),
            decimal_precision: default_precision(),
            notifications: true,
            theme: Theme::default(),
            language: Language::default(),
        }
    }
}

fn check_precision(precision: u8) -> SurveyResult<u8> {
    if precision > MAX_DECIMAL_PRECISION {
        return Err(SurveyError::invalid_input(
            "decimal_precision",
            precision.to_string(),
            format!("Precision must be between 0 and {MAX_DECIMAL_PRECISION}"),
        ));
    }
    Ok(precision)
}

/// A single change to [`AppSettings`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingsEdit {
    AutoSave(bool),
    Units(UnitSystem),
    DecimalPrecision(u8),
    Notifications(bool),
    Theme(Theme),
    Language(Language),
}

impl AppSettings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> SurveyResult<Self> {
        if path.exists() {
            file_io::load_settings(path)
        } else {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(AppSettings::default())
        }
    }

    /// Apply one change. Out-of-range precision leaves the settings unchanged.
    pub fn apply(&mut self, edit: SettingsEdit) -> SurveyResult<()> {
        match edit {
            SettingsEdit::AutoSave(v) => self.auto_save = v,
            SettingsEdit::Units(v) => self.units = v,
            SettingsEdit::DecimalPrecision(v) => self.decimal_precision = check_precision(v)?,
            SettingsEdit::Notifications(v) => self.notifications = v,
            SettingsEdit::Theme(v) => self.theme = v,
            SettingsEdit::Language(v) => self.language = v,
        }
        Ok(())
    }

    /// Range checks for values that did not come through [`AppSettings::apply`]
    pub fn validate(&self) -> SurveyResult<()> {
        check_precision(self.decimal_precision)?;
        Ok(())
    }

    /// Preview lines shown when units, precision or auto-save differ from
    /// the defaults. Empty when they all match.
    pub fn changes_from_default(&self) -> Vec<String> {
        let defaults = AppSettings::default();
        if self.units == defaults.units
            && self.decimal_precision == defaults.decimal_precision
            && self.auto_save == defaults.auto_save
        {
            return Vec::new();
        }

        let units = match self.units {
            UnitSystem::Imperial => "feet and inches",
            UnitSystem::Metric => "meters and centimeters",
        };
        let plural = if self.decimal_precision == 1 { "" } else { "s" };
        let auto_save = if self.auto_save { "enabled" } else { "disabled" };

        vec![
            format!("Measurements will be displayed in {units}"),
            format!("Decimal precision set to {} place{plural}", self.decimal_precision),
            format!("Auto-save is {auto_save}"),
        ]
    }

    /// Render a length given in feet
    pub fn format_length(&self, length_ft: f64) -> String {
        let precision = usize::from(self.decimal_precision);
        match self.units {
            UnitSystem::Imperial => format!("{:.*} ft", precision, length_ft),
            UnitSystem::Metric => format!("{:.*} m", precision, Meters::from(Feet(length_ft)).value()),
        }
    }

    /// Render an area given in square feet
    pub fn format_area(&self, area_sqft: f64) -> String {
        let precision = usize::from(self.decimal_precision);
        match self.units {
            UnitSystem::Imperial => format!("{:.*} sq ft", precision, area_sqft),
            UnitSystem::Metric => format!("{:.*} m²", precision, SqMeters::from(SqFt(area_sqft)).value()),
        }
    }
}
