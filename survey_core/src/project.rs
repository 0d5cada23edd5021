//! # Survey Data Structures
//!
//! [`SurveyData`] is the root container for everything a user enters
//! during one wizard session. The wizard owns it exclusively and hands out
//! a read-only view; see [`crate::wizard::Wizard`].
//!
//! ## Structure
//!
//! ```text
//! SurveyData
//! ├── meta: SurveyMetadata (schema version, timestamps)
//! ├── project: Project (name, owner, address, property type)
//! ├── rooms: RoomList (ordered, with parts)
//! ├── interior: InteriorChoices
//! ├── creator: CreatorInfo
//! └── customer: CustomerInfo (+ include_customer flag)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use survey_core::project::SurveyData;
//!
//! let survey = SurveyData::new();
//! assert!(survey.rooms.is_empty());
//!
//! // Serialize to JSON for a snapshot (see file_io for atomic saves)
//! let json = serde_json::to_string_pretty(&survey).unwrap();
//! assert!(json.contains("\"version\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contacts::{CreatorInfo, CustomerInfo};
use crate::errors::{SurveyError, SurveyResult};
use crate::interior::InteriorChoices;
use crate::rooms::RoomList;

/// Current schema version for survey snapshots
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Kind of property being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
}

impl PropertyType {
    /// Parse "apartment" / "house" (case-insensitive)
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "apartment" | "apt" | "flat" => Ok(PropertyType::Apartment),
            "house" | "home" => Ok(PropertyType::House),
            _ => Err(SurveyError::invalid_input("property_type", s, "Expected 'apartment' or 'house'")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Top-level description of the property and who owns it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub owner: String,
    pub address: String,
    pub property_type: Option<PropertyType>,
}

impl Project {
    /// Create a filled-in project
    ///
    /// # Example
    ///
    /// ```rust
    /// use survey_core::project::{Project, PropertyType};
    ///
    /// let project = Project::new("Test", "Jane Doe", "1 Main St", PropertyType::House);
    /// assert_eq!(project.owner, "Jane Doe");
    /// ```
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        address: impl Into<String>,
        property_type: PropertyType,
    ) -> Self {
        Project {
            name: name.into(),
            owner: owner.into(),
            address: address.into(),
            property_type: Some(property_type),
        }
    }

    pub(crate) fn apply(&mut self, edit: ProjectEdit) {
        match edit {
            ProjectEdit::Name(v) => self.name = v,
            ProjectEdit::Owner(v) => self.owner = v,
            ProjectEdit::Address(v) => self.address = v,
            ProjectEdit::PropertyType(v) => self.property_type = v,
        }
    }
}

/// A single-field change to [`Project`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectEdit {
    Name(String),
    Owner(String),
    Address(String),
    PropertyType(Option<PropertyType>),
}

impl ProjectEdit {
    /// The validation field this edit touches
    pub fn field(&self) -> &'static str {
        match self {
            ProjectEdit::Name(_) => "name",
            ProjectEdit::Owner(_) => "owner",
            ProjectEdit::Address(_) => "address",
            ProjectEdit::PropertyType(_) => "property_type",
        }
    }
}

/// Snapshot header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the survey was started
    pub created: DateTime<Utc>,

    /// When the survey was last changed
    pub modified: DateTime<Utc>,
}

/// Root container for one wizard session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyData {
    pub meta: SurveyMetadata,
    pub project: Project,
    pub rooms: RoomList,
    pub interior: InteriorChoices,
    pub creator: CreatorInfo,
    pub customer: CustomerInfo,
    /// Whether the customer step's details belong on the survey
    #[serde(default)]
    pub include_customer: bool,
}

impl SurveyData {
    /// Create an empty survey
    pub fn new() -> Self {
        let now = Utc::now();
        SurveyData {
            meta: SurveyMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            project: Project::default(),
            rooms: RoomList::new(),
            interior: InteriorChoices::default(),
            creator: CreatorInfo::default(),
            customer: CustomerInfo::default(),
            include_customer: false,
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for SurveyData {
    fn default() -> Self {
        SurveyData::new()
    }
}
