//! Room parts: measured areas added to or cut out of a room.
//!
//! A bay window or a kitchen island adds floor area; a chimney breast or a
//! low sloping-roof zone subtracts it. Parts are rectangles; the parent
//! room sums their signed areas (see [`super::Room::recompute_area`]).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SurveyError, SurveyResult};
use crate::units::{Feet, SqFt};

/// Whether a part adds to or subtracts from the room's area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    #[default]
    Add,
    Subtract,
}

impl PartKind {
    /// Parse "add"/"+" or "subtract"/"-"
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" | "+" | "a" => Ok(PartKind::Add),
            "subtract" | "sub" | "-" | "s" => Ok(PartKind::Subtract),
            _ => Err(SurveyError::invalid_input("part.kind", s, "Expected 'add' or 'subtract'")),
        }
    }

    /// +1.0 for add parts, -1.0 for subtract parts
    pub fn sign(&self) -> f64 {
        match self {
            PartKind::Add => 1.0,
            PartKind::Subtract => -1.0,
        }
    }
}

/// Preset labels for common part situations. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartTemplate {
    #[serde(rename = "sloping-roof-2m")]
    SlopingRoofUnder2m,
    #[serde(rename = "sloping-roof-1m")]
    SlopingRoofUnder1m,
    Kitchen,
}

impl PartTemplate {
    /// All templates for UI selection
    pub const ALL: [PartTemplate; 3] = [
        PartTemplate::SlopingRoofUnder2m,
        PartTemplate::SlopingRoofUnder1m,
        PartTemplate::Kitchen,
    ];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            PartTemplate::SlopingRoofUnder2m => "Sloping roof < 2m",
            PartTemplate::SlopingRoofUnder1m => "Sloping roof < 1m",
            PartTemplate::Kitchen => "Kitchen",
        }
    }
}

/// A rectangular area adjustment belonging to exactly one room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPart {
    pub id: Uuid,
    pub name: String,
    pub kind: PartKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PartTemplate>,
    pub width_ft: f64,
    pub length_ft: f64,
    /// Always `width_ft * length_ft`
    pub area_sqft: f64,
}

impl RoomPart {
    /// Validate a part request and assign it a fresh id.
    ///
    /// The name must be non-blank and both dimensions positive.
    pub fn create(request: NewRoomPart) -> SurveyResult<Self> {
        if request.name.trim().is_empty() {
            return Err(SurveyError::missing_field("part.name"));
        }
        let area = part_area(request.width_ft, request.length_ft)?;
        Ok(RoomPart {
            id: Uuid::new_v4(),
            name: request.name.trim().to_string(),
            kind: request.kind,
            template: request.template,
            width_ft: request.width_ft,
            length_ft: request.length_ft,
            area_sqft: area.value(),
        })
    }

    /// Re-check a part read from disk and rebuild its area from the dimensions.
    pub(crate) fn revalidate(&mut self) -> SurveyResult<()> {
        self.area_sqft = part_area(self.width_ft, self.length_ft)?.value();
        Ok(())
    }

    /// Area contribution to the parent room (negative for subtract parts)
    pub fn signed_area(&self) -> SqFt {
        SqFt(self.area_sqft * self.kind.sign())
    }
}

fn part_area(width_ft: f64, length_ft: f64) -> SurveyResult<SqFt> {
    for (field, value) in [("part.width_ft", width_ft), ("part.length_ft", length_ft)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(SurveyError::invalid_input(
                field,
                value.to_string(),
                "Part dimensions must be greater than zero",
            ));
        }
    }
    Ok(Feet(width_ft) * Feet(length_ft))
}

/// Request to add a part to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NewRoomPart {
    pub name: String,
    pub kind: PartKind,
    pub template: Option<PartTemplate>,
    pub width_ft: f64,
    pub length_ft: f64,
}

impl NewRoomPart {
    /// An area-adding part
    pub fn add(name: impl Into<String>, width_ft: f64, length_ft: f64) -> Self {
        NewRoomPart {
            name: name.into(),
            kind: PartKind::Add,
            template: None,
            width_ft,
            length_ft,
        }
    }

    /// An area-subtracting part
    pub fn subtract(name: impl Into<String>, width_ft: f64, length_ft: f64) -> Self {
        NewRoomPart {
            kind: PartKind::Subtract,
            ..NewRoomPart::add(name, width_ft, length_ft)
        }
    }

    /// Attach a template label
    pub fn with_template(mut self, template: PartTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_computes_area() {
        let part = RoomPart::create(NewRoomPart::add("Bay window", 1.5, 2.0)).unwrap();
        assert_eq!(part.area_sqft, 3.0);
        assert_eq!(part.signed_area(), SqFt(3.0));
    }

    #[test]
    fn test_subtract_part_has_negative_contribution() {
        let part = RoomPart::create(NewRoomPart::subtract("Chimney", 1.0, 2.0)).unwrap();
        assert_eq!(part.signed_area(), SqFt(-2.0));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = RoomPart::create(NewRoomPart::add("   ", 1.0, 1.0)).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
    }

    #[test]
    fn test_zero_or_negative_dimensions_rejected() {
        assert!(RoomPart::create(NewRoomPart::add("Nook", 0.0, 1.0)).is_err());
        assert!(RoomPart::create(NewRoomPart::add("Nook", 1.0, -2.0)).is_err());
        assert!(RoomPart::create(NewRoomPart::add("Nook", f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_template_serialized_ids() {
        let json = serde_json::to_string(&PartTemplate::SlopingRoofUnder2m).unwrap();
        assert_eq!(json, "\"sloping-roof-2m\"");
        let json = serde_json::to_string(&PartTemplate::Kitchen).unwrap();
        assert_eq!(json, "\"kitchen\"");
    }

    #[test]
    fn test_part_kind_parse() {
        assert_eq!(PartKind::from_str_flexible("-").unwrap(), PartKind::Subtract);
        assert_eq!(PartKind::from_str_flexible("Add").unwrap(), PartKind::Add);
        assert!(PartKind::from_str_flexible("multiply").is_err());
    }
}
