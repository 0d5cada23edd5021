//! # Step Validation
//!
//! Required-field predicates for each wizard step. A predicate inspects the
//! survey and returns every problem it finds as a [`FieldError`]; an empty
//! list means the step may be left.
//!
//! Field keys match the edit messages that clear them: project fields use
//! `name`, `owner`, `address`, `property_type`; room fields are indexed by
//! list position, e.g. `rooms[0].width`.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::project::SurveyData;
//! use survey_core::validation::validate_step;
//! use survey_core::wizard::Step;
//!
//! let survey = SurveyData::new();
//! let errors = validate_step(Step::ProjectInfo, &survey);
//! assert_eq!(errors.len(), 4);
//! assert_eq!(errors[0].message, "Project name is required");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::contacts::{CreatorInfo, CustomerInfo};
use crate::project::{Project, SurveyData};
use crate::rooms::{Room, RoomList};
use crate::wizard::Step;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is a valid regex"));

/// One problem with one input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field key for one property of the room at `index` (0-based)
pub fn room_field(index: usize, field: &str) -> String {
    format!("rooms[{index}].{field}")
}

/// Whether a string has the `something@something.something` shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Run the predicate for `step` against `survey`.
///
/// Steps without required fields always pass.
pub fn validate_step(step: Step, survey: &SurveyData) -> Vec<FieldError> {
    match step {
        Step::ProjectInfo => validate_project_info(&survey.project),
        Step::RoomData => validate_rooms(&survey.rooms),
        Step::PropertyData => validate_property_data(&survey.project),
        Step::CreatorData => validate_creator(&survey.creator),
        Step::CustomerData => validate_customer(&survey.customer, survey.include_customer),
        Step::InteriorDesign | Step::PricingSummary | Step::Certificate | Step::Settings => {
            Vec::new()
        }
    }
}

/// Project name, owner, address and type
pub fn validate_project_info(project: &Project) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if is_blank(&project.name) {
        errors.push(FieldError::new("name", "Project name is required"));
    }
    if is_blank(&project.owner) {
        errors.push(FieldError::new("owner", "Owner name is required"));
    }
    if is_blank(&project.address) {
        errors.push(FieldError::new("address", "Address is required"));
    }
    if project.property_type.is_none() {
        errors.push(FieldError::new("property_type", "Project type is required"));
    }
    errors
}

/// Property step re-checks the name, address and type under its own wording
pub fn validate_property_data(project: &Project) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if is_blank(&project.name) {
        errors.push(FieldError::new("name", "Project name is required"));
    }
    if is_blank(&project.address) {
        errors.push(FieldError::new("address", "Property address is required"));
    }
    if project.property_type.is_none() {
        errors.push(FieldError::new("property_type", "Property type is required"));
    }
    errors
}

/// At least one room, each one complete
pub fn validate_rooms(rooms: &RoomList) -> Vec<FieldError> {
    if rooms.is_empty() {
        return vec![FieldError::new("rooms", "At least one room is required")];
    }
    rooms
        .iter()
        .enumerate()
        .flat_map(|(index, room)| validate_room(index, room))
        .collect()
}

fn validate_room(index: usize, room: &Room) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let label = room.label();
    if is_blank(&room.name) {
        errors.push(FieldError::new(room_field(index, "name"), format!("{label}: Room name is required")));
    }
    if room.room_type.is_none() {
        errors.push(FieldError::new(
            room_field(index, "room_type"),
            format!("{label}: Room type is required"),
        ));
    }
    if room.width_ft <= 0.0 {
        errors.push(FieldError::new(
            room_field(index, "width"),
            format!("{label}: Width must be greater than zero"),
        ));
    }
    if room.length_ft <= 0.0 {
        errors.push(FieldError::new(
            room_field(index, "length"),
            format!("{label}: Length must be greater than zero"),
        ));
    }
    if room.flooring.is_none() {
        errors.push(FieldError::new(
            room_field(index, "flooring"),
            format!("{label}: Flooring material is required"),
        ));
    }
    if room.walls.is_none() {
        errors.push(FieldError::new(
            room_field(index, "walls"),
            format!("{label}: Wall material is required"),
        ));
    }
    errors
}

pub fn validate_creator(creator: &CreatorInfo) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if is_blank(&creator.name) {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if is_blank(&creator.email) {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(&creator.email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    errors
}

/// Skipped entirely unless the customer is included on the survey
pub fn validate_customer(customer: &CustomerInfo, included: bool) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !included {
        return errors;
    }
    if is_blank(&customer.name) {
        errors.push(FieldError::new("name", "Customer name is required"));
    }
    if !is_blank(&customer.email) && !is_valid_email(&customer.email) {
        errors.push(FieldError::new("email", "Please enter a valid email address"));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{FlooringMaterial, WallMaterial};
    use crate::project::PropertyType;
    use crate::rooms::{RoomEdit, RoomType};
    use pretty_assertions::assert_eq;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    fn complete_room(rooms: &mut RoomList) {
        let id = rooms.add();
        rooms.update(id, RoomEdit::Name("Lounge".into())).unwrap();
        rooms.update(id, RoomEdit::RoomType(Some(RoomType::LivingRoom))).unwrap();
        rooms.update(id, RoomEdit::Width(10.0)).unwrap();
        rooms.update(id, RoomEdit::Length(12.0)).unwrap();
        rooms.update(id, RoomEdit::Flooring(Some(FlooringMaterial::Hardwood))).unwrap();
        rooms.update(id, RoomEdit::Walls(Some(WallMaterial::Drywall))).unwrap();
    }

    #[test]
    fn test_project_info_blank() {
        let errors = validate_project_info(&Project::default());
        assert_eq!(fields(&errors), vec!["name", "owner", "address", "property_type"]);
        assert!(errors.iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn test_project_info_whitespace_is_blank() {
        let mut project = Project::new("   ", "Jane Doe", "1 Main St", PropertyType::House);
        assert_eq!(fields(&validate_project_info(&project)), vec!["name"]);

        project.name = "Test".into();
        assert!(validate_project_info(&project).is_empty());
    }

    #[test]
    fn test_property_data_messages() {
        let errors = validate_property_data(&Project::default());
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Project name is required",
                "Property address is required",
                "Property type is required",
            ]
        );
    }

    #[test]
    fn test_rooms_required() {
        let errors = validate_rooms(&RoomList::new());
        assert_eq!(errors, vec![FieldError::new("rooms", "At least one room is required")]);
    }

    #[test]
    fn test_blank_room_reports_every_field() {
        let mut rooms = RoomList::new();
        complete_room(&mut rooms);
        rooms.add();

        let errors = validate_rooms(&rooms);
        assert_eq!(
            fields(&errors),
            vec![
                "rooms[1].name",
                "rooms[1].room_type",
                "rooms[1].width",
                "rooms[1].length",
                "rooms[1].flooring",
                "rooms[1].walls",
            ]
        );
        assert_eq!(errors[2].message, "Room 2: Width must be greater than zero");
    }

    #[test]
    fn test_complete_rooms_pass() {
        let mut rooms = RoomList::new();
        complete_room(&mut rooms);
        complete_room(&mut rooms);
        assert!(validate_rooms(&rooms).is_empty());
    }

    #[test]
    fn test_creator_email() {
        let mut creator = CreatorInfo {
            name: "Ada".into(),
            ..CreatorInfo::default()
        };
        assert_eq!(validate_creator(&creator)[0].message, "Email is required");

        creator.email = "ada-at-example".into();
        assert_eq!(validate_creator(&creator)[0].message, "Please enter a valid email address");

        creator.email = "ada@example.com".into();
        assert!(validate_creator(&creator).is_empty());
    }

    #[test]
    fn test_customer_only_checked_when_included() {
        let customer = CustomerInfo {
            email: "nope".into(),
            ..CustomerInfo::default()
        };
        assert!(validate_customer(&customer, false).is_empty());

        let errors = validate_customer(&customer, true);
        assert_eq!(fields(&errors), vec!["name", "email"]);
        assert_eq!(errors[0].message, "Customer name is required");
    }

    #[test]
    fn test_customer_email_optional() {
        let customer = CustomerInfo {
            name: "Bob".into(),
            ..CustomerInfo::default()
        };
        assert!(validate_customer(&customer, true).is_empty());
    }

    #[test]
    fn test_free_steps_always_pass() {
        let survey = SurveyData::new();
        for step in [Step::InteriorDesign, Step::PricingSummary, Step::Certificate, Step::Settings] {
            assert!(validate_step(step, &survey).is_empty());
        }
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@."));
        assert!(!is_valid_email(""));
    }
}
