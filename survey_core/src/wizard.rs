//! # Wizard Controller
//!
//! Owns the survey for one session and moves the user through the steps.
//!
//! ```text
//! ProjectInfo → RoomData → PropertyData → CreatorData → CustomerData
//!     → InteriorDesign → PricingSummary → Certificate ⇄ Settings
//! ```
//!
//! Forward moves are gated on the current step's required fields (see
//! [`crate::validation`]). Backward moves are always allowed. `Settings` is a
//! side branch that can only be opened from `Certificate` and returns to it.
//!
//! [`Wizard`] is the single owner of [`SurveyData`]. Callers get a read-only
//! view and change it only through the typed `update_*` / `add_*` / `remove_*`
//! methods. Room and interior changes recompute the pricing summary before
//! returning, so [`Wizard::pricing`] never lags the data.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::project::{ProjectEdit, PropertyType};
//! use survey_core::wizard::{Step, Wizard};
//!
//! let mut wizard = Wizard::new();
//! assert!(wizard.go_next().is_err());
//! assert_eq!(wizard.current_step(), Step::ProjectInfo);
//!
//! wizard.update_project(ProjectEdit::Name("Test".into()));
//! wizard.update_project(ProjectEdit::Owner("Jane Doe".into()));
//! wizard.update_project(ProjectEdit::Address("1 Main St".into()));
//! wizard.update_project(ProjectEdit::PropertyType(Some(PropertyType::House)));
//!
//! assert_eq!(wizard.go_next().unwrap(), Step::RoomData);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::contacts::{CreatorEdit, CustomerEdit};
use crate::errors::{SurveyError, SurveyResult};
use crate::interior::InteriorEdit;
use crate::pricing::{self, PricingSummary, RoomCost};
use crate::project::{ProjectEdit, SurveyData};
use crate::rooms::{NewRoomPart, Room, RoomEdit, RoomPart};
use crate::settings::{AppSettings, SettingsEdit};
use crate::validation::{self, room_field, FieldError};

// ============================================================================
// Steps
// ============================================================================

/// A wizard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    ProjectInfo,
    RoomData,
    PropertyData,
    CreatorData,
    CustomerData,
    InteriorDesign,
    PricingSummary,
    Certificate,
    /// Side branch off `Certificate`
    Settings,
}

impl Step {
    /// Main flow in order. `Settings` is not part of it.
    pub const MAIN_FLOW: [Step; 8] = [
        Step::ProjectInfo,
        Step::RoomData,
        Step::PropertyData,
        Step::CreatorData,
        Step::CustomerData,
        Step::InteriorDesign,
        Step::PricingSummary,
        Step::Certificate,
    ];

    /// 0-based position in the main flow, `None` for `Settings`
    pub fn index(self) -> Option<usize> {
        Step::MAIN_FLOW.iter().position(|s| *s == self)
    }

    /// Following main-flow step, `None` at the end and for `Settings`
    pub fn next(self) -> Option<Step> {
        self.index().and_then(|i| Step::MAIN_FLOW.get(i + 1).copied())
    }

    /// Preceding step. `Settings` goes back to `Certificate`.
    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Settings => Some(Step::Certificate),
            _ => self
                .index()
                .and_then(|i| i.checked_sub(1))
                .map(|i| Step::MAIN_FLOW[i]),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Step::ProjectInfo => "Project Info",
            Step::RoomData => "Room Data",
            Step::PropertyData => "Property Data",
            Step::CreatorData => "Creator Data",
            Step::CustomerData => "Customer Data",
            Step::InteriorDesign => "Interior Design",
            Step::PricingSummary => "Pricing Summary",
            Step::Certificate => "Certificate",
            Step::Settings => "Settings",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Controller
// ============================================================================

/// The wizard state machine and sole owner of the survey data
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    data: SurveyData,
    pricing: PricingSummary,
    settings: AppSettings,
    errors: Vec<FieldError>,
}

impl Default for Wizard {
    fn default() -> Self {
        Wizard::new()
    }
}

impl Wizard {
    /// Fresh session with default settings
    pub fn new() -> Self {
        Wizard::with_settings(AppSettings::default())
    }

    /// Fresh session with the given settings
    pub fn with_settings(settings: AppSettings) -> Self {
        Wizard::resume(SurveyData::new(), settings)
    }

    /// Continue a previously saved survey from the first step
    pub fn resume(data: SurveyData, settings: AppSettings) -> Self {
        let pricing = pricing::calculate(data.rooms.as_slice(), &data.interior);
        Wizard {
            step: Step::ProjectInfo,
            data,
            pricing,
            settings,
            errors: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Read view
    // ------------------------------------------------------------------------

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn data(&self) -> &SurveyData {
        &self.data
    }

    pub fn pricing(&self) -> &PricingSummary {
        &self.pricing
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Errors recorded by the last blocked `go_next`, minus fields edited since
    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Stored error for one field key
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// Per-room cost breakdown, in list order
    pub fn room_costs(&self) -> Vec<RoomCost> {
        pricing::room_costs(self.data.rooms.as_slice())
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Whether `go_next` would succeed. Records nothing.
    pub fn can_proceed(&self) -> bool {
        self.step.next().is_some() && validation::validate_step(self.step, &self.data).is_empty()
    }

    /// Advance to the next step if the current one is complete.
    ///
    /// On failure the step does not change and the field errors are kept for
    /// [`field_errors`](Self::field_errors).
    pub fn go_next(&mut self) -> SurveyResult<Step> {
        let from = self.step;
        let to = match from.next() {
            Some(to) => to,
            None => {
                let reason = match from {
                    Step::Settings => "Settings returns to the certificate with back",
                    _ => "The certificate is the last step",
                };
                warn!(step = %from, "next refused");
                return Err(SurveyError::navigation_refused(from, from, reason));
            }
        };

        let errors = validation::validate_step(from, &self.data);
        if !errors.is_empty() {
            warn!(step = %from, errors = errors.len(), "step incomplete");
            self.errors = errors.clone();
            return Err(SurveyError::ValidationFailed { step: from, errors });
        }

        self.move_to(to);
        Ok(to)
    }

    /// Go back one step. Never fails; a no-op on the first step.
    pub fn go_back(&mut self) -> Step {
        if let Some(to) = self.step.previous() {
            self.move_to(to);
        } else {
            self.errors.clear();
        }
        self.step
    }

    /// Jump to a step the user has already passed, or open `Settings` from
    /// `Certificate`. Skipping ahead is refused.
    pub fn go_to(&mut self, target: Step) -> SurveyResult<Step> {
        if target == self.step {
            return Ok(target);
        }
        if target == Step::Settings {
            return self.open_settings();
        }

        let allowed = match (self.step.index(), target.index()) {
            (None, Some(_)) => true,
            (Some(current), Some(wanted)) => wanted < current,
            _ => false,
        };
        if !allowed {
            warn!(from = %self.step, to = %target, "skip ahead refused");
            return Err(SurveyError::navigation_refused(
                self.step,
                target,
                "Complete the current step first",
            ));
        }

        self.move_to(target);
        Ok(target)
    }

    /// Open the settings branch. Only available from `Certificate`.
    pub fn open_settings(&mut self) -> SurveyResult<Step> {
        match self.step {
            Step::Settings => Ok(Step::Settings),
            Step::Certificate => {
                self.move_to(Step::Settings);
                Ok(Step::Settings)
            }
            from => Err(SurveyError::navigation_refused(
                from,
                Step::Settings,
                "Settings are available from the certificate",
            )),
        }
    }

    /// Return from the settings branch to `Certificate`
    pub fn close_settings(&mut self) -> Step {
        if self.step == Step::Settings {
            self.move_to(Step::Certificate);
        }
        self.step
    }

    fn move_to(&mut self, to: Step) {
        debug!(from = %self.step, %to, "step changed");
        self.step = to;
        self.errors.clear();
    }

    // ------------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------------

    pub fn update_project(&mut self, edit: ProjectEdit) {
        debug!(field = edit.field(), "project updated");
        self.clear_error(edit.field());
        self.data.project.apply(edit);
        self.data.touch();
    }

    /// Append a blank room
    pub fn add_room(&mut self) -> Uuid {
        let id = self.data.rooms.add();
        self.clear_error("rooms");
        self.rooms_changed();
        id
    }

    /// Change one field of a room. Invalid dimensions leave the room unchanged.
    pub fn update_room(&mut self, id: Uuid, edit: RoomEdit) -> SurveyResult<()> {
        let key = self.data.rooms.index_of(id).map(|i| room_field(i, edit.field()));
        self.data.rooms.update(id, edit)?;
        if let Some(key) = key {
            self.clear_error(&key);
        }
        self.rooms_changed();
        Ok(())
    }

    pub fn remove_room(&mut self, id: Uuid) -> SurveyResult<Room> {
        let removed = self.data.rooms.remove(id)?;
        // Per-room keys are positional
        self.errors.retain(|e| !e.field.starts_with("rooms["));
        self.rooms_changed();
        Ok(removed)
    }

    pub fn add_room_part(&mut self, room_id: Uuid, part: NewRoomPart) -> SurveyResult<Uuid> {
        let part_id = self.data.rooms.add_part(room_id, part)?;
        self.rooms_changed();
        Ok(part_id)
    }

    pub fn remove_room_part(&mut self, room_id: Uuid, part_id: Uuid) -> SurveyResult<RoomPart> {
        let removed = self.data.rooms.remove_part(room_id, part_id)?;
        self.rooms_changed();
        Ok(removed)
    }

    pub fn update_interior(&mut self, edit: InteriorEdit) {
        debug!(?edit, "interior updated");
        self.data.interior.apply(edit);
        self.rooms_changed();
    }

    pub fn update_creator(&mut self, edit: CreatorEdit) {
        debug!(field = edit.field(), "creator updated");
        self.clear_error(edit.field());
        self.data.creator.apply(edit);
        self.data.touch();
    }

    pub fn update_customer(&mut self, edit: CustomerEdit) {
        debug!(field = edit.field(), "customer updated");
        self.clear_error(edit.field());
        self.data.customer.apply(edit);
        self.data.touch();
    }

    /// Toggle whether customer details belong on the survey
    pub fn set_include_customer(&mut self, include: bool) {
        debug!(include, "include customer toggled");
        self.data.include_customer = include;
        if !include && self.step == Step::CustomerData {
            self.errors.clear();
        }
        self.data.touch();
    }

    pub fn update_settings(&mut self, edit: SettingsEdit) -> SurveyResult<()> {
        debug!(?edit, "settings updated");
        self.settings.apply(edit)
    }

    fn clear_error(&mut self, field: &str) {
        self.errors.retain(|e| e.field != field);
    }

    fn rooms_changed(&mut self) {
        self.pricing = pricing::calculate(self.data.rooms.as_slice(), &self.data.interior);
        self.data.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{FlooringMaterial, FurniturePackage, WallMaterial};
    use crate::project::PropertyType;
    use crate::rooms::RoomType;
    use crate::settings::UnitSystem;
    use pretty_assertions::assert_eq;

    fn fill_project(wizard: &mut Wizard) {
        wizard.update_project(ProjectEdit::Name("Test".into()));
        wizard.update_project(ProjectEdit::Owner("Jane Doe".into()));
        wizard.update_project(ProjectEdit::Address("1 Main St".into()));
        wizard.update_project(ProjectEdit::PropertyType(Some(PropertyType::House)));
    }

    fn fill_room(wizard: &mut Wizard) -> Uuid {
        let id = wizard.add_room();
        wizard.update_room(id, RoomEdit::Name("Lounge".into())).unwrap();
        wizard.update_room(id, RoomEdit::RoomType(Some(RoomType::LivingRoom))).unwrap();
        wizard.update_room(id, RoomEdit::Width(10.0)).unwrap();
        wizard.update_room(id, RoomEdit::Length(12.0)).unwrap();
        wizard.update_room(id, RoomEdit::Flooring(Some(FlooringMaterial::Hardwood))).unwrap();
        wizard.update_room(id, RoomEdit::Walls(Some(WallMaterial::Drywall))).unwrap();
        id
    }

    fn fill_creator(wizard: &mut Wizard) {
        wizard.update_creator(CreatorEdit::Name("Ada Surveyor".into()));
        wizard.update_creator(CreatorEdit::Email("ada@example.com".into()));
    }

    /// Fill every required field and walk to the certificate
    fn at_certificate() -> Wizard {
        let mut wizard = Wizard::new();
        fill_project(&mut wizard);
        fill_room(&mut wizard);
        fill_creator(&mut wizard);
        while wizard.current_step() != Step::Certificate {
            wizard.go_next().unwrap();
        }
        wizard
    }

    #[test]
    fn test_step_order() {
        assert_eq!(Step::ProjectInfo.next(), Some(Step::RoomData));
        assert_eq!(Step::PricingSummary.next(), Some(Step::Certificate));
        assert_eq!(Step::Certificate.next(), None);
        assert_eq!(Step::Settings.next(), None);
        assert_eq!(Step::ProjectInfo.previous(), None);
        assert_eq!(Step::Settings.previous(), Some(Step::Certificate));
        assert_eq!(Step::Settings.index(), None);
        assert_eq!(Step::ProjectInfo.to_string(), "Project Info");
    }

    #[test]
    fn test_initial_state() {
        let wizard = Wizard::new();
        assert_eq!(wizard.current_step(), Step::ProjectInfo);
        assert!(wizard.data().rooms.is_empty());
        assert_eq!(*wizard.pricing(), PricingSummary::default());
        assert!(wizard.field_errors().is_empty());
        assert!(!wizard.can_proceed());
    }

    #[test]
    fn test_blocked_next_keeps_step_and_records_errors() {
        let mut wizard = Wizard::new();
        wizard.update_project(ProjectEdit::Name("Test".into()));

        let err = wizard.go_next().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
        assert_eq!(err.field_errors().len(), 3);
        assert_eq!(wizard.current_step(), Step::ProjectInfo);
        assert_eq!(wizard.field_errors().len(), 3);
        assert!(wizard.field_errors().iter().all(|e| !e.message.is_empty()));
    }

    #[test]
    fn test_editing_field_clears_its_error() {
        let mut wizard = Wizard::new();
        let _ = wizard.go_next();
        assert!(wizard.field_error("owner").is_some());

        wizard.update_project(ProjectEdit::Owner("Jane Doe".into()));
        assert!(wizard.field_error("owner").is_none());
        assert!(wizard.field_error("name").is_some());
    }

    #[test]
    fn test_room_step_requires_complete_rooms() {
        let mut wizard = Wizard::new();
        fill_project(&mut wizard);
        wizard.go_next().unwrap();

        let err = wizard.go_next().unwrap_err();
        assert_eq!(err.field_errors()[0].field, "rooms");

        let id = wizard.add_room();
        assert!(wizard.field_error("rooms").is_none());
        let _ = wizard.go_next();
        assert!(wizard.field_error("rooms[0].width").is_some());

        wizard.update_room(id, RoomEdit::Width(4.0)).unwrap();
        assert!(wizard.field_error("rooms[0].width").is_none());
        assert!(wizard.field_error("rooms[0].length").is_some());
        assert_eq!(wizard.current_step(), Step::RoomData);
    }

    #[test]
    fn test_room_edits_recompute_pricing() {
        let mut wizard = Wizard::new();
        let id = fill_room(&mut wizard);
        assert_eq!(wizard.pricing().materials_cost, 1140.0);

        wizard.update_interior(InteriorEdit::FurniturePackage(Some(FurniturePackage::Premium)));
        assert_eq!(wizard.pricing().total, 4140.0);

        wizard.remove_room(id).unwrap();
        assert_eq!(*wizard.pricing(), PricingSummary::default());
    }

    #[test]
    fn test_parts_recompute_pricing() {
        let mut wizard = Wizard::new();
        let id = fill_room(&mut wizard);
        let part = wizard
            .add_room_part(id, NewRoomPart::subtract("Chimney", 2.0, 10.0))
            .unwrap();
        assert_eq!(wizard.data().rooms.get(id).unwrap().area_sqft, 100.0);
        assert_eq!(wizard.pricing().materials_cost, 950.0);

        wizard.remove_room_part(id, part).unwrap();
        assert_eq!(wizard.pricing().materials_cost, 1140.0);
    }

    #[test]
    fn test_invalid_dimension_leaves_data_alone() {
        let mut wizard = Wizard::new();
        let id = fill_room(&mut wizard);
        assert!(wizard.update_room(id, RoomEdit::Length(-3.0)).is_err());
        assert_eq!(wizard.data().rooms.get(id).unwrap().area_sqft, 120.0);
        assert_eq!(wizard.pricing().materials_cost, 1140.0);
    }

    #[test]
    fn test_back_is_unconditional() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.go_back(), Step::ProjectInfo);

        fill_project(&mut wizard);
        wizard.go_next().unwrap();
        let _ = wizard.go_next();
        assert!(!wizard.field_errors().is_empty());

        assert_eq!(wizard.go_back(), Step::ProjectInfo);
        assert!(wizard.field_errors().is_empty());
    }

    #[test]
    fn test_customer_step_optional() {
        let mut wizard = Wizard::new();
        fill_project(&mut wizard);
        fill_room(&mut wizard);
        fill_creator(&mut wizard);
        for _ in 0..4 {
            wizard.go_next().unwrap();
        }
        assert_eq!(wizard.current_step(), Step::CustomerData);

        wizard.set_include_customer(true);
        assert!(wizard.go_next().is_err());
        assert!(wizard.field_error("name").is_some());

        wizard.set_include_customer(false);
        assert!(wizard.field_errors().is_empty());
        assert_eq!(wizard.go_next().unwrap(), Step::InteriorDesign);
    }

    #[test]
    fn test_next_refused_at_end() {
        let mut wizard = at_certificate();
        assert!(!wizard.can_proceed());
        let err = wizard.go_next().unwrap_err();
        assert_eq!(err.error_code(), "NAVIGATION_REFUSED");
        assert_eq!(wizard.current_step(), Step::Certificate);
    }

    #[test]
    fn test_settings_branch() {
        let mut wizard = at_certificate();
        assert_eq!(wizard.open_settings().unwrap(), Step::Settings);
        assert!(wizard.go_next().is_err());

        wizard.update_settings(SettingsEdit::Units(UnitSystem::Metric)).unwrap();
        assert_eq!(wizard.settings().units, UnitSystem::Metric);

        assert_eq!(wizard.go_back(), Step::Certificate);
        wizard.go_to(Step::Settings).unwrap();
        assert_eq!(wizard.close_settings(), Step::Certificate);
    }

    #[test]
    fn test_settings_only_from_certificate() {
        let mut wizard = Wizard::new();
        assert!(wizard.open_settings().is_err());
        assert!(wizard.go_to(Step::Settings).is_err());
        assert_eq!(wizard.close_settings(), Step::ProjectInfo);
    }

    #[test]
    fn test_go_to_only_backwards() {
        let mut wizard = Wizard::new();
        fill_project(&mut wizard);
        assert!(wizard.go_to(Step::RoomData).is_err());

        wizard.go_next().unwrap();
        assert!(wizard.go_to(Step::PropertyData).is_err());
        assert_eq!(wizard.go_to(Step::ProjectInfo).unwrap(), Step::ProjectInfo);
        assert_eq!(wizard.go_to(Step::ProjectInfo).unwrap(), Step::ProjectInfo);
    }

    #[test]
    fn test_go_to_from_settings() {
        let mut wizard = at_certificate();
        wizard.open_settings().unwrap();
        assert_eq!(wizard.go_to(Step::RoomData).unwrap(), Step::RoomData);
    }

    #[test]
    fn test_resume_recomputes_pricing() {
        let mut source = Wizard::new();
        fill_room(&mut source);
        let data = source.data().clone();

        let wizard = Wizard::resume(data, AppSettings::default());
        assert_eq!(wizard.current_step(), Step::ProjectInfo);
        assert_eq!(wizard.pricing().materials_cost, 1140.0);
    }
}
