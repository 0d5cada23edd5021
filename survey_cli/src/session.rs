//! One interactive wizard session.
//!
//! Each step has a screen that prompts for its fields and then asks where to
//! go. Screens read from [`Wizard`] and write through its edit methods only.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use survey_core::certificate::Certificate;
use survey_core::contacts::{CreatorEdit, CustomerEdit};
use survey_core::errors::SurveyError;
use survey_core::interior::InteriorEdit;
use survey_core::materials::{price_label, FlooringMaterial, FurniturePackage, WallColor, WallMaterial};
use survey_core::project::{ProjectEdit, PropertyType};
use survey_core::rooms::{NewRoomPart, PartKind, PartTemplate, RoomEdit, RoomType};
use survey_core::settings::{SettingsEdit, Theme, UnitSystem};
use survey_core::wizard::{Step, Wizard};
use tracing::debug;
use uuid::Uuid;

use crate::console::Console;

/// What the user wants after filling in a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Back,
    Stay,
    Settings,
    Quit,
}

pub struct Session<R, W> {
    wizard: Wizard,
    console: Console<R, W>,
    output_dir: PathBuf,
    certificate: Option<Certificate>,
    exported: Vec<PathBuf>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(wizard: Wizard, console: Console<R, W>, output_dir: impl Into<PathBuf>) -> Self {
        Session {
            wizard,
            console,
            output_dir: output_dir.into(),
            certificate: None,
            exported: Vec::new(),
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Certificates written during the session
    pub fn exported(&self) -> &[PathBuf] {
        &self.exported
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.console.at_eof() {
                return Ok(());
            }

            let step = self.wizard.current_step();
            if !matches!(step, Step::Certificate | Step::Settings) {
                self.certificate = None;
            }
            self.header(step)?;

            let action = match step {
                Step::ProjectInfo => self.project_info()?,
                Step::RoomData => self.room_data()?,
                Step::PropertyData => self.property_data()?,
                Step::CreatorData => self.creator_data()?,
                Step::CustomerData => self.customer_data()?,
                Step::InteriorDesign => self.interior_design()?,
                Step::PricingSummary => self.pricing_summary()?,
                Step::Certificate => self.certificate()?,
                Step::Settings => self.settings()?,
            };
            debug!(%step, ?action, "screen finished");

            match action {
                Action::Next => self.advance()?,
                Action::Back => {
                    self.wizard.go_back();
                }
                Action::Settings => {
                    if let Err(e) = self.wizard.open_settings() {
                        self.console.say(format!("  {e}"))?;
                    }
                }
                Action::Stay => {}
                Action::Quit => return Ok(()),
            }
        }
    }

    fn header(&mut self, step: Step) -> Result<()> {
        self.console.blank()?;
        let title = match step.index() {
            Some(i) => format!("Step {} of {}: {}", i + 1, Step::MAIN_FLOW.len(), step),
            None => step.to_string(),
        };
        self.console.say(&title)?;
        self.console.say("=".repeat(title.len()))?;
        Ok(())
    }

    fn advance(&mut self) -> Result<()> {
        match self.wizard.go_next() {
            Ok(_) => {}
            Err(SurveyError::ValidationFailed { errors, .. }) => {
                self.console.say("Please fix the following:")?;
                for error in errors {
                    self.console.say(format!("  - {}", error.message))?;
                }
            }
            Err(e) => self.console.say(format!("  {e}"))?,
        }
        Ok(())
    }

    /// Ask where to go from a form screen
    fn navigate(&mut self) -> Result<Action> {
        let answer = self
            .console
            .ask("[Enter] continue, (e)dit again, (b)ack, (q)uit: ")?;
        if self.console.at_eof() {
            return Ok(Action::Quit);
        }
        Ok(match answer.to_lowercase().as_str() {
            "" | "n" | "next" => Action::Next,
            "b" | "back" => Action::Back,
            "q" | "quit" => Action::Quit,
            _ => Action::Stay,
        })
    }

    // ------------------------------------------------------------------------
    // Screens
    // ------------------------------------------------------------------------

    fn project_info(&mut self) -> Result<Action> {
        let project = self.wizard.data().project.clone();
        if let Some(v) = self.console.edit_text("Project name", &project.name)? {
            self.wizard.update_project(ProjectEdit::Name(v));
        }
        if let Some(v) = self.console.edit_text("Owner name", &project.owner)? {
            self.wizard.update_project(ProjectEdit::Owner(v));
        }
        if let Some(v) = self.console.edit_text("Address", &project.address)? {
            self.wizard.update_project(ProjectEdit::Address(v));
        }
        self.property_type(project.property_type)?;
        self.navigate()
    }

    fn property_data(&mut self) -> Result<Action> {
        let project = self.wizard.data().project.clone();
        if let Some(v) = self.console.edit_text("Project name", &project.name)? {
            self.wizard.update_project(ProjectEdit::Name(v));
        }
        if let Some(v) = self.console.edit_text("Property address", &project.address)? {
            self.wizard.update_project(ProjectEdit::Address(v));
        }
        self.property_type(project.property_type)?;
        self.console.say(format!(
            "Total measured area: {}",
            self.wizard.settings().format_area(self.wizard.data().rooms.total_area().value())
        ))?;
        self.navigate()
    }

    fn property_type(&mut self, current: Option<PropertyType>) -> Result<()> {
        if let Some(v) = self.console.edit_choice(
            "Property type",
            &[PropertyType::Apartment, PropertyType::House],
            current,
            |t| t.to_string(),
            PropertyType::from_str_flexible,
        )? {
            self.wizard.update_project(ProjectEdit::PropertyType(v));
        }
        Ok(())
    }

    fn room_data(&mut self) -> Result<Action> {
        loop {
            self.list_rooms()?;
            let answer = self.console.ask(
                "(a)dd, (e)dit N, (d)elete N, (p)art N, (x) remove part N M, [Enter] continue, (b)ack, (q)uit: ",
            )?;
            if self.console.at_eof() {
                return Ok(Action::Quit);
            }

            let mut words = answer.split_whitespace();
            let command = words.next().unwrap_or("").to_lowercase();
            let args: Vec<usize> = words.filter_map(|w| w.parse().ok()).collect();

            match (command.as_str(), args.as_slice()) {
                ("", _) | ("n", _) => return Ok(Action::Next),
                ("b", _) => return Ok(Action::Back),
                ("q", _) => return Ok(Action::Quit),
                ("a", _) => {
                    let id = self.wizard.add_room();
                    self.edit_room(id)?;
                }
                ("e", [n]) => match self.room_at(*n) {
                    Some(id) => self.edit_room(id)?,
                    None => self.console.say(format!("  No room {n}"))?,
                },
                ("d", [n]) => match self.room_at(*n) {
                    Some(id) => {
                        self.wizard.remove_room(id)?;
                    }
                    None => self.console.say(format!("  No room {n}"))?,
                },
                ("p", [n]) => match self.room_at(*n) {
                    Some(id) => self.add_part(id)?,
                    None => self.console.say(format!("  No room {n}"))?,
                },
                ("x", [n, m]) => {
                    let part = self.room_at(*n).and_then(|id| {
                        let room = self.wizard.data().rooms.get(id)?;
                        let part = room.parts.get(m.checked_sub(1)?)?;
                        Some((id, part.id))
                    });
                    match part {
                        Some((room_id, part_id)) => {
                            self.wizard.remove_room_part(room_id, part_id)?;
                        }
                        None => self.console.say(format!("  No part {m} in room {n}"))?,
                    }
                }
                _ => self.console.say("  Unrecognised command")?,
            }
        }
    }

    fn room_at(&self, position: usize) -> Option<Uuid> {
        self.wizard.data().rooms.at_position(position).map(|r| r.id)
    }

    fn list_rooms(&mut self) -> Result<()> {
        let settings = self.wizard.settings().clone();
        let rooms = self.wizard.data().rooms.clone();
        if rooms.is_empty() {
            self.console.say("No rooms yet.")?;
        }
        for room in &rooms {
            let kind = room.room_type.map(|t| t.display_name()).unwrap_or("no type");
            self.console.say(format!(
                "  {}. {} ({}) {} x {} = {}",
                room.position,
                room.label(),
                kind,
                settings.format_length(room.width_ft),
                settings.format_length(room.length_ft),
                settings.format_area(room.area_sqft),
            ))?;
            for (i, part) in room.parts.iter().enumerate() {
                let sign = if part.kind == PartKind::Add { '+' } else { '-' };
                self.console.say(format!(
                    "       {}) {} {} {}",
                    i + 1,
                    sign,
                    part.name,
                    settings.format_area(part.area_sqft)
                ))?;
            }
        }
        Ok(())
    }

    /// Prompt for every field of one room
    fn edit_room(&mut self, id: Uuid) -> Result<()> {
        let Some(room) = self.wizard.data().rooms.get(id).cloned() else {
            return Ok(());
        };
        self.console.say(format!("Editing {}", room.label()))?;

        let mut edits = Vec::new();
        if let Some(v) = self.console.edit_text("Room name", &room.name)? {
            edits.push(RoomEdit::Name(v));
        }
        if let Some(v) = self.console.edit_choice(
            "Room type",
            &RoomType::ALL,
            room.room_type,
            |t| t.to_string(),
            RoomType::from_str_flexible,
        )? {
            edits.push(RoomEdit::RoomType(v));
        }
        if let Some(v) = self.console.edit_number("Width (ft)", room.width_ft)? {
            edits.push(RoomEdit::Width(v));
        }
        if let Some(v) = self.console.edit_number("Length (ft)", room.length_ft)? {
            edits.push(RoomEdit::Length(v));
        }
        if let Some(v) = self.console.edit_choice(
            "Flooring",
            &FlooringMaterial::ALL,
            room.flooring,
            |m| price_label(m.display_name(), m.price_per_sqft()),
            FlooringMaterial::from_str_flexible,
        )? {
            edits.push(RoomEdit::Flooring(v));
        }
        if let Some(v) = self.console.edit_choice(
            "Walls",
            &WallMaterial::ALL,
            room.walls,
            |m| price_label(m.display_name(), m.price_per_sqft()),
            WallMaterial::from_str_flexible,
        )? {
            edits.push(RoomEdit::Walls(v));
        }
        if let Some(v) = self.console.edit_number("Ceiling height (ft)", room.ceiling_height_ft)? {
            edits.push(RoomEdit::CeilingHeight(v));
        }
        if let Some(v) = self.console.edit_text("Notes", &room.notes)? {
            edits.push(RoomEdit::Notes(v));
        }

        for edit in edits {
            if let Err(e) = self.wizard.update_room(id, edit) {
                self.console.say(format!("  {e}"))?;
            }
        }
        Ok(())
    }

    fn add_part(&mut self, room_id: Uuid) -> Result<()> {
        let template = self.console.edit_choice(
            "Template",
            &PartTemplate::ALL,
            None,
            |t| t.display_name().to_string(),
            |s| {
                PartTemplate::ALL
                    .into_iter()
                    .find(|t| t.display_name().eq_ignore_ascii_case(s))
                    .ok_or_else(|| SurveyError::invalid_input("template", s, "Unknown template"))
            },
        )?;
        let template = template.flatten();

        let default_name = template.map(|t| t.display_name()).unwrap_or("");
        let name = self
            .console
            .edit_text("Part name", default_name)?
            .unwrap_or_else(|| default_name.to_string());
        let kind = self
            .console
            .edit_choice(
                "Add or subtract",
                &[PartKind::Add, PartKind::Subtract],
                Some(PartKind::Add),
                |k| format!("{k:?}").to_lowercase(),
                PartKind::from_str_flexible,
            )?
            .flatten()
            .unwrap_or(PartKind::Add);
        let width = self.console.edit_number("Width (ft)", 0.0)?.unwrap_or(0.0);
        let length = self.console.edit_number("Length (ft)", 0.0)?.unwrap_or(0.0);

        let mut request = match kind {
            PartKind::Add => NewRoomPart::add(name, width, length),
            PartKind::Subtract => NewRoomPart::subtract(name, width, length),
        };
        if let Some(template) = template {
            request = request.with_template(template);
        }

        if let Err(e) = self.wizard.add_room_part(room_id, request) {
            self.console.say(format!("  {e}"))?;
        }
        Ok(())
    }

    fn creator_data(&mut self) -> Result<Action> {
        let creator = self.wizard.data().creator.clone();
        let fields: [(&str, &str, fn(String) -> CreatorEdit); 6] = [
            ("Full name", creator.name.as_str(), CreatorEdit::Name),
            ("Email", creator.email.as_str(), CreatorEdit::Email),
            ("Phone", creator.phone.as_str(), CreatorEdit::Phone),
            ("Company", creator.company.as_str(), CreatorEdit::Company),
            ("License number", creator.license.as_str(), CreatorEdit::License),
            ("Professional title", creator.title.as_str(), CreatorEdit::Title),
        ];
        for (label, current, edit) in fields {
            if let Some(v) = self.console.edit_text(label, current)? {
                self.wizard.update_creator(edit(v));
            }
        }
        self.navigate()
    }

    fn customer_data(&mut self) -> Result<Action> {
        let included = self.wizard.data().include_customer;
        if let Some(v) = self.console.edit_flag("Include customer details", included)? {
            self.wizard.set_include_customer(v);
        }

        if self.wizard.data().include_customer {
            let customer = self.wizard.data().customer.clone();
            let fields: [(&str, &str, fn(String) -> CustomerEdit); 6] = [
                ("Customer name", customer.name.as_str(), CustomerEdit::Name),
                ("Email", customer.email.as_str(), CustomerEdit::Email),
                ("Phone", customer.phone.as_str(), CustomerEdit::Phone),
                ("Address", customer.address.as_str(), CustomerEdit::Address),
                ("Company", customer.company.as_str(), CustomerEdit::Company),
                ("Notes", customer.notes.as_str(), CustomerEdit::Notes),
            ];
            for (label, current, edit) in fields {
                if let Some(v) = self.console.edit_text(label, current)? {
                    self.wizard.update_customer(edit(v));
                }
            }
        }
        self.navigate()
    }

    fn interior_design(&mut self) -> Result<Action> {
        let interior = self.wizard.data().interior.clone();
        if let Some(v) = self.console.edit_choice(
            "Furniture package",
            &FurniturePackage::ALL,
            interior.furniture_package,
            |p| format!("{} - {}", price_label(p.display_name(), p.price_per_sqft()), p.description()),
            FurniturePackage::from_str_flexible,
        )? {
            self.wizard.update_interior(InteriorEdit::FurniturePackage(v));
        }
        if let Some(v) = self.console.edit_choice(
            "Wall colour",
            &WallColor::ALL,
            interior.wall_color,
            |c| format!("{} ({})", c.display_name(), c.hex()),
            WallColor::from_str_flexible,
        )? {
            self.wizard.update_interior(InteriorEdit::WallColor(v));
        }
        if let Some(v) = self
            .console
            .edit_number("Lighting ambiance (%)", interior.lighting_ambiance_percent)?
        {
            self.wizard.update_interior(InteriorEdit::LightingAmbiance(v));
        }
        self.console.say(format!(
            "Estimated interior cost: ${:.2}",
            self.wizard.pricing().interior_cost
        ))?;
        self.navigate()
    }

    fn pricing_summary(&mut self) -> Result<Action> {
        let settings = self.wizard.settings().clone();
        let rooms = self.wizard.data().rooms.clone();
        for (room, cost) in rooms.iter().zip(self.wizard.room_costs()) {
            self.console.say(format!(
                "  {:<20} {:>12}  flooring ${:.2}  walls ${:.2}  total ${:.2} (${:.2}/sq ft)",
                room.label(),
                settings.format_area(room.area_sqft),
                cost.flooring_cost,
                cost.wall_cost,
                cost.total,
                cost.cost_per_sqft,
            ))?;
        }

        let pricing = *self.wizard.pricing();
        self.console.blank()?;
        self.console.say(format!("Materials cost:   ${:.2}", pricing.materials_cost))?;
        self.console.say(format!("Interior cost:    ${:.2}", pricing.interior_cost))?;
        self.console.say(format!("Cost per sq ft:   ${:.2}", pricing.base_cost_per_sqft))?;
        self.console.say(format!("Total:            ${:.2}", pricing.total))?;
        self.navigate()
    }

    fn certificate(&mut self) -> Result<Action> {
        let certificate = match self.certificate.take() {
            Some(existing) => existing,
            None => Certificate::issue(
                self.wizard.data(),
                self.wizard.pricing(),
                Local::now().date_naive(),
            )?,
        };
        self.console.say(certificate.render_text())?;
        self.console.blank()?;

        let answer = self
            .console
            .ask("e(x)port, (s)ettings, (b)ack, (q)uit: ")?;
        let action = if self.console.at_eof() {
            Action::Quit
        } else {
            match answer.to_lowercase().as_str() {
                "x" | "export" => {
                    self.export(&certificate)?;
                    Action::Stay
                }
                "s" | "settings" => Action::Settings,
                "b" | "back" => Action::Back,
                "q" | "quit" => Action::Quit,
                _ => Action::Stay,
            }
        };

        self.certificate = Some(certificate);
        Ok(action)
    }

    fn export(&mut self, certificate: &Certificate) -> Result<()> {
        match certificate.export(&self.output_dir) {
            Ok(path) => {
                self.console.say(format!("Saved {}", path.display()))?;
                self.exported.push(path);
            }
            Err(e) => self.console.say(format!("  {e}"))?,
        }
        Ok(())
    }

    fn settings(&mut self) -> Result<Action> {
        let settings = self.wizard.settings().clone();
        let mut edits = Vec::new();

        if let Some(v) = self.console.edit_flag("Auto-save", settings.auto_save)? {
            edits.push(SettingsEdit::AutoSave(v));
        }
        if let Some(Some(v)) = self.console.edit_choice(
            "Units",
            &UnitSystem::ALL,
            Some(settings.units),
            |u| u.display_name().to_string(),
            UnitSystem::from_str_flexible,
        )? {
            edits.push(SettingsEdit::Units(v));
        }
        if let Some(v) = self
            .console
            .edit_number("Decimal precision (0-4)", settings.decimal_precision)?
        {
            edits.push(SettingsEdit::DecimalPrecision(v));
        }
        if let Some(v) = self.console.edit_flag("Notifications", settings.notifications)? {
            edits.push(SettingsEdit::Notifications(v));
        }
        if let Some(Some(v)) = self.console.edit_choice(
            "Theme",
            &Theme::ALL,
            Some(settings.theme),
            |t| t.display_name().to_string(),
            Theme::from_str_flexible,
        )? {
            edits.push(SettingsEdit::Theme(v));
        }

        for edit in edits {
            if let Err(e) = self.wizard.update_settings(edit) {
                self.console.say(format!("  {e}"))?;
            }
        }

        let notes = self.wizard.settings().changes_from_default();
        if !notes.is_empty() {
            self.console.say("Settings preview:")?;
            for note in notes {
                self.console.say(format!("  - {note}"))?;
            }
        }

        let answer = self.console.ask("[Enter] back to certificate, (q)uit: ")?;
        if self.console.at_eof() || answer.eq_ignore_ascii_case("q") {
            return Ok(Action::Quit);
        }
        self.wizard.close_settings();
        Ok(Action::Stay)
    }
}
