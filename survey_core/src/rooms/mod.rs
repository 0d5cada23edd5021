//! # Rooms
//!
//! Measured rooms and the ordered list that owns them.
//!
//! [`RoomList`] is the only place a room's derived values change. Every
//! mutation goes through it, so two invariants hold after every call:
//!
//! - `area_sqft == max(0, width * length + Σ add parts − Σ subtract parts)`,
//!   recomputed from scratch on each dimension or part change
//! - `position` equals the room's 1-based index in the list
//!
//! ## Example
//!
//! ```rust
//! use survey_core::rooms::{NewRoomPart, RoomEdit, RoomList};
//!
//! let mut rooms = RoomList::new();
//! let id = rooms.add();
//! rooms.update(id, RoomEdit::Width(5.0)).unwrap();
//! rooms.update(id, RoomEdit::Length(4.0)).unwrap();
//! rooms.add_part(id, NewRoomPart::add("Bay window", 3.0, 1.0)).unwrap();
//! rooms.add_part(id, NewRoomPart::subtract("Chimney", 2.0, 1.0)).unwrap();
//!
//! assert_eq!(rooms.get(id).unwrap().area_sqft, 21.0);
//! ```

pub mod parts;

pub use parts::{NewRoomPart, PartKind, PartTemplate, RoomPart};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{SurveyError, SurveyResult};
use crate::materials::{FlooringMaterial, WallMaterial};
use crate::units::{Feet, SqFt};

/// Default ceiling height for new rooms (ft)
pub const DEFAULT_CEILING_HEIGHT_FT: f64 = 8.0;

/// Room usage categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Office,
    Garage,
    Other,
}

impl RoomType {
    /// All room types for UI selection
    pub const ALL: [RoomType; 7] = [
        RoomType::LivingRoom,
        RoomType::Bedroom,
        RoomType::Kitchen,
        RoomType::Bathroom,
        RoomType::Office,
        RoomType::Garage,
        RoomType::Other,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SurveyResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "living-room" | "living" | "lounge" => Ok(RoomType::LivingRoom),
            "bedroom" | "bed" => Ok(RoomType::Bedroom),
            "kitchen" => Ok(RoomType::Kitchen),
            "bathroom" | "bath" => Ok(RoomType::Bathroom),
            "office" | "study" => Ok(RoomType::Office),
            "garage" => Ok(RoomType::Garage),
            "other" => Ok(RoomType::Other),
            _ => Err(SurveyError::invalid_input("room_type", s, "Unknown room type")),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::LivingRoom => "Living Room",
            RoomType::Bedroom => "Bedroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::Bathroom => "Bathroom",
            RoomType::Office => "Office",
            RoomType::Garage => "Garage",
            RoomType::Other => "Other",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Floor plan outline. Display only; area always comes from width × length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RoomShape {
    #[default]
    Rectangular,
    Square,
    LShaped,
    Irregular,
}

impl RoomShape {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomShape::Rectangular => "Rectangular",
            RoomShape::Square => "Square",
            RoomShape::LShaped => "L-Shaped",
            RoomShape::Irregular => "Irregular",
        }
    }
}

/// A measured room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    /// 1-based position in the room list
    pub position: u32,
    pub name: String,
    pub room_type: Option<RoomType>,
    pub width_ft: f64,
    pub length_ft: f64,
    /// Derived, see module docs
    pub area_sqft: f64,
    pub flooring: Option<FlooringMaterial>,
    pub walls: Option<WallMaterial>,
    #[serde(default)]
    pub shape: RoomShape,
    #[serde(default = "default_ceiling_height")]
    pub ceiling_height_ft: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub parts: Vec<RoomPart>,
}

fn default_ceiling_height() -> f64 {
    DEFAULT_CEILING_HEIGHT_FT
}

impl Room {
    /// A blank room: zero dimensions, nothing selected
    fn blank(position: u32) -> Self {
        Room {
            id: Uuid::new_v4(),
            position,
            name: String::new(),
            room_type: None,
            width_ft: 0.0,
            length_ft: 0.0,
            area_sqft: 0.0,
            flooring: None,
            walls: None,
            shape: RoomShape::default(),
            ceiling_height_ft: DEFAULT_CEILING_HEIGHT_FT,
            notes: String::new(),
            parts: Vec::new(),
        }
    }

    /// Floor area before part adjustments
    pub fn base_area(&self) -> SqFt {
        Feet(self.width_ft) * Feet(self.length_ft)
    }

    /// Floor area including part adjustments
    pub fn area(&self) -> SqFt {
        SqFt(self.area_sqft)
    }

    /// Display label: the room name, or "Room N" while unnamed
    pub fn label(&self) -> String {
        if self.name.trim().is_empty() {
            format!("Room {}", self.position)
        } else {
            self.name.clone()
        }
    }

    /// Recompute `area_sqft` from the dimensions and all parts.
    fn recompute_area(&mut self) {
        let total = self
            .parts
            .iter()
            .fold(self.base_area(), |sum, part| sum + part.signed_area());
        self.area_sqft = total.value().max(0.0);
    }

    fn apply(&mut self, edit: RoomEdit) -> SurveyResult<()> {
        match edit {
            RoomEdit::Name(name) => self.name = name,
            RoomEdit::RoomType(room_type) => self.room_type = room_type,
            RoomEdit::Width(width) => {
                self.width_ft = check_dimension("width_ft", width)?;
                self.recompute_area();
            }
            RoomEdit::Length(length) => {
                self.length_ft = check_dimension("length_ft", length)?;
                self.recompute_area();
            }
            RoomEdit::Flooring(flooring) => self.flooring = flooring,
            RoomEdit::Walls(walls) => self.walls = walls,
            RoomEdit::Shape(shape) => self.shape = shape,
            RoomEdit::CeilingHeight(height) => {
                self.ceiling_height_ft = check_dimension("ceiling_height_ft", height)?;
            }
            RoomEdit::Notes(notes) => self.notes = notes,
        }
        Ok(())
    }
}

fn check_dimension(field: &str, value: f64) -> SurveyResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(SurveyError::invalid_input(
            field,
            value.to_string(),
            "Dimensions must be zero or greater",
        ));
    }
    Ok(value)
}

/// A single-field change to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoomEdit {
    Name(String),
    RoomType(Option<RoomType>),
    Width(f64),
    Length(f64),
    Flooring(Option<FlooringMaterial>),
    Walls(Option<WallMaterial>),
    Shape(RoomShape),
    CeilingHeight(f64),
    Notes(String),
}

impl RoomEdit {
    /// The validation field this edit touches (see [`crate::validation`])
    pub fn field(&self) -> &'static str {
        match self {
            RoomEdit::Name(_) => "name",
            RoomEdit::RoomType(_) => "room_type",
            RoomEdit::Width(_) => "width",
            RoomEdit::Length(_) => "length",
            RoomEdit::Flooring(_) => "flooring",
            RoomEdit::Walls(_) => "walls",
            RoomEdit::Shape(_) => "shape",
            RoomEdit::CeilingHeight(_) => "ceiling_height",
            RoomEdit::Notes(_) => "notes",
        }
    }
}

/// Ordered list of rooms. Order is insertion order and is display-significant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Room>", into = "Vec<Room>")]
pub struct RoomList {
    rooms: Vec<Room>,
}

impl RoomList {
    /// Create an empty list
    pub fn new() -> Self {
        RoomList::default()
    }

    /// Append a blank room and return its id
    pub fn add(&mut self) -> Uuid {
        let room = Room::blank(self.rooms.len() as u32 + 1);
        let id = room.id;
        self.rooms.push(room);
        debug!(%id, count = self.rooms.len(), "room added");
        id
    }

    /// Apply one field change. Width and length changes recompute area.
    pub fn update(&mut self, id: Uuid, edit: RoomEdit) -> SurveyResult<()> {
        debug!(%id, field = edit.field(), "room updated");
        self.get_mut(id)?.apply(edit)
    }

    /// Remove a room. Later rooms move up and are renumbered.
    pub fn remove(&mut self, id: Uuid) -> SurveyResult<Room> {
        let index = self
            .index_of(id)
            .ok_or_else(|| SurveyError::not_found("Room", id))?;
        let removed = self.rooms.remove(index);
        self.renumber();
        debug!(%id, count = self.rooms.len(), "room removed");
        Ok(removed)
    }

    /// Add a part to a room and recompute the room's area
    pub fn add_part(&mut self, room_id: Uuid, request: NewRoomPart) -> SurveyResult<Uuid> {
        let room = self.get_mut(room_id)?;
        let part = RoomPart::create(request)?;
        let part_id = part.id;
        room.parts.push(part);
        room.recompute_area();
        debug!(%room_id, %part_id, area = room.area_sqft, "room part added");
        Ok(part_id)
    }

    /// Remove a part from a room and recompute the room's area
    pub fn remove_part(&mut self, room_id: Uuid, part_id: Uuid) -> SurveyResult<RoomPart> {
        let room = self.get_mut(room_id)?;
        let index = room
            .parts
            .iter()
            .position(|p| p.id == part_id)
            .ok_or_else(|| SurveyError::not_found("Room part", part_id))?;
        let removed = room.parts.remove(index);
        room.recompute_area();
        debug!(%room_id, %part_id, area = room.area_sqft, "room part removed");
        Ok(removed)
    }

    /// Look up a room by id
    pub fn get(&self, id: Uuid) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> SurveyResult<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SurveyError::not_found("Room", id))
    }

    /// 0-based index of a room
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.rooms.iter().position(|r| r.id == id)
    }

    /// Room at a 1-based position, as shown to the user
    pub fn at_position(&self, position: usize) -> Option<&Room> {
        position.checked_sub(1).and_then(|i| self.rooms.get(i))
    }

    /// Rooms in display order
    pub fn as_slice(&self) -> &[Room] {
        &self.rooms
    }

    /// Iterate in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Room> {
        self.rooms.iter()
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Sum of all room areas
    pub fn total_area(&self) -> SqFt {
        self.rooms.iter().fold(SqFt(0.0), |sum, room| sum + room.area())
    }

    fn renumber(&mut self) {
        for (index, room) in self.rooms.iter_mut().enumerate() {
            room.position = index as u32 + 1;
        }
    }
}

impl TryFrom<Vec<Room>> for RoomList {
    type Error = SurveyError;

    /// Check loaded rooms the way edits are checked, then rebuild areas and
    /// positions from the dimensions.
    fn try_from(mut rooms: Vec<Room>) -> SurveyResult<Self> {
        let mut seen = HashSet::new();
        for room in &mut rooms {
            if !seen.insert(room.id) {
                return Err(SurveyError::invalid_input(
                    "rooms.id",
                    room.id.to_string(),
                    "Duplicate room id",
                ));
            }
            check_dimension("width_ft", room.width_ft)?;
            check_dimension("length_ft", room.length_ft)?;
            check_dimension("ceiling_height_ft", room.ceiling_height_ft)?;
            for part in &mut room.parts {
                part.revalidate()?;
            }
            room.recompute_area();
        }

        let mut list = RoomList { rooms };
        list.renumber();
        Ok(list)
    }
}

impl From<RoomList> for Vec<Room> {
    fn from(list: RoomList) -> Self {
        list.rooms
    }
}

impl<'a> IntoIterator for &'a RoomList {
    type Item = &'a Room;
    type IntoIter = std::slice::Iter<'a, Room>;

    fn into_iter(self) -> Self::IntoIter {
        self.rooms.iter()
    }
}
