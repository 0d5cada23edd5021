//! # Pricing
//!
//! Turns the room list and interior choices into a cost estimate.
//!
//! [`calculate`] is a pure function. It recomputes everything from the
//! inputs it is given and keeps no state between calls, so its output is
//! always consistent with the current rooms and choices.
//!
//! ## Formulas
//!
//! | Quantity            | Formula |
//! |---------------------|---------|
//! | flooring cost       | flooring price × room area |
//! | wall cost           | wall price × room area × [`WALL_COST_FACTOR`] |
//! | materials cost      | Σ (flooring cost + wall cost) over rooms |
//! | interior cost       | package price × Σ room area (0 without a package) |
//! | total               | materials cost + interior cost |
//! | base cost per sq ft | total ÷ Σ room area (0 when the area is 0) |
//!
//! Wall cost applies the wall rate to the room's *floor* area. This is a
//! modelling simplification, not a wall-surface computation.
//!
//! ## Example
//!
//! ```rust
//! use survey_core::interior::InteriorChoices;
//! use survey_core::materials::{FlooringMaterial, FurniturePackage, WallMaterial};
//! use survey_core::pricing::calculate;
//! use survey_core::rooms::{RoomEdit, RoomList};
//!
//! let mut rooms = RoomList::new();
//! let id = rooms.add();
//! rooms.update(id, RoomEdit::Width(10.0)).unwrap();
//! rooms.update(id, RoomEdit::Length(12.0)).unwrap();
//! rooms.update(id, RoomEdit::Flooring(Some(FlooringMaterial::Hardwood))).unwrap();
//! rooms.update(id, RoomEdit::Walls(Some(WallMaterial::Drywall))).unwrap();
//!
//! let interior = InteriorChoices {
//!     furniture_package: Some(FurniturePackage::Premium),
//!     ..InteriorChoices::default()
//! };
//!
//! let summary = calculate(rooms.as_slice(), &interior);
//! assert_eq!(summary.materials_cost, 1140.0);
//! assert_eq!(summary.interior_cost, 3000.0);
//! assert_eq!(summary.total, 4140.0);
//! assert_eq!(summary.base_cost_per_sqft, 34.5);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::interior::InteriorChoices;
use crate::materials::{FLOORING_PRICES, PACKAGE_PRICES, WALL_PRICES};
use crate::rooms::Room;

/// Wall cost weighting relative to the flooring basis. Fixed.
pub const WALL_COST_FACTOR: f64 = 0.5;

/// Derived cost breakdown for the whole survey (dollars)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PricingSummary {
    pub materials_cost: f64,
    pub interior_cost: f64,
    pub base_cost_per_sqft: f64,
    pub total: f64,
}

/// Cost of one room's finishes (dollars)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCost {
    pub room_id: Uuid,
    pub flooring_cost: f64,
    pub wall_cost: f64,
    pub total: f64,
    /// `total / area`, 0 for a zero-area room
    pub cost_per_sqft: f64,
}

/// Price one room's flooring and walls.
pub fn room_cost(room: &Room) -> RoomCost {
    let area = room.area_sqft;
    let flooring_cost = FLOORING_PRICES.price(room.flooring) * area;
    let wall_cost = WALL_PRICES.price(room.walls) * area * WALL_COST_FACTOR;
    let total = flooring_cost + wall_cost;

    RoomCost {
        room_id: room.id,
        flooring_cost,
        wall_cost,
        total,
        cost_per_sqft: per_sqft(total, area),
    }
}

/// Per-room breakdown in list order
pub fn room_costs(rooms: &[Room]) -> Vec<RoomCost> {
    rooms.iter().map(room_cost).collect()
}

/// Compute the pricing summary from scratch.
pub fn calculate(rooms: &[Room], interior: &InteriorChoices) -> PricingSummary {
    let total_area: f64 = rooms.iter().map(|room| room.area_sqft).sum();
    let materials_cost: f64 = rooms.iter().map(|room| room_cost(room).total).sum();
    let interior_cost = PACKAGE_PRICES.price(interior.furniture_package) * total_area;
    let total = materials_cost + interior_cost;

    PricingSummary {
        materials_cost,
        interior_cost,
        base_cost_per_sqft: per_sqft(total, total_area),
        total,
    }
}

fn per_sqft(cost: f64, area: f64) -> f64 {
    if area > 0.0 {
        cost / area
    } else {
        0.0
    }
}
