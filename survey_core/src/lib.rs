//! # survey_core - Property Measurement Survey Engine
//!
//! `survey_core` is the engine behind Home Surveyor: a step-by-step wizard
//! that collects project, room, contact and interior-design data, prices the
//! chosen finishes, and prints a measurement certificate. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Single owner**: [`wizard::Wizard`] owns the survey; callers read a view
//!   and send typed edits
//! - **Always consistent**: areas and prices are recomputed at the point of
//!   mutation, never lazily
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use survey_core::materials::{FlooringMaterial, WallMaterial};
//! use survey_core::rooms::RoomEdit;
//! use survey_core::wizard::Wizard;
//!
//! let mut wizard = Wizard::new();
//! let room = wizard.add_room();
//! wizard.update_room(room, RoomEdit::Width(10.0)).unwrap();
//! wizard.update_room(room, RoomEdit::Length(12.0)).unwrap();
//! wizard.update_room(room, RoomEdit::Flooring(Some(FlooringMaterial::Hardwood))).unwrap();
//! wizard.update_room(room, RoomEdit::Walls(Some(WallMaterial::Drywall))).unwrap();
//!
//! assert_eq!(wizard.pricing().materials_cost, 1140.0);
//! ```
//!
//! ## Modules
//!
//! - [`wizard`] - Step state machine and the owner of all survey data
//! - [`validation`] - Required-field checks for each step
//! - [`project`] - Survey container, project details and metadata
//! - [`rooms`] - Rooms, room parts and area bookkeeping
//! - [`interior`] - Furniture package, wall colour and lighting choices
//! - [`contacts`] - Creator and customer details
//! - [`materials`] - Selectable finishes and price tables
//! - [`pricing`] - Cost estimate
//! - [`certificate`] - Plain-text certificate and export
//! - [`settings`] - Display preferences
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic writes, survey snapshots and settings files

pub mod certificate;
pub mod contacts;
pub mod errors;
pub mod file_io;
pub mod interior;
pub mod materials;
pub mod pricing;
pub mod project;
pub mod rooms;
pub mod settings;
pub mod units;
pub mod validation;
pub mod wizard;

// Re-export commonly used types at crate root for convenience
pub use certificate::{Certificate, CertificateNumber};
pub use errors::{SurveyError, SurveyResult};
pub use file_io::{load_survey, save_survey};
pub use pricing::PricingSummary;
pub use project::{Project, SurveyData};
pub use settings::AppSettings;
pub use wizard::{Step, Wizard};
