//! # Measurement Certificate
//!
//! Plain-text certificate assembled from the final survey and pricing.
//!
//! ## Layout
//!
//! ```text
//! PROPERTY MEASUREMENT CERTIFICATE
//!
//! Certificate #: HSC-2026-K3J9QZ
//! Date: October 19, 2026
//!
//! PROJECT DETAILS:
//! Project Name: Test
//! Property Owner: Jane Doe
//! Property Address: 1 Main St
//! Property Type: House
//!
//! ROOM MEASUREMENTS:
//! Living Room: 10' x 12' = 120.0 sq ft
//!
//! SUMMARY:
//! Total Rooms: 1
//! Total Area: 120.0 square feet
//! Total Project Cost: $4,140
//! Cost per Square Foot: $34.50
//!
//! Certified by Home Surveyor
//! Generated on October 19, 2026
//! ```
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use survey_core::certificate::Certificate;
//! use survey_core::wizard::Wizard;
//!
//! let wizard = Wizard::new();
//! let issued_on = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let certificate = Certificate::issue(wizard.data(), wizard.pricing(), issued_on).unwrap();
//!
//! assert!(certificate.number.as_str().starts_with("HSC-2026-"));
//! assert!(certificate.render_text().contains("Date: October 19, 2026"));
//! ```

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{SurveyError, SurveyResult};
use crate::file_io;
use crate::pricing::PricingSummary;
use crate::project::{Project, SurveyData};
use crate::rooms::Room;

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 6;
/// Bytes at or above this are discarded so `b % 36` stays uniform
const SUFFIX_REJECT_AT: u8 = 252;

/// Certificate identifier, `HSC-{year}-{6 chars of 0-9A-Z}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateNumber(String);

impl CertificateNumber {
    /// Draw a fresh number from the OS random source
    pub fn generate(year: i32) -> SurveyResult<Self> {
        let mut suffix = String::with_capacity(SUFFIX_LEN);
        let mut buf = [0u8; 16];

        while suffix.len() < SUFFIX_LEN {
            getrandom::fill(&mut buf).map_err(|e| SurveyError::Internal {
                message: format!("Random source unavailable: {e}"),
            })?;
            for &byte in buf.iter().filter(|&&b| b < SUFFIX_REJECT_AT) {
                if suffix.len() == SUFFIX_LEN {
                    break;
                }
                suffix.push(char::from(SUFFIX_ALPHABET[usize::from(byte % 36)]));
            }
        }

        Ok(CertificateNumber(format!("HSC-{year}-{suffix}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CertificateNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of a finished survey, ready to print
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub number: CertificateNumber,
    pub issued_on: NaiveDate,
    pub project: Project,
    pub rooms: Vec<Room>,
    pub total_area_sqft: f64,
    pub pricing: PricingSummary,
}

impl Certificate {
    /// Issue a certificate with a freshly generated number
    pub fn issue(data: &SurveyData, pricing: &PricingSummary, issued_on: NaiveDate) -> SurveyResult<Self> {
        let number = CertificateNumber::generate(issued_on.year())?;
        Ok(Certificate::with_number(number, data, pricing, issued_on))
    }

    pub fn with_number(
        number: CertificateNumber,
        data: &SurveyData,
        pricing: &PricingSummary,
        issued_on: NaiveDate,
    ) -> Self {
        Certificate {
            number,
            issued_on,
            project: data.project.clone(),
            rooms: data.rooms.as_slice().to_vec(),
            total_area_sqft: data.rooms.total_area().value(),
            pricing: *pricing,
        }
    }

    /// Long-form issue date, e.g. "October 19, 2026"
    pub fn date_text(&self) -> String {
        self.issued_on.format("%B %-d, %Y").to_string()
    }

    /// The downloadable file name
    pub fn file_name(&self) -> String {
        let name: String = self
            .project
            .name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        format!("{name}-Certificate.txt")
    }

    pub fn render_text(&self) -> String {
        let date = self.date_text();
        let property_type = self
            .project
            .property_type
            .map(|t| t.display_name())
            .unwrap_or_default();

        let mut text = format!(
            "PROPERTY MEASUREMENT CERTIFICATE\n\
             \n\
             Certificate #: {number}\n\
             Date: {date}\n\
             \n\
             PROJECT DETAILS:\n\
             Project Name: {name}\n\
             Property Owner: {owner}\n\
             Property Address: {address}\n\
             Property Type: {property_type}\n\
             \n\
             ROOM MEASUREMENTS:\n",
            number = self.number,
            name = self.project.name,
            owner = self.project.owner,
            address = self.project.address,
        );

        for room in &self.rooms {
            text.push_str(&format!(
                "{}: {}' x {}' = {:.1} sq ft\n",
                room.label(),
                room.width_ft,
                room.length_ft,
                room.area_sqft
            ));
        }

        text.push_str(&format!(
            "\n\
             SUMMARY:\n\
             Total Rooms: {rooms}\n\
             Total Area: {area:.1} square feet\n\
             Total Project Cost: ${total}\n\
             Cost per Square Foot: ${per_sqft:.2}\n\
             \n\
             Certified by Home Surveyor\n\
             Generated on {date}",
            rooms = self.rooms.len(),
            area = self.total_area_sqft,
            total = format_thousands(self.pricing.total),
            per_sqft = self.pricing.base_cost_per_sqft,
        ));

        text
    }

    /// Write the certificate text into `dir` and return the file's path
    pub fn export(&self, dir: &Path) -> SurveyResult<PathBuf> {
        let path = dir.join(self.file_name());
        file_io::write_text_atomic(&path, &self.render_text())?;
        info!(number = %self.number, path = %path.display(), "certificate exported");
        Ok(path)
    }
}

/// Group the integer part with commas and keep up to three fraction
/// digits, dropping trailing zeros: `4140.0` → `4,140`, `1234.5` → `1,234.5`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if value < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9')) {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interior::InteriorChoices;
    use crate::materials::{FlooringMaterial, FurniturePackage, WallMaterial};
    use crate::pricing;
    use crate::project::PropertyType;
    use crate::rooms::RoomEdit;
    use pretty_assertions::assert_eq;

    fn reference_survey() -> (SurveyData, PricingSummary) {
        let mut data = SurveyData::new();
        data.project = Project::new("Test", "Jane Doe", "1 Main St", PropertyType::House);
        let id = data.rooms.add();
        data.rooms.update(id, RoomEdit::Name("Living Room".into())).unwrap();
        data.rooms.update(id, RoomEdit::Width(10.0)).unwrap();
        data.rooms.update(id, RoomEdit::Length(12.0)).unwrap();
        data.rooms.update(id, RoomEdit::Flooring(Some(FlooringMaterial::Hardwood))).unwrap();
        data.rooms.update(id, RoomEdit::Walls(Some(WallMaterial::Drywall))).unwrap();
        data.interior = InteriorChoices {
            furniture_package: Some(FurniturePackage::Premium),
            ..InteriorChoices::default()
        };
        let summary = pricing::calculate(data.rooms.as_slice(), &data.interior);
        (data, summary)
    }

    fn issued_on() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_number_format() {
        for _ in 0..50 {
            let number = CertificateNumber::generate(2026).unwrap();
            let text = number.as_str();
            assert_eq!(text.len(), "HSC-2026-".len() + SUFFIX_LEN);
            let suffix = text.strip_prefix("HSC-2026-").unwrap();
            assert!(suffix.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_numbers_differ() {
        let a = CertificateNumber::generate(2026).unwrap();
        let b = CertificateNumber::generate(2026).unwrap();
        let c = CertificateNumber::generate(2026).unwrap();
        assert!(a != b || b != c);
    }

    #[test]
    fn test_render_reference_certificate() {
        let (data, summary) = reference_survey();
        let certificate = Certificate::with_number(
            CertificateNumber("HSC-2026-K3J9QZ".to_string()),
            &data,
            &summary,
            issued_on(),
        );

        let expected = "PROPERTY MEASUREMENT CERTIFICATE

Certificate #: HSC-2026-K3J9QZ
Date: October 19, 2026

PROJECT DETAILS:
Project Name: Test
Property Owner: Jane Doe
Property Address: 1 Main St
Property Type: House

ROOM MEASUREMENTS:
Living Room: 10' x 12' = 120.0 sq ft

SUMMARY:
Total Rooms: 1
Total Area: 120.0 square feet
Total Project Cost: $4,140
Cost per Square Foot: $34.50

Certified by Home Surveyor
Generated on October 19, 2026";

        assert_eq!(certificate.render_text(), expected);
        assert_eq!(certificate.file_name(), "Test-Certificate.txt");
    }

    #[test]
    fn test_fractional_dimensions_and_unnamed_rooms() {
        let mut data = SurveyData::new();
        let id = data.rooms.add();
        data.rooms.update(id, RoomEdit::Width(10.5)).unwrap();
        data.rooms.update(id, RoomEdit::Length(3.0)).unwrap();
        let summary = pricing::calculate(data.rooms.as_slice(), &data.interior);

        let text = Certificate::issue(&data, &summary, issued_on()).unwrap().render_text();
        assert!(text.contains("Room 1: 10.5' x 3' = 31.5 sq ft"));
        assert!(text.contains("Property Type: \n"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(4140.0), "4,140");
        assert_eq!(format_thousands(999.5), "999.5");
        assert_eq!(format_thousands(1234567.891), "1,234,567.891");
        assert_eq!(format_thousands(1000.0004), "1,000");
        assert_eq!(format_thousands(123456.789), "123,456.789");
        assert_eq!(format_thousands(-2500.25), "-2,500.25");
    }

    #[test]
    fn test_file_name_strips_separators() {
        let (mut data, summary) = reference_survey();
        data.project.name = "Flat 2/B".to_string();
        let certificate = Certificate::issue(&data, &summary, issued_on()).unwrap();
        assert_eq!(certificate.file_name(), "Flat 2-B-Certificate.txt");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = std::env::temp_dir().join(format!("survey_core_cert_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let (data, summary) = reference_survey();
        let certificate = Certificate::issue(&data, &summary, issued_on()).unwrap();
        let path = certificate.export(&dir).unwrap();

        assert_eq!(path, dir.join("Test-Certificate.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), certificate.render_text());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let (data, summary) = reference_survey();
        let certificate = Certificate::issue(&data, &summary, issued_on()).unwrap();
        let err = certificate.export(Path::new("/nonexistent/certificates")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
