//! # File I/O Module
//!
//! Writes certificates, survey snapshots and settings to disk.
//!
//! - **Atomic writes**: write to `<path>.tmp`, fsync, rename over the target
//! - **Version validation**: snapshots from an incompatible schema are refused
//!
//! Snapshots are optional. A wizard session never needs them; they only let
//! a front end pause and resume.
//!
//! ## Example
//!
//! ```rust,no_run
//! use survey_core::file_io::{load_survey, save_survey};
//! use survey_core::project::SurveyData;
//! use std::path::Path;
//!
//! let survey = SurveyData::new();
//! let path = Path::new("survey.json");
//!
//! save_survey(&survey, path).unwrap();
//! let loaded = load_survey(path).unwrap();
//! assert_eq!(loaded.meta.version, survey.meta.version);
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::errors::{SurveyError, SurveyResult};
use crate::project::{SurveyData, SCHEMA_VERSION};
use crate::settings::AppSettings;

/// Temporary sibling used while writing `path`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write text to a file with atomic write semantics.
///
/// The write process:
/// 1. Write to a temporary file (`<path>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename the temporary file over `path`
///
/// An interrupted write never leaves a half-written target behind.
pub fn write_text_atomic(path: &Path, contents: &str) -> SurveyResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        SurveyError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        SurveyError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        SurveyError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SurveyError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> SurveyResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SurveyError::SerializationError {
        reason: e.to_string(),
    })?;
    write_text_atomic(path, &json)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SurveyResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SurveyError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| SurveyError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Save a survey snapshot as pretty JSON.
///
/// # Example
///
/// ```rust,no_run
/// use survey_core::file_io::save_survey;
/// use survey_core::project::SurveyData;
/// use std::path::Path;
///
/// save_survey(&SurveyData::new(), Path::new("survey.json"))?;
/// # Ok::<(), survey_core::errors::SurveyError>(())
/// ```
pub fn save_survey(survey: &SurveyData, path: &Path) -> SurveyResult<()> {
    write_json(survey, path)?;
    info!(path = %path.display(), rooms = survey.rooms.len(), "survey saved");
    Ok(())
}

/// Load a survey snapshot.
///
/// # Returns
///
/// * `Ok(SurveyData)` - Successfully loaded survey
/// * `Err(SurveyError::VersionMismatch)` - File version is incompatible
/// * `Err(SurveyError::SerializationError)` - Invalid JSON, or rooms that
///   fail the dimension and id checks
/// * `Err(SurveyError::InvalidInput)` - Lighting level out of range
/// * `Err(SurveyError::FileError)` - I/O error
pub fn load_survey(path: &Path) -> SurveyResult<SurveyData> {
    let survey: SurveyData = read_json(path)?;
    validate_version(&survey.meta.version)?;
    survey.interior.validate()?;
    info!(path = %path.display(), rooms = survey.rooms.len(), "survey loaded");
    Ok(survey)
}

pub fn load_settings(path: &Path) -> SurveyResult<AppSettings> {
    let settings: AppSettings = read_json(path)?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings(settings: &AppSettings, path: &Path) -> SurveyResult<()> {
    write_json(settings, path)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> SurveyResult<()> {
    let mismatch = || SurveyError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Project, PropertyType};
    use crate::rooms::{NewRoomPart, RoomEdit};
    use crate::settings::{SettingsEdit, UnitSystem};
    use pretty_assertions::assert_eq;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("survey_core_test_{}.json", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/out/Test-Certificate.txt")),
            Path::new("/out/Test-Certificate.txt.tmp")
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");

        let mut survey = SurveyData::new();
        survey.project = Project::new("Test", "Jane Doe", "1 Main St", PropertyType::House);
        let id = survey.rooms.add();
        survey.rooms.update(id, RoomEdit::Width(5.0)).unwrap();
        survey.rooms.update(id, RoomEdit::Length(4.0)).unwrap();
        survey.rooms.add_part(id, NewRoomPart::add("Bay window", 3.0, 1.0)).unwrap();

        save_survey(&survey, &path).unwrap();
        let loaded = load_survey(&path).unwrap();
        assert_eq!(loaded, survey);
        assert_eq!(loaded.rooms.get(id).unwrap().area_sqft, 23.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");

        write_text_atomic(&path, "hello").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_survey(Path::new("/nonexistent/path/survey.json"));
        assert!(matches!(result, Err(SurveyError::FileError { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_path("invalid");
        fs::write(&path, "{ not json").unwrap();

        let result = load_survey(&path);
        assert!(matches!(result, Err(SurveyError::SerializationError { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_snapshot_rejected() {
        let path = temp_path("newer");
        let mut survey = SurveyData::new();
        survey.meta.version = "0.9.0".to_string();
        save_survey(&survey, &path).unwrap();

        let result = load_survey(&path);
        assert!(matches!(result, Err(SurveyError::VersionMismatch { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    fn edited_snapshot(name: &str, edit: impl FnOnce(&mut serde_json::Value)) -> PathBuf {
        let mut survey = SurveyData::new();
        let id = survey.rooms.add();
        survey.rooms.update(id, RoomEdit::Width(5.0)).unwrap();
        survey.rooms.update(id, RoomEdit::Length(4.0)).unwrap();
        survey.rooms.add_part(id, NewRoomPart::add("Bay window", 3.0, 1.0)).unwrap();

        let mut json = serde_json::to_value(&survey).unwrap();
        edit(&mut json);
        let path = temp_path(name);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_rejects_negative_width() {
        let path = edited_snapshot("negative_width", |json| {
            json["rooms"][0]["width_ft"] = serde_json::json!(-5.0);
        });

        let result = load_survey(&path);
        assert!(matches!(result, Err(SurveyError::SerializationError { .. })));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rebuilds_part_area() {
        let path = edited_snapshot("part_area", |json| {
            json["rooms"][0]["parts"][0]["area_sqft"] = serde_json::json!(400.0);
        });

        let loaded = load_survey(&path).unwrap();
        let room = &loaded.rooms.as_slice()[0];
        assert_eq!(room.parts[0].area_sqft, 3.0);
        assert_eq!(room.area_sqft, 23.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_duplicate_room_ids() {
        let path = edited_snapshot("duplicate_ids", |json| {
            let room = json["rooms"][0].clone();
            if let Some(rooms) = json["rooms"].as_array_mut() {
                rooms.push(room);
            }
        });

        assert!(load_survey(&path).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_lighting_out_of_range() {
        let path = edited_snapshot("lighting", |json| {
            json["interior"]["lighting_ambiance_percent"] = serde_json::json!(255);
        });

        let err = load_survey(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_settings_rejects_precision_out_of_range() {
        let path = temp_path("settings_precision");
        fs::write(&path, r#"{"decimal_precision": 200}"#).unwrap();

        let err = load_settings(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(AppSettings::load_or_default(&path).is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_roundtrip() {
        let path = temp_path("settings");
        let mut settings = AppSettings::default();
        settings.apply(SettingsEdit::Units(UnitSystem::Metric)).unwrap();

        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        assert_eq!(AppSettings::load_or_default(&path).unwrap(), settings);

        let _ = fs::remove_file(&path);
    }
}
