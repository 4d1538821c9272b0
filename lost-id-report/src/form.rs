use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use face_capture_core::CapturedImage;

use crate::id_number;

/// Reasons a report cannot be submitted yet. The messages are shown to the
/// user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Please fill in the {0} field.")]
    MissingField(&'static str),

    #[error("Please capture your selfie before submitting.")]
    MissingSelfie,

    #[error("Invalid South African ID number. Must be exactly 13 digits.")]
    InvalidIdNumber,

    #[error("failed to serialize report: {0}")]
    Serialization(String),
}

/// Editable fields of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Name,
    Surname,
    IdNumber,
    Reason,
    DateLost,
}

impl ReportField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "first name",
            Self::Surname => "surname",
            Self::IdNumber => "ID number",
            Self::Reason => "reason for loss",
            Self::DateLost => "date lost",
        }
    }
}

/// A lost identity document report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostIdReport {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub reason: String,
    pub date_lost: Option<NaiveDate>,
    /// `data:image/jpeg;base64,...` of the verified selfie.
    pub selfie_base64: Option<String>,
}

impl LostIdReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one keystroke-level edit. Returns `false`, leaving the field
    /// unchanged, if the value is rejected.
    pub fn apply_input(&mut self, field: ReportField, value: &str) -> bool {
        match field {
            ReportField::Name => self.name = value.to_string(),
            ReportField::Surname => self.surname = value.to_string(),
            ReportField::Reason => self.reason = value.to_string(),
            ReportField::IdNumber => {
                if !id_number::accepts_input(value) {
                    log::debug!("rejected id number input of {} chars", value.chars().count());
                    return false;
                }
                self.id_number = value.to_string();
            }
            ReportField::DateLost => {
                if value.is_empty() {
                    self.date_lost = None;
                } else {
                    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
                        Ok(date) => self.date_lost = Some(date),
                        Err(_) => return false,
                    }
                }
            }
        }
        true
    }

    /// Take ownership of the captured selfie and store it as a data URL.
    pub fn attach_selfie(&mut self, image: CapturedImage) {
        log::info!("attaching selfie ({} bytes)", image.encoded_bytes.len());
        self.selfie_base64 = Some(image.to_data_url());
    }

    pub fn has_selfie(&self) -> bool {
        self.selfie_base64.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn validate_for_submission(&self) -> Result<(), ReportError> {
        let required = [
            (ReportField::Name, self.name.trim().is_empty()),
            (ReportField::Surname, self.surname.trim().is_empty()),
            (ReportField::IdNumber, self.id_number.is_empty()),
            (ReportField::Reason, self.reason.trim().is_empty()),
            (ReportField::DateLost, self.date_lost.is_none()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(ReportError::MissingField(field.label()));
        }
        if !self.has_selfie() {
            return Err(ReportError::MissingSelfie);
        }
        if !id_number::is_valid(&self.id_number) {
            return Err(ReportError::InvalidIdNumber);
        }
        Ok(())
    }

    /// JSON body for the persistence service.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|e| ReportError::Serialization(e.to_string()))
    }
}
