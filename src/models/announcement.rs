use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An announcement as it sits in the store. Dates are ISO strings.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AnnouncementDocument {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub end_date: String,
}

/// Field values written on create and on update (full replace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub start_date: Option<String>,
    pub end_date: String,
}

/// Response shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub message: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
}

/// Body of POST /announcements and PUT /announcements/{id}.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_date_range"))]
pub struct AnnouncementPayload {
    #[validate(length(min = 1, max = 120, message = "must be between 1 and 120 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 800, message = "must be between 1 and 800 characters"))]
    pub message: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
}

/// Years outside 1..=9999 would not format as `YYYY-MM-DD` and would break
/// the byte-order comparisons the stores rely on.
fn has_four_digit_year(date: NaiveDate) -> bool {
    (1..=9999).contains(&date.year())
}

fn validate_date_range(payload: &AnnouncementPayload) -> Result<(), ValidationError> {
    let mut dates = payload.start_date.into_iter().chain([payload.end_date]);
    if !dates.all(has_four_digit_year) {
        return Err(ValidationError::new("date_year")
            .with_message("Dates must have a year between 1 and 9999".into()));
    }

    match payload.start_date {
        Some(start) if payload.end_date < start => Err(ValidationError::new("date_range")
            .with_message("End date cannot be before start date".into())),
        _ => Ok(()),
    }
}

impl AnnouncementPayload {
    /// Trims the text fields, checks every field constraint and converts
    /// the result into the stored shape.
    pub fn into_document(self) -> Result<NewAnnouncement, AppError> {
        let payload = Self {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            ..self
        };
        payload.validate()?;

        Ok(NewAnnouncement {
            title: payload.title,
            message: payload.message,
            start_date: payload.start_date.map(format_date),
            end_date: format_date(payload.end_date),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListAnnouncementsQuery {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_expired: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_future: bool,
}

/// Query-string boolean: accepts 1/0, true/false, t/f, yes/no, y/n and
/// on/off in any case.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(de::Error::custom(format!("invalid boolean value: {raw:?}"))),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

impl TryFrom<AnnouncementDocument> for Announcement {
    type Error = AppError;

    /// A stored date that no longer parses is treated as corruption.
    fn try_from(doc: AnnouncementDocument) -> Result<Self, Self::Error> {
        let id = doc.id;
        let corrupt = |field: &str, raw: &str| {
            AppError::Internal(format!("Announcement {id} has a malformed {field}: {raw:?}"))
        };

        let start_date = match doc.start_date.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(parse_stored_date(raw).ok_or_else(|| corrupt("start_date", raw))?),
        };
        let end_date =
            parse_stored_date(&doc.end_date).ok_or_else(|| corrupt("end_date", &doc.end_date))?;

        Ok(Self {
            id: id.to_string(),
            title: doc.title,
            message: doc.message,
            start_date,
            end_date,
        })
    }
}
