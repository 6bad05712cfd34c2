use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use super::{FormErrors, required};
use crate::services::show::ShowInput;

const START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    /// An empty form with the start time defaulted to `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<ShowInput, FormErrors> {
        let mut errors = FormErrors::default();

        let artist_id = positive_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = positive_id(&mut errors, "venue_id", &self.venue_id);

        let raw = required(&mut errors, "start_time", &self.start_time);
        let start_time = if raw.is_empty() {
            None
        } else {
            let parsed = parse_start_time(&raw);
            if parsed.is_none() {
                errors.push("start_time", "Not a valid datetime value.");
            }
            parsed
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowInput {
                    venue_id,
                    artist_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }
}

fn positive_id(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<i64> {
    let value = required(errors, field, value);
    if value.is_empty() {
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push(field, "Must be a positive whole number.");
            None
        }
    }
}

/// Accepts RFC 3339 or a naive date and time, which is taken as UTC.
pub fn parse_start_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
