//!  Amadeus Travel Tools
//!
//!  Copyright (C) 2026  Mamy Ratsimbazafy
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Input checks shared by the tool parameter structs. All of them run before
//! a request is built.

use crate::error::{AmadeusError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

pub(crate) fn required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AmadeusError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Zero-padded `YYYY-MM-DD`; the raw string is what goes upstream
pub(crate) fn date(field: &str, value: &str) -> Result<NaiveDate> {
    required(field, value)?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .filter(|d| d.format("%Y-%m-%d").to_string() == value)
        .ok_or_else(|| {
            AmadeusError::validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
        })
}

pub(crate) fn optional_date(field: &str, value: Option<&str>) -> Result<()> {
    if let Some(v) = value {
        date(field, v)?;
    }
    Ok(())
}

/// Zero-padded `HH:MM` or `HH:MM:SS`
pub(crate) fn time(field: &str, value: &str) -> Result<NaiveTime> {
    required(field, value)?;
    ["%H:%M:%S", "%H:%M"]
        .into_iter()
        .find_map(|fmt| {
            NaiveTime::parse_from_str(value, fmt)
                .ok()
                .filter(|t| t.format(fmt).to_string() == value)
        })
        .ok_or_else(|| {
            AmadeusError::validation(format!("{field} must be HH:MM or HH:MM:SS, got '{value}'"))
        })
}

pub(crate) fn year(field: &str, value: &str) -> Result<()> {
    required(field, value)?;
    if value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AmadeusError::validation(format!(
            "{field} must be a four digit year, got '{value}'"
        )));
    }
    Ok(())
}

pub(crate) fn at_least_one(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(AmadeusError::validation(format!("{field} must be at least 1")));
    }
    Ok(())
}

pub(crate) fn latitude(field: &str, value: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&value) {
        return Err(AmadeusError::validation(format!(
            "{field} must be within [-90, 90], got {value}"
        )));
    }
    Ok(())
}

pub(crate) fn longitude(field: &str, value: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&value) {
        return Err(AmadeusError::validation(format!(
            "{field} must be within [-180, 180], got {value}"
        )));
    }
    Ok(())
}

/// Accept a JSON value, or a string holding one (what most agents send)
pub(crate) fn json_payload(field: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Null => Err(AmadeusError::validation(format!("{field} is required"))),
        Value::String(s) => {
            required(field, s)?;
            serde_json::from_str(s)
                .map_err(|e| AmadeusError::validation(format!("{field} is not valid JSON: {e}")))
        }
        other => Ok(other.clone()),
    }
}

pub(crate) fn json_object(field: &str, value: &Value) -> Result<Value> {
    let parsed = json_payload(field, value)?;
    if !parsed.is_object() {
        return Err(AmadeusError::validation(format!("{field} must be a JSON object")));
    }
    Ok(parsed)
}

pub(crate) fn json_array(field: &str, value: &Value) -> Result<Vec<Value>> {
    match json_payload(field, value)? {
        Value::Array(items) => Ok(items),
        _ => Err(AmadeusError::validation(format!("{field} must be a JSON array"))),
    }
}

pub(crate) fn base64(field: &str, value: &str) -> Result<()> {
    required(field, value)?;
    STANDARD
        .decode(value.trim())
        .map(|_| ())
        .map_err(|e| AmadeusError::validation(format!("{field} is not valid base64: {e}")))
}
