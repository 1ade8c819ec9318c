//! Validation of raw API payloads.
//!
//! [`check_response`] is a pure function from a decoded [`serde_json::Value`]
//! to a [`CheckedResponse`], so the whole contract is unit-testable with
//! literal JSON fixtures. Each way a payload can be wrong maps to a distinct
//! [`ResponseError`] kind.

use serde_json::Value;

use super::error::ResponseError;
use super::types::{CheckedResponse, Homework};

/// The key holding the record list.
const RECORDS_FIELD: &str = "homeworks";

/// The canonical forward-cursor field. Earlier API revisions drifted between
/// `current_date` and `timestamp`; this client only honors `current_date`,
/// and its absence means "cursor unchanged".
const CURSOR_FIELD: &str = "current_date";

/// Validate a decoded payload and extract the record list and cursor.
pub fn check_response(raw: &Value) -> Result<CheckedResponse, ResponseError> {
    if raw.is_null() {
        return Err(ResponseError::Empty);
    }

    let object = raw
        .as_object()
        .ok_or_else(|| ResponseError::Malformed(format!("expected an object, got {raw}")))?;
    if object.is_empty() {
        return Err(ResponseError::Empty);
    }

    let records = object
        .get(RECORDS_FIELD)
        .ok_or(ResponseError::MissingField(RECORDS_FIELD))?;
    let records = records.as_array().ok_or_else(|| {
        ResponseError::Malformed(format!("{RECORDS_FIELD} is not an array: {records}"))
    })?;

    let homeworks = records
        .iter()
        .map(|entry| {
            serde_json::from_value::<Homework>(entry.clone())
                .map_err(|e| ResponseError::Malformed(format!("bad homework record: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let current_date = object.get(CURSOR_FIELD).and_then(Value::as_i64);

    Ok(CheckedResponse {
        homeworks,
        current_date,
    })
}
