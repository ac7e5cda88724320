//! Form field coercion for `registerProject`
//!
//! Field names match the upload form. Values are coerced the way the contract
//! ABI needs them: hectares as an unsigned integer, start date as whole
//! seconds since the Unix epoch (UTC midnight for a bare calendar date).

use chrono::{DateTime, NaiveDate};
use std::collections::HashMap;

use crate::common::{Error, Result};
use crate::contract::RegisterProject;

pub const PROJECT_NAME: &str = "projectName";
pub const LOCATION: &str = "location";
pub const IMPLEMENTING_BODY: &str = "implementingBody";
pub const AREA_HECTARES: &str = "areaHectares";
pub const START_DATE: &str = "startDate";
pub const PROJECT_TYPE: &str = "projectType";

/// Every form field, in `registerProject` argument order
pub const FORM_FIELDS: [&str; 6] = [
    PROJECT_NAME,
    LOCATION,
    IMPLEMENTING_BODY,
    AREA_HECTARES,
    START_DATE,
    PROJECT_TYPE,
];

/// Raw values of one form post
#[derive(Debug, Clone, Default)]
pub struct SubmissionFields {
    values: HashMap<String, String>,
}

impl SubmissionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first value for a name is kept; repeats are ignored.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn required(&self, name: &'static str) -> Result<&str> {
        match self.get(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(Error::MissingField(name)),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmissionFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl RegisterProject {
    /// Coerce a form post into contract call arguments.
    pub fn from_fields(fields: &SubmissionFields) -> Result<Self> {
        Ok(Self {
            project_name: fields.required(PROJECT_NAME)?.to_string(),
            location: fields.required(LOCATION)?.to_string(),
            implementing_body: fields.required(IMPLEMENTING_BODY)?.to_string(),
            area_hectares: parse_area_hectares(fields.required(AREA_HECTARES)?)?,
            start_date: parse_start_date(fields.required(START_DATE)?)?,
            project_type: fields.required(PROJECT_TYPE)?.to_string(),
        })
    }
}

/// Parse a hectare count. Integral floats such as `120.0` are accepted.
pub fn parse_area_hectares(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u64>() {
        return Ok(value);
    }

    let invalid = |reason: &str| Error::InvalidField {
        field: AREA_HECTARES,
        reason: format!("{} ({:?})", reason, raw),
    };

    let value = raw
        .parse::<f64>()
        .map_err(|_| invalid("not a number"))?;
    if !value.is_finite() {
        return Err(invalid("not a finite number"));
    }
    if value < 0.0 {
        return Err(invalid("must not be negative"));
    }
    if value.fract() != 0.0 {
        return Err(invalid("must be a whole number"));
    }
    // `u64::MAX as f64` rounds up to 2^64, which is itself out of range.
    if value >= u64::MAX as f64 {
        return Err(invalid("too large"));
    }
    Ok(value as u64)
}

/// Convert `YYYY-MM-DD` (UTC midnight) or an RFC 3339 timestamp to whole epoch seconds.
pub fn parse_start_date(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    let seconds = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|midnight| midnight.and_utc().timestamp()),
        Err(_) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|timestamp| timestamp.timestamp()),
    }
    .ok_or_else(|| Error::InvalidField {
        field: START_DATE,
        reason: format!("not a calendar date ({:?})", raw),
    })?;

    u64::try_from(seconds).map_err(|_| Error::InvalidField {
        field: START_DATE,
        reason: format!("{} is before 1970-01-01", raw),
    })
}
