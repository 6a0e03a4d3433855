use crate::errors::{AppError, AppResult};
use crate::models::Schema;
use crate::utils::date;
use chrono::NaiveDate;

/// A single logged journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub date: NaiveDate,
    pub location: String,
    /// Free text; never validated as a number.
    pub miles: String,
    /// `Some("")` is a valid, empty reason.
    pub reason: Option<String>,
}

impl TripRecord {
    pub fn new(
        date: NaiveDate,
        location: impl Into<String>,
        miles: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            date,
            location: location.into(),
            miles: miles.into(),
            reason,
        }
    }

    /// Record stamped with the local current date.
    pub fn today(location: impl Into<String>, miles: impl Into<String>, reason: Option<String>) -> Self {
        Self::new(date::today(), location, miles, reason)
    }

    /// Dated today from user-typed fields. Both are trimmed and must be
    /// non-empty; miles are otherwise kept as typed.
    pub fn custom(location: &str, miles: &str, reason: Option<String>) -> AppResult<Self> {
        let location = location.trim();
        let miles = miles.trim();
        if location.is_empty() {
            return Err(AppError::EmptyField("Location name"));
        }
        if miles.is_empty() {
            return Err(AppError::EmptyField("Miles"));
        }
        Ok(Self::today(location, miles, reason))
    }

    /// CSV fields for `schema`, always exactly `schema.columns()` long.
    pub fn to_row(&self, schema: Schema) -> Vec<String> {
        let mut row = vec![
            date::format_date(self.date),
            self.location.clone(),
            self.miles.clone(),
        ];
        if schema.has_reason() {
            row.push(self.reason.clone().unwrap_or_default());
        }
        row
    }
}
