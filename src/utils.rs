use time::{
    Date, Duration, OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::error::{ServiceError, StoreError};
use crate::models::Category;

pub fn validate_non_empty(value: &str, field_name: &str) -> Result<String, ServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::invalid(format!(
            "{} cannot be empty",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

pub fn validate_description(description: &str) -> Result<String, ServiceError> {
    validate_non_empty(description, "Description")
}

pub fn validate_amount(amount: f64) -> Result<f64, ServiceError> {
    if !amount.is_finite() {
        return Err(ServiceError::invalid("Amount must be a finite number"));
    }
    if amount < 0.0 {
        return Err(ServiceError::invalid("Amount cannot be negative"));
    }
    Ok(amount)
}

pub fn parse_category(category: &str) -> Result<Category, ServiceError> {
    category
        .parse::<Category>()
        .map_err(|e| ServiceError::invalid(e.to_string()))
}

/// Accepts an RFC 3339 date-time or a bare `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_date(value: &str) -> Result<OffsetDateTime, ServiceError> {
    let value = value.trim();
    if let Ok(parsed) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(truncate_to_millis(parsed.to_offset(UtcOffset::UTC)));
    }
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| ServiceError::invalid(format!("`{}` is not a valid date", value)))
}

/// Timestamps are persisted with millisecond precision.
pub fn truncate_to_millis(dt: OffsetDateTime) -> OffsetDateTime {
    dt - Duration::nanoseconds(i64::from(dt.nanosecond() % 1_000_000))
}

pub fn now_utc() -> OffsetDateTime {
    truncate_to_millis(OffsetDateTime::now_utc())
}

pub fn to_unix_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

pub fn from_unix_millis(millis: i64) -> Result<OffsetDateTime, StoreError> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| StoreError::CorruptRow(format!("timestamp {} out of range: {}", millis, e)))
}

pub fn format_total(total: f64) -> String {
    format!("{:.2}", total)
}
