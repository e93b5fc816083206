use crate::utils::error::{NumerologyError, Result};
use chrono::NaiveDate;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| NumerologyError::missing_input(field_name))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(NumerologyError::invalid_input(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(NumerologyError::invalid_input(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Rejects dates that do not exist on the proleptic Gregorian calendar,
/// such as 31 April or 29 February in a common year.
pub fn validate_calendar_date(day: u32, month: u32, year: i32) -> Result<NaiveDate> {
    validate_range("day", day, 1, 31)?;
    validate_range("month", month, 1, 12)?;
    validate_range("year", year, 1, 9999)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        NumerologyError::invalid_input(
            "date",
            format!("{:04}-{:02}-{:02}", year, month, day),
            "Not a calendar date",
        )
    })
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(NumerologyError::ConfigError {
        field: field_name.to_string(),
        message: format!(
            "Unsupported value '{}'. Valid values: {}",
            value,
            allowed.join(", ")
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("month", 12, 1, 12).is_ok());
        assert!(validate_range("month", 13, 1, 12).is_err());
        assert!(validate_range("day", 0, 1, 31).is_err());
    }

    #[test]
    fn test_validate_calendar_date() {
        assert!(validate_calendar_date(16, 7, 1990).is_ok());
        assert!(validate_calendar_date(29, 2, 2000).is_ok());
        assert!(validate_calendar_date(29, 2, 1900).is_err());
        assert!(validate_calendar_date(31, 4, 2021).is_err());
        assert!(validate_calendar_date(1, 1, 10000).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(7u32);
        let absent: Option<u32> = None;
        assert_eq!(*validate_required_field("month", &present).unwrap(), 7);
        assert!(matches!(
            validate_required_field("month", &absent),
            Err(NumerologyError::InvalidInput { ref reason, .. }) if reason == "missing"
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("output.format", "json", &["text", "json"]).is_ok());
        assert!(validate_one_of("output.format", "html", &["text", "json"]).is_err());
    }
}
