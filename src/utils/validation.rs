use crate::utils::error::{Result, RosterError};
use once_cell::sync::Lazy;
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

// Local part: one or more of [A-Za-z0-9_.+-]; domain: dot-separated
// labels of [A-Za-z0-9-], at least two (so a TLD is required).
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email regex is valid")
});

pub fn validate_email(value: &str) -> Result<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(RosterError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

/// Student numbers are strictly positive. Checked at collection insert
/// time, not at `Student` construction.
pub fn validate_student_number(number: i64) -> Result<()> {
    if number > 0 {
        Ok(())
    } else {
        Err(RosterError::InvalidNumber { number })
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::ConfigError {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}
