use crate::utils::error::{Result, SchoolDataError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Accepts the names R itself accepts: a letter, then letters, digits or
/// dots, at least two characters, not ending in a dot. Anything else is
/// rejected before it can reach a generated snippet.
pub fn validate_package_name(field_name: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let starts_ok = chars.next().map(|c| c.is_ascii_alphabetic()).unwrap_or(false);
    let rest_ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.');

    if name.len() < 2 || !starts_ok || !rest_ok || name.ends_with('.') {
        return Err(SchoolDataError::InvalidConfigValue {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "not a valid R package name".to_string(),
        });
    }
    Ok(())
}

pub fn validate_end_year(field_name: &str, year: i32) -> Result<()> {
    // USBE enrollment files go back to the 1990s; anything outside this
    // window is a typo, not a data request.
    validate_range(field_name, year, 1990, 2100)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SchoolDataError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SchoolDataError::InvalidConfigValue {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
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
        return Err(SchoolDataError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
