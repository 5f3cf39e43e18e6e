use crate::utils::error::{MaskError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MaskError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Event names are bare identifiers like `input`, `change` or `keyup`.
pub fn validate_event_name(field_name: &str, event: &str) -> Result<()> {
    validate_non_empty_string(field_name, event)?;

    if !event
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
    {
        return Err(MaskError::InvalidConfigValue {
            field: field_name.to_string(),
            value: event.to_string(),
            reason: "Event name may only contain letters, digits, '-', '_' or ':'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(MaskError::InvalidConfigValue {
                field: field_name.to_string(),
                value: value.to_string(),
                reason: "Duplicate entry; a field can carry only one mask".to_string(),
            });
        }
    }
    Ok(())
}
