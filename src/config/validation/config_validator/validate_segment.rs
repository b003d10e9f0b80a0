use crate::config::validation::{
    config_validator::ConfigValidator,
    error::ValidationError,
};

impl ConfigValidator {
    /// Names and ids end up as single MQTT topic levels
    pub(super) fn validate_segment(field: &str, value: &str) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new(field, "Cannot be empty"));
        }

        if value.chars().any(|c| matches!(c, '/' | '+' | '#') || c.is_whitespace()) {
            return Err(ValidationError::new(
                field,
                format!("{:?} must not contain '/', '+', '#' or whitespace", value),
            ));
        }

        Ok(())
    }
}
