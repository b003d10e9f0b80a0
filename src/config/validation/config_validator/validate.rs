use serde_yaml::Value;

use crate::{
    config::{
        raw::RawId,
        validation::{
            config_validator::ConfigValidator,
            error::ValidationError,
        },
        ConfigSet,
    },
    error::ConfigError,
    log_debug,
};

impl ConfigValidator {
    /// Validate a cover config document and build the cover map from it
    pub fn validate(config_yaml: &str) -> Result<ConfigSet, ConfigError> {
        // Deserialize as generic first so each cover's errors can name it, then typed per cover
        let generic: Value = serde_yaml::from_str(config_yaml)?;

        let entries = match generic {
            Value::Mapping(entries) if !entries.is_empty() => entries,
            Value::Mapping(_) | Value::Null => {
                return Err(ValidationError::new("covers", "No covers configured").into());
            }
            _ => {
                return Err(ValidationError::new(
                    "covers",
                    "Expected a mapping of cover names to relays",
                ).into());
            }
        };

        let mut covers = Vec::with_capacity(entries.len());
        for (key, value) in &entries {
            let name = serde_yaml::from_value::<RawId>(key.clone())
                .map(RawId::into_string)
                .map_err(|_| {
                    ValidationError::new("covers", format!("Cover name must be a string, got {:?}", key))
                })?;
            Self::validate_segment(&name, &name)?;

            let cover = Self::parse_cover(name, value)?;
            log_debug!("cover {}: open={} close={}", cover.name, cover.open_relay, cover.close_relay);
            covers.push(cover);
        }

        Self::validate_inputs(&covers)?;
        Self::warn_shared_relays(&covers);

        Ok(covers.into_iter().collect())
    }
}
