use serde_yaml::Value;

use crate::config::{
    raw::{RawAction, RawCover, RawWired},
    validation::{
        config_validator::ConfigValidator,
        error::ValidationError,
    },
    CoverConfig,
    Direction,
    InputId,
    RelayId,
};

impl ConfigValidator {
    pub(super) fn parse_cover(name: String, value: &Value) -> Result<CoverConfig, ValidationError> {
        let raw: RawCover = serde_yaml::from_value(value.clone())
            .map_err(|e| ValidationError::new(&name, e.to_string()))?;

        let (open_relay, open_input) = Self::parse_action(&name, Direction::Open, raw.open)?;
        let (close_relay, close_input) = Self::parse_action(&name, Direction::Close, raw.close)?;

        if open_relay == close_relay {
            return Err(ValidationError::new(
                &name,
                format!("open and close use the same relay {}", open_relay),
            ));
        }

        Ok(CoverConfig {
            name,
            open_relay,
            close_relay,
            open_input,
            close_input,
        })
    }

    fn parse_action(
        cover: &str,
        direction: Direction,
        action: RawAction,
    ) -> Result<(RelayId, Option<InputId>), ValidationError> {
        let field = format!("{}.{}", cover, direction);

        match action {
            RawAction::Relay(relay) => {
                let relay = relay.into_string();
                Self::validate_segment(&field, &relay)?;
                Ok((RelayId::new(relay), None))
            }
            RawAction::Wired(RawWired { relay, input }) => {
                let relay = relay.into_string();
                Self::validate_segment(&format!("{}.relay", field), &relay)?;

                let input = match input {
                    Some(input) => {
                        let input = input.into_string();
                        Self::validate_segment(&format!("{}.input", field), &input)?;
                        Some(InputId::new(input))
                    }
                    None => None,
                };

                Ok((RelayId::new(relay), input))
            }
        }
    }
}
