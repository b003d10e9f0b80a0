use std::collections::HashMap;

use crate::{
    config::{
        validation::{
            config_validator::ConfigValidator,
            error::ValidationError,
        },
        CoverConfig,
        Direction,
        InputId,
        RelayId,
    },
    log_warn,
};

impl ConfigValidator {
    /// Each physical input drives exactly one (cover, direction)
    pub(super) fn validate_inputs(covers: &[CoverConfig]) -> Result<(), ValidationError> {
        let mut owners: HashMap<&InputId, String> = HashMap::new();

        for cover in covers {
            for direction in Direction::ALL {
                let Some(input) = cover.input(direction) else {
                    continue;
                };
                let field = format!("{}.{}.input", cover.name, direction);

                if let Some(owner) = owners.get(input) {
                    return Err(ValidationError::new(
                        field,
                        format!("Input {} is already used by {}", input, owner),
                    ));
                }
                owners.insert(input, format!("{}.{}", cover.name, direction));
            }
        }

        Ok(())
    }

    /// Shared wiring is legal, but the bridge does not arbitrate between covers
    pub(super) fn warn_shared_relays(covers: &[CoverConfig]) {
        let mut users: HashMap<&RelayId, Vec<&str>> = HashMap::new();

        for cover in covers {
            for direction in Direction::ALL {
                users.entry(cover.relay(direction)).or_default().push(&cover.name);
            }
        }

        for (relay, names) in users {
            if names.len() > 1 {
                log_warn!("Relay {} is shared by covers {:?}", relay, names);
            }
        }
    }
}
