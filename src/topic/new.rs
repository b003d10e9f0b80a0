use std::collections::BTreeMap;

use crate::{
    config::{ConfigSet, Direction, ValidationError},
    error::ConfigError,
    log_debug,
};

use super::{BaseTopics, Route, TopicRouter};

impl TopicRouter {
    pub fn new(config: &ConfigSet, bases: BaseTopics) -> Result<Self, ConfigError> {
        let bases = BaseTopics {
            covers: normalize_base("covers_base_topic", &bases.covers)?,
            inputs: normalize_base("inputs_base_topic", &bases.inputs)?,
            relays: normalize_base("relays_base_topic", &bases.relays)?,
        };

        let mut router = Self {
            bases,
            routes: BTreeMap::new(),
        };

        for cover in config.covers() {
            let name = cover.name.clone();

            let topic = router.command_topic(&name);
            insert_route(
                &mut router.routes,
                topic,
                Route::CoverCommand { cover: name.clone() },
            )?;

            for direction in Direction::ALL {
                let topic = router.switch_topic(&name, direction);
                insert_route(
                    &mut router.routes,
                    topic,
                    Route::Switch { cover: name.clone(), direction },
                )?;

                if let Some(input) = cover.input(direction) {
                    let topic = router.input_topic(input);
                    insert_route(
                        &mut router.routes,
                        topic,
                        Route::Input {
                            cover: name.clone(),
                            direction,
                            input: input.clone(),
                        },
                    )?;
                }
            }
        }

        // Our own state publishes must never loop back in as commands
        for cover in config.covers() {
            let state_topic = router.state_topic(&cover.name);
            if let Some(route) = router.routes.get(&state_topic) {
                return Err(ConfigError::TopicCollision {
                    topic: state_topic,
                    first: format!("{:?}", route),
                    second: format!("state of cover {}", cover.name),
                });
            }
        }

        for (topic, route) in &router.routes {
            log_debug!("route {} -> {:?}", topic, route);
        }

        Ok(router)
    }
}

fn insert_route(
    routes: &mut BTreeMap<String, Route>,
    topic: String,
    route: Route,
) -> Result<(), ConfigError> {
    if let Some(existing) = routes.get(&topic) {
        return Err(ConfigError::TopicCollision {
            topic,
            first: format!("{:?}", existing),
            second: format!("{:?}", route),
        });
    }
    routes.insert(topic, route);
    Ok(())
}

fn normalize_base(field: &str, base: &str) -> Result<String, ConfigError> {
    let trimmed = base.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ValidationError {
            field: field.to_string(),
            error: "Cannot be empty".to_string(),
        }.into());
    }

    if trimmed.contains(['+', '#']) {
        return Err(ValidationError {
            field: field.to_string(),
            error: format!("{:?} must not contain MQTT wildcards", base),
        }.into());
    }

    Ok(trimmed.to_string())
}
