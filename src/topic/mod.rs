//! Topic Router - maps MQTT topics to cover commands and relays to publish topics

mod new;
mod payload;
mod resolve;

use std::collections::BTreeMap;

use crate::config::{Direction, InputId, RelayId};

pub use payload::Payloads;

/// Topic prefixes everything is namespaced under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseTopics {
    /// Hub-facing cover entities: `<covers>/<cover>/set`, `<covers>/<cover>/state`
    pub covers: String,
    /// Per-direction switches and physical input feedback
    pub inputs: String,
    /// Relay controller outputs: `<relays>/<relay_id>/set`
    pub relays: String,
}

impl Default for BaseTopics {
    fn default() -> Self {
        Self {
            covers: "homeassistant/cover".to_string(),
            inputs: "shady/input".to_string(),
            relays: "shady/relay".to_string(),
        }
    }
}

/// What an inbound topic means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hub cover command, payload `OPEN` / `CLOSE` / `STOP`
    CoverCommand { cover: String },
    /// Virtual per-direction switch, payload `1` presses and `0` releases
    Switch { cover: String, direction: Direction },
    /// Physical push-button wired to the relay controller, same payloads as a switch
    Input { cover: String, direction: Direction, input: InputId },
}

impl Route {
    pub fn cover(&self) -> &str {
        match self {
            Route::CoverCommand { cover }
            | Route::Switch { cover, .. }
            | Route::Input { cover, .. } => cover,
        }
    }
}

/// Built once from the [`ConfigSet`](crate::config::ConfigSet); read-only afterwards.
#[derive(Debug, Clone)]
pub struct TopicRouter {
    bases: BaseTopics,
    routes: BTreeMap<String, Route>,
}

impl TopicRouter {
    /// Every topic the gateway has to subscribe to, in a stable order
    pub fn subscriptions(&self) -> Vec<String> {
        self.routes.keys().cloned().collect()
    }

    pub fn route(&self, topic: &str) -> Option<&Route> {
        self.routes.get(topic)
    }

    pub fn bases(&self) -> &BaseTopics {
        &self.bases
    }

    /// Hub cover command topic
    pub fn command_topic(&self, cover: &str) -> String {
        format!("{}/{}/set", self.bases.covers, cover)
    }

    /// Per-direction switch topic
    pub fn switch_topic(&self, cover: &str, direction: Direction) -> String {
        format!("{}/{}/{}/set", self.bases.inputs, cover, direction)
    }

    /// Physical input feedback topic
    pub fn input_topic(&self, input: &InputId) -> String {
        format!("{}/{}/state", self.bases.inputs, input)
    }

    pub fn relay_topic(&self, relay: &RelayId) -> String {
        format!("{}/{}/set", self.bases.relays, relay)
    }

    pub fn state_topic(&self, cover: &str) -> String {
        format!("{}/{}/state", self.bases.covers, cover)
    }
}
