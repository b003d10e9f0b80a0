//! Home Assistant MQTT entities for the configured covers
//!
//! One `cover` entity per cover on the hub command topic, and one `switch` entity per
//! cover direction on its switch topic. The bridge maps switch on to open/close and
//! switch off to stop itself, so no Home Assistant automations are needed.

use serde::Serialize;

use crate::config::{ConfigSet, CoverConfig, Direction};
use crate::error::Result;
use crate::runtime::RuntimeConfig;
use crate::topic::{Payloads, TopicRouter};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaConfig {
    pub mqtt: HaMqtt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaMqtt {
    pub cover: Vec<HaCover>,
    pub switch: Vec<HaSwitch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaCover {
    pub name: String,
    pub unique_id: String,
    pub command_topic: String,
    pub payload_open: String,
    pub payload_close: String,
    pub payload_stop: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_opening: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_closing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_stopped: Option<String>,
    pub optimistic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HaSwitch {
    pub name: String,
    pub unique_id: String,
    pub command_topic: String,
    pub payload_on: String,
    pub payload_off: String,
    /// Physical input feedback, when the direction has one wired. Inputs report `1`/`0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_off: Option<String>,
    pub optimistic: bool,
}

impl HaConfig {
    pub fn build(config: &ConfigSet, router: &TopicRouter, publish_state: bool) -> Self {
        let cover = config
            .covers()
            .map(|cover| HaCover::new(cover, router, publish_state))
            .collect();

        let switch = config
            .covers()
            .flat_map(|cover| Direction::ALL.map(|direction| HaSwitch::new(cover, direction, router)))
            .collect();

        Self {
            mqtt: HaMqtt { cover, switch },
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl HaCover {
    fn new(cover: &CoverConfig, router: &TopicRouter, publish_state: bool) -> Self {
        let state = |payload: &str| publish_state.then(|| payload.to_string());

        Self {
            name: display_name(&cover.name),
            unique_id: format!("shady_{}", cover.name),
            command_topic: router.command_topic(&cover.name),
            payload_open: Payloads::COVER_OPEN.to_string(),
            payload_close: Payloads::COVER_CLOSE.to_string(),
            payload_stop: Payloads::COVER_STOP.to_string(),
            state_topic: publish_state.then(|| router.state_topic(&cover.name)),
            state_opening: state(Payloads::STATE_OPENING),
            state_closing: state(Payloads::STATE_CLOSING),
            state_stopped: state(Payloads::STATE_STOPPED),
            optimistic: !publish_state,
        }
    }
}

impl HaSwitch {
    fn new(cover: &CoverConfig, direction: Direction, router: &TopicRouter) -> Self {
        let state_topic = cover.input(direction).map(|input| router.input_topic(input));
        let wired = state_topic.is_some();

        Self {
            name: format!("{} {}", display_name(&cover.name), direction),
            unique_id: format!("shady_{}_{}", cover.name, direction),
            command_topic: router.switch_topic(&cover.name, direction),
            payload_on: Payloads::SWITCH_ON.to_string(),
            payload_off: Payloads::SWITCH_OFF.to_string(),
            state_topic,
            state_on: wired.then(|| Payloads::RELAY_ASSERT.to_string()),
            state_off: wired.then(|| Payloads::RELAY_RELEASE.to_string()),
            optimistic: !wired,
        }
    }
}

fn display_name(name: &str) -> String {
    name.replace('_', " ")
}

/// Load the cover file named in `config` and render its Home Assistant YAML
pub fn render(config: &RuntimeConfig) -> Result<String> {
    let covers = ConfigSet::load(&config.config_path)?;
    let router = TopicRouter::new(&covers, config.bases.clone())?;

    HaConfig::build(&covers, &router, config.publish_state).to_yaml()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MqttSettings;
    use crate::topic::BaseTopics;
    use serde_yaml::Value;
    use std::io::Write;
    use std::time::Duration;

    const COVERS: &str = r#"
living_room:
  open: { relay: "3_13", input: "1_4" }
  close: "3_14"
"#;

    fn build(publish_state: bool) -> HaConfig {
        let config = ConfigSet::from_yaml(COVERS).unwrap();
        let router = TopicRouter::new(&config, BaseTopics::default()).unwrap();
        HaConfig::build(&config, &router, publish_state)
    }

    #[test]
    fn test_switch_per_direction() {
        let ha = build(false);

        assert_eq!(ha.mqtt.switch.len(), 2);
        let open = &ha.mqtt.switch[0];
        assert_eq!(open.name, "living room open");
        assert_eq!(open.command_topic, "shady/input/living_room/open/set");
        assert_eq!((open.payload_on.as_str(), open.payload_off.as_str()), ("ON", "OFF"));
        assert_eq!(open.state_on.as_deref(), Some("1"));
        assert_eq!(open.state_topic.as_deref(), Some("shady/input/1_4/state"));
        assert!(!open.optimistic);

        let close = &ha.mqtt.switch[1];
        assert_eq!(close.command_topic, "shady/input/living_room/close/set");
        assert_eq!(close.state_topic, None);
        assert!(close.optimistic);
    }

    #[test]
    fn test_cover_state_only_when_published() {
        let cover = &build(false).mqtt.cover[0];
        assert_eq!(cover.command_topic, "homeassistant/cover/living_room/set");
        assert_eq!(cover.state_topic, None);
        assert!(cover.optimistic);

        let cover = &build(true).mqtt.cover[0];
        assert_eq!(cover.state_topic.as_deref(), Some("homeassistant/cover/living_room/state"));
        assert_eq!(cover.state_stopped.as_deref(), Some("stopped"));
        assert!(!cover.optimistic);
    }

    #[test]
    fn test_yaml_output() {
        let yaml = build(false).to_yaml().unwrap();
        let parsed: Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(
            parsed["mqtt"]["switch"][1]["command_topic"].as_str(),
            Some("shady/input/living_room/close/set")
        );
        assert_eq!(parsed["mqtt"]["switch"][0]["payload_on"].as_str(), Some("ON"));
        assert!(parsed["mqtt"]["switch"][1].get("state_topic").is_none());
        assert_eq!(parsed["mqtt"]["cover"][0]["payload_stop"].as_str(), Some("STOP"));
    }

    #[test]
    fn test_render_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COVERS.as_bytes()).unwrap();

        let yaml = render(&RuntimeConfig {
            config_path: file.path().to_path_buf(),
            mqtt: MqttSettings::default(),
            bases: BaseTopics::default(),
            on_time: Duration::from_secs(3),
            publish_state: false,
        })
        .unwrap();

        assert!(yaml.contains("shady/input/living_room/open/set"));
    }
}
