//! Command line and environment settings for the bridge binary

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::gateway::MqttSettings;
use crate::pulse::MAX_ON_TIME;
use crate::runtime::RuntimeConfig;
use crate::topic::BaseTopics;

#[derive(Parser, Debug, Clone)]
#[command(name = "shady-bridge", version, about = "Pulse cover relays from MQTT commands")]
pub struct Args {
    /// YAML file mapping cover names to their open/close relays
    pub config: PathBuf,

    /// MQTT broker host
    #[arg(long, env = "MQTT_HOST", default_value = "localhost")]
    pub mqtt_host: String,

    /// MQTT broker port
    #[arg(long, env = "MQTT_PORT", default_value_t = 1883)]
    pub mqtt_port: u16,

    #[arg(long, default_value = "shady-bridge", value_parser = parse_client_id)]
    pub client_id: String,

    /// Prefix for hub-facing cover topics
    #[arg(long, default_value = "homeassistant/cover")]
    pub covers_base_topic: String,

    /// Prefix for per-direction switches and physical inputs
    #[arg(long, default_value = "shady/input")]
    pub inputs_base_topic: String,

    /// Prefix for relay controller outputs
    #[arg(long, default_value = "shady/relay")]
    pub relays_base_topic: String,

    /// Seconds a relay stays asserted per pulse
    #[arg(long, default_value = "3.0", value_parser = parse_seconds)]
    pub on_time: Duration,

    /// Publish opening/closing/stopped on <covers>/<cover>/state
    #[arg(long)]
    pub publish_state: bool,

    /// Log filter, e.g. `info` or `shady_bridge=debug`
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Also append logs to <dir>/shady-bridge.log
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Print Home Assistant MQTT cover and switch entities for the config, then exit
    #[arg(long)]
    pub print_ha_config: bool,
}

impl Args {
    pub fn into_runtime_config(self) -> RuntimeConfig {
        RuntimeConfig {
            config_path: self.config,
            mqtt: MqttSettings {
                host: self.mqtt_host,
                port: self.mqtt_port,
                client_id: self.client_id,
                ..MqttSettings::default()
            },
            bases: BaseTopics {
                covers: self.covers_base_topic,
                inputs: self.inputs_base_topic,
                relays: self.relays_base_topic,
            },
            on_time: self.on_time,
            publish_state: self.publish_state,
        }
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", value))?;

    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(format!("on time must be greater than zero, got {}", value));
    }
    if seconds > MAX_ON_TIME.as_secs_f64() {
        return Err(format!(
            "on time must be at most {} seconds, got {}",
            MAX_ON_TIME.as_secs(),
            value
        ));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| e.to_string())
}

fn parse_client_id(value: &str) -> Result<String, String> {
    if value.is_empty() || value.starts_with(' ') {
        return Err("client id must be non-empty and not start with a space".to_string());
    }
    Ok(value.to_string())
}
