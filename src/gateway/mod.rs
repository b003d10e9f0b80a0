//! MQTT Gateway - the only part of the bridge that talks to a broker

pub mod bus;
pub mod event_loop;
pub mod mqtt;

use async_trait::async_trait;

use crate::error::Result;
use crate::pulse::ControllerHandle;
use crate::topic::TopicRouter;
use crate::log_info;

pub use bus::{BusMessage, BusReceiver, MessageBus};
pub use event_loop::{on_connack, run_event_loop};
pub use mqtt::{MqttGateway, MqttSettings};

/// Capability handed to the pulse controller for subscribing and publishing.
///
/// Publishing is fire-and-forget for callers; delivery guarantees belong to the implementation.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn subscribe(&self, topics: &[String]) -> Result<()>;

    async fn publish(&self, topic: &str, payload: &str, retain: bool) -> Result<()>;
}

/// Route one inbound message to the controller.
///
/// Returns `Ok(false)` when the message did not map to a command.
pub fn on_message(
    router: &TopicRouter,
    controller: &ControllerHandle,
    topic: &str,
    payload: &[u8],
) -> Result<bool> {
    match router.resolve(topic, payload) {
        Some(command) => {
            log_info!("📥 {} -> {:?} {}", topic, command.action, command.cover);
            controller.send(command)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
