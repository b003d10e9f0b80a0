use async_trait::async_trait;
use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS, SubscribeFilter};
use std::time::Duration;

use crate::error::Result;

use super::Gateway;

/// Requests buffered between the client handle and the event loop
const REQUEST_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MqttSettings {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub keep_alive: Duration,
}

impl Default for MqttSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 1883,
            client_id: "shady-bridge".to_string(),
            keep_alive: Duration::from_secs(30),
        }
    }
}

impl MqttSettings {
    pub fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(self.keep_alive);
        options.set_clean_session(true);
        options
    }
}

/// [`Gateway`] backed by a rumqttc client; the returned [`EventLoop`] must be polled
/// for anything to reach the broker.
#[derive(Debug, Clone)]
pub struct MqttGateway {
    client: AsyncClient,
}

impl MqttGateway {
    pub fn new(settings: &MqttSettings) -> (Self, EventLoop) {
        let (client, eventloop) = AsyncClient::new(settings.options(), REQUEST_CAPACITY);
        (Self { client }, eventloop)
    }

    /// Queue a clean disconnect behind any publishes already requested
    pub async fn disconnect(&self) -> Result<()> {
        self.client.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl Gateway for MqttGateway {
    async fn subscribe(&self, topics: &[String]) -> Result<()> {
        if topics.is_empty() {
            return Ok(());
        }

        let filters = topics
            .iter()
            .map(|topic| SubscribeFilter::new(topic.clone(), QoS::AtLeastOnce));
        self.client.subscribe_many(filters).await?;
        Ok(())
    }

    /// Fails instead of waiting when the request queue is full, e.g. during a broker outage
    async fn publish(&self, topic: &str, payload: &str, retain: bool) -> Result<()> {
        self.client
            .try_publish(topic, QoS::AtLeastOnce, retain, payload.as_bytes().to_vec())?;
        Ok(())
    }
}
