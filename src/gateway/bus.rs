// src/gateway/bus.rs
//! In-process gateway - records publishes on a channel instead of sending them to a broker

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::error::{BridgeError, Result};
use crate::log_debug;

use super::Gateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl BusMessage {
    pub fn new(topic: String, payload: String, retain: bool) -> Self {
        Self {
            topic,
            payload,
            retain,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

pub type BusReceiver = mpsc::UnboundedReceiver<BusMessage>;
pub type BusSender = mpsc::UnboundedSender<BusMessage>;

#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: BusSender,
    subscriptions: Arc<RwLock<Vec<String>>>,
}

impl MessageBus {
    pub fn new() -> (Self, BusReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (
            Self {
                sender,
                subscriptions: Arc::new(RwLock::new(Vec::new())),
            },
            receiver,
        )
    }

    pub async fn subscriptions(&self) -> Vec<String> {
        self.subscriptions.read().await.clone()
    }
}

#[async_trait]
impl Gateway for MessageBus {
    async fn subscribe(&self, topics: &[String]) -> Result<()> {
        let mut subscriptions = self.subscriptions.write().await;
        for topic in topics {
            if !subscriptions.contains(topic) {
                subscriptions.push(topic.clone());
            }
        }
        Ok(())
    }

    async fn publish(&self, topic: &str, payload: &str, retain: bool) -> Result<()> {
        log_debug!("bus publish {} = {}", topic, payload);
        self.sender
            .send(BusMessage::new(topic.to_string(), payload.to_string(), retain))
            .map_err(|_| BridgeError::from("message bus receiver dropped"))
    }
}
