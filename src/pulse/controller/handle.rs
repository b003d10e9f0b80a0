use tokio::sync::{mpsc, oneshot};

use crate::error::{BridgeError, Result};
use crate::pulse::Command;

use super::{ControllerEvent, CoverSnapshot};

/// Cloneable sender side of the controller queue
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    sender: mpsc::UnboundedSender<ControllerEvent>,
}

impl ControllerHandle {
    pub(super) fn new(sender: mpsc::UnboundedSender<ControllerEvent>) -> Self {
        Self { sender }
    }

    fn post(&self, event: ControllerEvent) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| BridgeError::ControllerClosed)
    }

    /// Queue a command; never waits on the controller
    pub fn send(&self, command: Command) -> Result<()> {
        self.post(ControllerEvent::Command(command))
    }

    /// Queue a release of every asserted relay, ahead of any later command
    pub fn release_all(&self) -> Result<()> {
        self.post(ControllerEvent::ReleaseAll { done: None })
    }

    /// Release every asserted relay and wait until the releases were handed to the gateway
    pub async fn release_all_and_wait(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.post(ControllerEvent::ReleaseAll { done: Some(done) })?;
        wait.await.map_err(|_| BridgeError::ControllerClosed)
    }

    /// Current state of a configured cover, `None` for unknown names
    pub async fn snapshot(&self, cover: &str) -> Result<Option<CoverSnapshot>> {
        let (reply, wait) = oneshot::channel();
        self.post(ControllerEvent::Snapshot {
            cover: cover.to_string(),
            reply,
        })?;
        wait.await.map_err(|_| BridgeError::ControllerClosed)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.post(ControllerEvent::Shutdown)
    }
}
