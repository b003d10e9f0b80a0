use crate::config::Direction;
use crate::pulse::{Expiry, RelayCommand, RelayLevel, Transition};
use crate::{log_error, log_info};

use super::{ControllerEvent, PulseController, ScheduledExpiry};

impl PulseController {
    /// Carry out a transition: cancel, arm, relay writes, then the motion update.
    ///
    /// Publish failures are logged and the in-memory state is kept. A release that
    /// could not be published is retried by the next release-all.
    pub(super) async fn apply_transition(&mut self, cover: &str, transition: Transition) {
        for direction in transition.cancel {
            if let Some(timer) = self.timers.remove(&(cover.to_string(), direction)) {
                timer.handle.abort();
            }
        }

        if let Some(expiry) = transition.arm {
            self.arm(cover, expiry);
        }

        for command in transition.publishes {
            self.publish_relay(command).await;
        }

        if let (Some(motion), true) = (transition.motion, self.settings.publish_state) {
            let topic = self.router.state_topic(cover);
            if let Err(e) = self.gateway.publish(&topic, motion.payload(), true).await {
                log_error!("Failed to publish state {} = {}: {}", topic, motion.payload(), e);
            }
        }
    }

    pub(super) async fn publish_relay(&mut self, command: RelayCommand) {
        let topic = self.router.relay_topic(&command.relay);
        let payload = command.level.payload();

        match self.gateway.publish(&topic, payload, false).await {
            Ok(()) => {
                log_info!("📤 {} = {}", topic, payload);
                self.undelivered.remove(&command.relay);
            }
            Err(e) => {
                log_error!("Failed to publish {} = {}: {}", topic, payload, e);
                if command.level == RelayLevel::Release {
                    self.undelivered.insert(command.relay);
                }
            }
        }
    }

    fn arm(&mut self, cover: &str, expiry: Expiry) {
        let key: (String, Direction) = (cover.to_string(), expiry.direction);
        if let Some(previous) = self.timers.remove(&key) {
            previous.handle.abort();
        }

        let events = self.events.clone();
        let name = cover.to_string();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(expiry.deadline).await;
            if let Some(events) = events.upgrade() {
                let _ = events.send(ControllerEvent::Expired { cover: name, expiry });
            }
        });

        self.timers.insert(
            key,
            ScheduledExpiry {
                pulse_id: expiry.pulse_id,
                handle: task.abort_handle(),
            },
        );
    }
}
