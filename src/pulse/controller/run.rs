use crate::{log_debug, log_info};

use super::{ControllerEvent, PulseController};

impl PulseController {
    pub async fn run(mut self) {
        log_info!(
            "⏱️ Pulse controller started: {} covers, on_time {:?}",
            self.config.len(),
            self.settings.on_time
        );

        while let Some(event) = self.receiver.recv().await {
            match event {
                ControllerEvent::Command(command) => {
                    self.handle_command(command).await;
                }
                ControllerEvent::Expired { cover, expiry } => {
                    self.handle_expiry(&cover, expiry).await;
                }
                ControllerEvent::ReleaseAll { done } => {
                    self.release_all().await;
                    if let Some(done) = done {
                        let _ = done.send(());
                    }
                }
                ControllerEvent::Snapshot { cover, reply } => {
                    let _ = reply.send(self.snapshot(&cover));
                }
                ControllerEvent::Shutdown => {
                    log_debug!("Pulse controller received shutdown");
                    break;
                }
            }
        }

        for (_, timer) in self.timers.drain() {
            timer.handle.abort();
        }
        log_info!("Pulse controller stopped");
    }
}
