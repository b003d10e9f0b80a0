use tokio::time::Instant;

use crate::pulse::{Command, CoverPulse};
use crate::{log_debug, log_warn};

use super::PulseController;

impl PulseController {
    pub(super) async fn handle_command(&mut self, command: Command) {
        let Some(config) = self.config.get(&command.cover) else {
            log_warn!("Ignoring {:?} for unknown cover {}", command.action, command.cover);
            return;
        };

        let on_time = self.settings.on_time;
        let cover = self
            .covers
            .entry(command.cover.clone())
            .or_insert_with(|| CoverPulse::new(config));

        let transition = cover.apply(command.action, Instant::now(), on_time);
        if transition.is_noop() {
            log_debug!("{:?} on {} changed nothing", command.action, command.cover);
            return;
        }

        self.apply_transition(&command.cover, transition).await;
    }
}
