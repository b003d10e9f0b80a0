use crate::log_info;
use crate::pulse::RelayCommand;

use super::PulseController;

impl PulseController {
    /// Force every cover back to idle, releasing whatever is asserted or failed to release
    pub(super) async fn release_all(&mut self) {
        let pulsing: Vec<String> = self
            .covers
            .values()
            .filter(|cover| cover.pulsing().is_some())
            .map(|cover| cover.name().to_string())
            .collect();

        if !pulsing.is_empty() {
            log_info!("🛑 Releasing {} pulsing covers", pulsing.len());
        }
        for name in pulsing {
            let transition = match self.covers.get_mut(&name) {
                Some(cover) => cover.stop(),
                None => continue,
            };
            self.apply_transition(&name, transition).await;
        }

        // Releases that never reached the broker
        let undelivered: Vec<_> = self.undelivered.drain().collect();
        for relay in undelivered {
            log_info!("Retrying release of relay {}", relay);
            self.publish_relay(RelayCommand::release(relay)).await;
        }
    }
}
