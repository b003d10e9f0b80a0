use crate::log_debug;
use crate::pulse::Expiry;

use super::PulseController;

impl PulseController {
    pub(super) async fn handle_expiry(&mut self, cover: &str, expiry: Expiry) {
        let key = (cover.to_string(), expiry.direction);
        if self
            .timers
            .get(&key)
            .is_some_and(|timer| timer.pulse_id == expiry.pulse_id)
        {
            self.timers.remove(&key);
        }

        let Some(pulse) = self.covers.get_mut(cover) else {
            return;
        };

        let transition = pulse.expire(expiry.direction, expiry.pulse_id);
        if transition.is_noop() {
            log_debug!(
                "Stale expiry for {} {} (pulse {})",
                cover,
                expiry.direction,
                expiry.pulse_id
            );
            return;
        }

        log_debug!("⏲️ {} {} pulse elapsed", cover, expiry.direction);
        self.apply_transition(cover, transition).await;
    }
}
