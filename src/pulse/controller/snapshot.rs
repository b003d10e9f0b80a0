use crate::config::Direction;
use crate::pulse::PulseState;

use super::{CoverSnapshot, PulseController};

impl PulseController {
    pub(super) fn snapshot(&self, cover: &str) -> Option<CoverSnapshot> {
        if let Some(pulse) = self.covers.get(cover) {
            return Some(CoverSnapshot {
                open: pulse.state(Direction::Open).clone(),
                close: pulse.state(Direction::Close).clone(),
            });
        }

        // Configured but never commanded
        self.config.get(cover).map(|config| CoverSnapshot {
            open: PulseState::idle(config.open_relay.clone()),
            close: PulseState::idle(config.close_relay.clone()),
        })
    }
}
