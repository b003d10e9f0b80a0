mod new;
mod run;
mod handle;
mod handle_command;
mod handle_expiry;
mod apply_transition;
mod release_all;
mod snapshot;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;

use crate::config::{ConfigSet, Direction, RelayId};
use crate::gateway::Gateway;
use crate::topic::TopicRouter;

use super::{Command, CoverPulse, Expiry, PulseState};

pub use handle::ControllerHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseSettings {
    /// How long a relay stays asserted per pulse
    pub on_time: Duration,
    /// Publish opening/closing/stopped on the cover state topic
    pub publish_state: bool,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            on_time: Duration::from_secs(3),
            publish_state: false,
        }
    }
}

/// Point-in-time copy of one cover's pulse state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverSnapshot {
    pub open: PulseState,
    pub close: PulseState,
}

impl CoverSnapshot {
    pub fn state(&self, direction: Direction) -> &PulseState {
        match direction {
            Direction::Open => &self.open,
            Direction::Close => &self.close,
        }
    }
}

/// Everything that can touch cover state goes through this one queue
#[derive(Debug)]
pub(crate) enum ControllerEvent {
    Command(Command),
    Expired { cover: String, expiry: Expiry },
    ReleaseAll { done: Option<oneshot::Sender<()>> },
    Snapshot { cover: String, reply: oneshot::Sender<Option<CoverSnapshot>> },
    Shutdown,
}

struct ScheduledExpiry {
    pulse_id: u64,
    handle: AbortHandle,
}

/// Single owner of every cover's [`CoverPulse`].
///
/// Commands and timer expiries are handled one at a time in arrival order,
/// so no two transitions for a cover ever interleave.
pub struct PulseController {
    config: ConfigSet,
    /// Created on the first command for a cover
    covers: HashMap<String, CoverPulse>,
    timers: HashMap<(String, Direction), ScheduledExpiry>,
    /// Relays whose last release publish failed
    undelivered: HashSet<RelayId>,
    router: Arc<TopicRouter>,
    gateway: Arc<dyn Gateway>,
    settings: PulseSettings,
    events: mpsc::WeakUnboundedSender<ControllerEvent>,
    receiver: mpsc::UnboundedReceiver<ControllerEvent>,
}
