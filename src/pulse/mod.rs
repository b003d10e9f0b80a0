//! Pulse Controller - turns cover commands into timed relay pulses
//!
//! [`CoverPulse`] is the synchronous per-cover state machine. [`PulseController`]
//! owns one `CoverPulse` per cover, funnels commands and timer expiries through a
//! single channel and carries out the resulting [`Transition`]s.

mod cover_pulse;
pub mod controller;

use std::time::Duration;

use tokio::time::Instant;

use crate::config::{Direction, RelayId};
use crate::topic::Payloads;

pub use controller::{ControllerHandle, CoverSnapshot, PulseController, PulseSettings};
pub use cover_pulse::{CoverPulse, Expiry, Transition};

/// Longest pulse a relay may be held for
pub const MAX_ON_TIME: Duration = Duration::from_secs(3600);

/// What the hub asked a cover to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Open,
    Close,
    Stop,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Open => Action::Open,
            Direction::Close => Action::Close,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub cover: String,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayLevel {
    Assert,
    Release,
}

impl RelayLevel {
    pub fn payload(self) -> &'static str {
        match self {
            RelayLevel::Assert => Payloads::RELAY_ASSERT,
            RelayLevel::Release => Payloads::RELAY_RELEASE,
        }
    }
}

/// A single relay write to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCommand {
    pub relay: RelayId,
    pub level: RelayLevel,
}

impl RelayCommand {
    pub fn assert(relay: RelayId) -> Self {
        Self { relay, level: RelayLevel::Assert }
    }

    pub fn release(relay: RelayId) -> Self {
        Self { relay, level: RelayLevel::Release }
    }
}

/// Pulse bookkeeping for one direction of one cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulseState {
    pub relay: RelayId,
    pub active: bool,
    pub expires_at: Option<Instant>,
    /// Identifies the current pulse; expiries carrying any other id are stale
    pub pulse_id: Option<u64>,
}

impl PulseState {
    pub fn idle(relay: RelayId) -> Self {
        Self {
            relay,
            active: false,
            expires_at: None,
            pulse_id: None,
        }
    }
}

/// Cover-level movement, published on the state topic when enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverMotion {
    Opening,
    Closing,
    Stopped,
}

impl CoverMotion {
    pub fn payload(self) -> &'static str {
        match self {
            CoverMotion::Opening => Payloads::STATE_OPENING,
            CoverMotion::Closing => Payloads::STATE_CLOSING,
            CoverMotion::Stopped => Payloads::STATE_STOPPED,
        }
    }
}

impl From<Direction> for CoverMotion {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Open => CoverMotion::Opening,
            Direction::Close => CoverMotion::Closing,
        }
    }
}
