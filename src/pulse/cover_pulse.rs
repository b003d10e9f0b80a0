use std::time::Duration;

use tokio::time::Instant;

use crate::config::{CoverConfig, Direction};
use crate::log_warn;

use super::{Action, CoverMotion, PulseState, RelayCommand, MAX_ON_TIME};

/// A scheduled release for the pulse identified by `pulse_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub direction: Direction,
    pub pulse_id: u64,
    pub deadline: Instant,
}

/// Side effects of one state change, applied in field order by the controller:
/// cancel timers, arm the new one, publish relay writes, publish the motion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transition {
    pub publishes: Vec<RelayCommand>,
    pub cancel: Vec<Direction>,
    pub arm: Option<Expiry>,
    pub motion: Option<CoverMotion>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.publishes.is_empty() && self.cancel.is_empty() && self.arm.is_none() && self.motion.is_none()
    }
}

/// Idle/Pulsing state machine for the two relays of one cover.
///
/// At most one direction is ever active.
#[derive(Debug, Clone)]
pub struct CoverPulse {
    name: String,
    open: PulseState,
    close: PulseState,
    next_pulse_id: u64,
}

impl CoverPulse {
    pub fn new(cover: &CoverConfig) -> Self {
        Self {
            name: cover.name.clone(),
            open: PulseState::idle(cover.open_relay.clone()),
            close: PulseState::idle(cover.close_relay.clone()),
            next_pulse_id: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self, direction: Direction) -> &PulseState {
        match direction {
            Direction::Open => &self.open,
            Direction::Close => &self.close,
        }
    }

    fn state_mut(&mut self, direction: Direction) -> &mut PulseState {
        match direction {
            Direction::Open => &mut self.open,
            Direction::Close => &mut self.close,
        }
    }

    /// The direction currently pulsing, if any
    pub fn pulsing(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| self.state(*d).active)
    }

    pub fn apply(&mut self, action: Action, now: Instant, on_time: Duration) -> Transition {
        let transition = match action {
            Action::Open => self.start(Direction::Open, now, on_time),
            Action::Close => self.start(Direction::Close, now, on_time),
            Action::Stop => self.stop(),
        };
        debug_assert!(!(self.open.active && self.close.active));
        transition
    }

    fn start(&mut self, direction: Direction, now: Instant, on_time: Duration) -> Transition {
        let mut transition = Transition::default();
        let pulse_id = self.next_pulse_id;
        self.next_pulse_id += 1;
        let deadline = Self::deadline(now, on_time);

        if self.state(direction).active {
            // Repeat press: relay stays asserted, only the deadline moves
            let state = self.state_mut(direction);
            state.expires_at = Some(deadline);
            state.pulse_id = Some(pulse_id);
            transition.arm = Some(Expiry { direction, pulse_id, deadline });
            return transition;
        }

        if self.state(direction.opposite()).active {
            self.release(direction.opposite(), &mut transition);
        }

        let state = self.state_mut(direction);
        state.active = true;
        state.expires_at = Some(deadline);
        state.pulse_id = Some(pulse_id);

        transition.publishes.push(RelayCommand::assert(state.relay.clone()));
        transition.arm = Some(Expiry { direction, pulse_id, deadline });
        transition.motion = Some(CoverMotion::from(direction));
        transition
    }

    /// `now + on_time`, clamped to [`MAX_ON_TIME`] so the addition cannot overflow
    fn deadline(now: Instant, on_time: Duration) -> Instant {
        if on_time > MAX_ON_TIME {
            log_warn!("Pulse length {:?} exceeds {:?}, clamping", on_time, MAX_ON_TIME);
        }
        let on_time = on_time.min(MAX_ON_TIME);
        now.checked_add(on_time).unwrap_or(now)
    }

    /// Release whatever is pulsing. No-op when both directions are idle.
    pub fn stop(&mut self) -> Transition {
        let mut transition = Transition::default();

        for direction in Direction::ALL {
            if self.state(direction).active {
                self.release(direction, &mut transition);
            }
        }

        if !transition.publishes.is_empty() {
            transition.motion = Some(CoverMotion::Stopped);
        }
        transition
    }

    /// Timer for `pulse_id` fired. Ignored unless that pulse is still the live one.
    pub fn expire(&mut self, direction: Direction, pulse_id: u64) -> Transition {
        let state = self.state(direction);
        if !state.active || state.pulse_id != Some(pulse_id) {
            return Transition::default();
        }

        let mut transition = Transition::default();
        self.release(direction, &mut transition);
        transition.motion = Some(CoverMotion::Stopped);
        transition
    }

    fn release(&mut self, direction: Direction, transition: &mut Transition) {
        let state = self.state_mut(direction);
        state.active = false;
        state.expires_at = None;
        state.pulse_id = None;

        transition.publishes.push(RelayCommand::release(state.relay.clone()));
        transition.cancel.push(direction);
    }
}
