use crate::config::Direction;
use crate::pulse::Action;

/// Literal payloads exchanged with the hub and the relay controller firmware
pub struct Payloads;

impl Payloads {
    // Hub cover commands
    pub const COVER_OPEN: &'static str = "OPEN";
    pub const COVER_CLOSE: &'static str = "CLOSE";
    pub const COVER_STOP: &'static str = "STOP";

    // Switch and input levels
    pub const SWITCH_ON: &'static str = "ON";
    pub const SWITCH_OFF: &'static str = "OFF";

    // Relay commands, must match the firmware exactly
    pub const RELAY_ASSERT: &'static str = "1";
    pub const RELAY_RELEASE: &'static str = "0";

    // Cover state
    pub const STATE_OPENING: &'static str = "opening";
    pub const STATE_CLOSING: &'static str = "closing";
    pub const STATE_STOPPED: &'static str = "stopped";
}

pub(super) fn parse_cover_payload(text: &str) -> Option<Action> {
    if text.eq_ignore_ascii_case(Payloads::COVER_OPEN) {
        Some(Action::Open)
    } else if text.eq_ignore_ascii_case(Payloads::COVER_CLOSE) {
        Some(Action::Close)
    } else if text.eq_ignore_ascii_case(Payloads::COVER_STOP) {
        Some(Action::Stop)
    } else {
        None
    }
}

/// Pressing a switch starts its direction, letting go stops the cover
pub(super) fn parse_switch_payload(text: &str, direction: Direction) -> Option<Action> {
    if text == Payloads::RELAY_ASSERT || text.eq_ignore_ascii_case(Payloads::SWITCH_ON) {
        Some(Action::from(direction))
    } else if text == Payloads::RELAY_RELEASE || text.eq_ignore_ascii_case(Payloads::SWITCH_OFF) {
        Some(Action::Stop)
    } else {
        None
    }
}
