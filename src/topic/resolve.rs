use crate::{
    log_debug,
    log_warn,
    pulse::Command,
};

use super::{
    payload::{parse_cover_payload, parse_switch_payload},
    Route,
    TopicRouter,
};

impl TopicRouter {
    /// Map an inbound message to a cover command.
    ///
    /// Unknown topics and unrecognised payloads yield `None`; they are never errors.
    pub fn resolve(&self, topic: &str, payload: &[u8]) -> Option<Command> {
        let Some(route) = self.routes.get(topic) else {
            log_debug!("Ignoring message on unrouted topic {}", topic);
            return None;
        };

        let text = match std::str::from_utf8(payload) {
            Ok(text) => text.trim(),
            Err(_) => {
                log_warn!("Ignoring non UTF-8 payload on {}", topic);
                return None;
            }
        };

        let action = match route {
            Route::CoverCommand { .. } => parse_cover_payload(text),
            Route::Switch { direction, .. } | Route::Input { direction, .. } => {
                parse_switch_payload(text, *direction)
            }
        };

        match action {
            Some(action) => {
                log_debug!("{} {:?} -> {} {:?}", topic, text, route.cover(), action);
                Some(Command {
                    cover: route.cover().to_string(),
                    action,
                })
            }
            None => {
                log_warn!("Ignoring unrecognised payload {:?} on {}", text, topic);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ConfigSet;
    use crate::pulse::{Action, Command};
    use crate::topic::{BaseTopics, TopicRouter};

    fn router() -> TopicRouter {
        let config = ConfigSet::from_yaml(
            r#"
office:
  open: { relay: "3_11", input: "1_1" }
  close: { relay: "3_12", input: "1_2" }
"#,
        )
        .unwrap();
        TopicRouter::new(&config, BaseTopics::default()).unwrap()
    }

    fn command(action: Action) -> Option<Command> {
        Some(Command {
            cover: "office".to_string(),
            action,
        })
    }

    #[test]
    fn test_cover_commands() {
        let router = router();
        let topic = "homeassistant/cover/office/set";

        assert_eq!(router.resolve(topic, b"OPEN"), command(Action::Open));
        assert_eq!(router.resolve(topic, b"close"), command(Action::Close));
        assert_eq!(router.resolve(topic, b" STOP\n"), command(Action::Stop));
    }

    #[test]
    fn test_switch_press_and_release() {
        let router = router();

        assert_eq!(router.resolve("shady/input/office/open/set", b"1"), command(Action::Open));
        assert_eq!(router.resolve("shady/input/office/close/set", b"ON"), command(Action::Close));
        assert_eq!(router.resolve("shady/input/office/close/set", b"0"), command(Action::Stop));
        assert_eq!(router.resolve("shady/input/office/open/set", b"off"), command(Action::Stop));
    }

    #[test]
    fn test_physical_inputs() {
        let router = router();

        assert_eq!(router.resolve("shady/input/1_1/state", b"1"), command(Action::Open));
        assert_eq!(router.resolve("shady/input/1_2/state", b"1"), command(Action::Close));
        assert_eq!(router.resolve("shady/input/1_2/state", b"0"), command(Action::Stop));
    }

    #[test]
    fn test_unknown_topic_is_ignored() {
        let router = router();

        assert_eq!(router.resolve("homeassistant/cover/garage/set", b"OPEN"), None);
        assert_eq!(router.resolve("shady/relay/3_11/set", b"1"), None);
        assert_eq!(router.resolve("", b""), None);
    }

    #[test]
    fn test_malformed_payload_is_ignored() {
        let router = router();

        assert_eq!(router.resolve("homeassistant/cover/office/set", b"OPENING"), None);
        assert_eq!(router.resolve("homeassistant/cover/office/set", b"1"), None);
        assert_eq!(router.resolve("shady/input/office/open/set", b"OPEN"), None);
        assert_eq!(router.resolve("homeassistant/cover/office/set", &[0xff, 0xfe]), None);
    }
}
