mod error;
mod config_validator;

pub use config_validator::ConfigValidator;
pub use error::ValidationError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Direction, InputId, RelayId};
    use crate::error::ConfigError;

    #[test]
    fn test_flat_config() {
        let yaml = r#"
office:
  open: "3_11"
  close: "3_12"
"#;

        let config = ConfigValidator::validate(yaml).unwrap();
        let office = config.get("office").unwrap();

        assert_eq!(office.relay(Direction::Open), &RelayId::new("3_11"));
        assert_eq!(office.relay(Direction::Close), &RelayId::new("3_12"));
        assert_eq!(office.input(Direction::Open), None);
    }

    #[test]
    fn test_nested_config_with_inputs() {
        let yaml = r#"
living_room:
  open:
    relay: "3_13"
    input: "1_4"
  close:
    relay: "3_14"
"#;

        let config = ConfigValidator::validate(yaml).unwrap();
        let cover = config.get("living_room").unwrap();

        assert_eq!(cover.open_relay, RelayId::new("3_13"));
        assert_eq!(cover.open_input, Some(InputId::new("1_4")));
        assert_eq!(cover.close_relay, RelayId::new("3_14"));
        assert_eq!(cover.close_input, None);
    }

    #[test]
    fn test_mixed_shapes_and_bare_numbers() {
        let yaml = r#"
office:
  open: 11
  close: 12
kitchen:
  open: { relay: "4_1", input: "2_1" }
  close: { relay: "4_2", input: "2_2" }
"#;

        let config = ConfigValidator::validate(yaml).unwrap();

        assert_eq!(config.len(), 2);
        assert_eq!(config.get("office").unwrap().open_relay.as_str(), "11");
        let names: Vec<&str> = config.covers().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["kitchen", "office"]);
    }

    #[test]
    fn test_missing_close_relay() {
        let yaml = r#"
office:
  open: "3_11"
"#;

        let err = ConfigValidator::validate(yaml).unwrap_err();
        match err {
            ConfigError::Validation(e) => {
                assert_eq!(e.field, "office");
                assert!(e.error.contains("close"), "{}", e.error);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nested_entry_without_relay() {
        let yaml = r#"
office:
  open: { input: "1_1" }
  close: "3_12"
"#;

        let err = ConfigValidator::validate(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(e) if e.field == "office"));
    }

    #[test]
    fn test_float_relay_ids_are_rejected() {
        let yaml = r#"
office:
  open: 3.10
  close: 3.11
"#;

        let err = ConfigValidator::validate(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(e) if e.field == "office"));
    }

    #[test]
    fn test_unsafe_nested_relay_names_the_field() {
        let yaml = r#"
office:
  open: { relay: "3/11" }
  close: "3_12"
"#;

        let err = ConfigValidator::validate(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(e) if e.field == "office.open.relay"));
    }

    #[test]
    fn test_same_relay_for_both_directions() {
        let yaml = r#"
office:
  open: "3_11"
  close: "3_11"
"#;

        assert!(ConfigValidator::validate(yaml).is_err());
    }

    #[test]
    fn test_unknown_action_key() {
        let yaml = r#"
office:
  open: "3_11"
  close: "3_12"
  stop: "3_13"
"#;

        assert!(ConfigValidator::validate(yaml).is_err());
    }

    #[test]
    fn test_shared_relay_across_covers_is_allowed() {
        let yaml = r#"
office:
  open: "3_11"
  close: "3_12"
study:
  open: "3_11"
  close: "3_13"
"#;

        assert!(ConfigValidator::validate(yaml).is_ok());
    }

    #[test]
    fn test_input_used_twice() {
        let yaml = r#"
office:
  open: { relay: "3_11", input: "1_1" }
  close: { relay: "3_12", input: "1_2" }
study:
  open: { relay: "3_13", input: "1_1" }
  close: "3_14"
"#;

        let err = ConfigValidator::validate(yaml).unwrap_err();
        match err {
            ConfigError::Validation(e) => assert_eq!(e.field, "study.open.input"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_topic_unsafe_names() {
        let yaml = r#"
"office/left":
  open: "3_11"
  close: "3_12"
"#;
        assert!(ConfigValidator::validate(yaml).is_err());

        let yaml = r#"
office:
  open: "3_+"
  close: "3_12"
"#;
        assert!(ConfigValidator::validate(yaml).is_err());
    }

    #[test]
    fn test_empty_config() {
        assert!(ConfigValidator::validate("{}").is_err());
        assert!(ConfigValidator::validate("- office").is_err());
    }

    #[test]
    fn test_malformed_yaml() {
        let result = ConfigValidator::validate("office: [open, close");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_duplicate_cover_names() {
        let yaml = r#"
office:
  open: "3_11"
  close: "3_12"
office:
  open: "3_13"
  close: "3_14"
"#;

        assert!(ConfigValidator::validate(yaml).is_err());
    }
}
