mod validate;
mod parse_cover;
mod validate_segment;
mod validate_inputs;

/// Turns the raw YAML cover map into a checked [`ConfigSet`](crate::config::ConfigSet)
pub struct ConfigValidator;
