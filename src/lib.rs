pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod homeassistant;
pub mod pulse;
pub mod runtime;
pub mod topic;
pub mod util;

pub use runtime::{Runtime, RuntimeConfig};
