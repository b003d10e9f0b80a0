mod load;
mod raw;
mod validation;

use std::collections::BTreeMap;
use std::fmt;

pub use validation::{ConfigValidator, ValidationError};

/// Address of a relay output on the relay controller, e.g. `3_14`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelayId(String);

/// Address of a physical push-button input on the relay controller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(String);

impl RelayId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl InputId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two relays wired to a cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Open,
    Close,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Open, Direction::Close];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Open => Direction::Close,
            Direction::Close => Direction::Open,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Open => "open",
            Direction::Close => "close",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wiring of a single cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverConfig {
    pub name: String,
    pub open_relay: RelayId,
    pub close_relay: RelayId,
    pub open_input: Option<InputId>,
    pub close_input: Option<InputId>,
}

impl CoverConfig {
    pub fn relay(&self, direction: Direction) -> &RelayId {
        match direction {
            Direction::Open => &self.open_relay,
            Direction::Close => &self.close_relay,
        }
    }

    pub fn input(&self, direction: Direction) -> Option<&InputId> {
        match direction {
            Direction::Open => self.open_input.as_ref(),
            Direction::Close => self.close_input.as_ref(),
        }
    }
}

/// All configured covers, keyed by name. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSet {
    covers: BTreeMap<String, CoverConfig>,
}

impl ConfigSet {
    pub fn get(&self, name: &str) -> Option<&CoverConfig> {
        self.covers.get(name)
    }

    pub fn covers(&self) -> impl Iterator<Item = &CoverConfig> {
        self.covers.values()
    }

    pub fn len(&self) -> usize {
        self.covers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.covers.is_empty()
    }
}

impl FromIterator<CoverConfig> for ConfigSet {
    fn from_iter<I: IntoIterator<Item = CoverConfig>>(iter: I) -> Self {
        Self {
            covers: iter
                .into_iter()
                .map(|cover| (cover.name.clone(), cover))
                .collect(),
        }
    }
}
