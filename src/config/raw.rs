//! Cover file entries exactly as written, before semantic checks

use serde::Deserialize;

/// A relay, input or cover name. Written quoted or as a bare integer; floats are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, expecting = "a string or integer id")]
pub(crate) enum RawId {
    Text(String),
    Integer(i64),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Integer(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCover {
    pub open: RawAction,
    pub close: RawAction,
}

/// `open: "3_11"` or `open: { relay: "3_11", input: "1_4" }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged, expecting = "a relay id or a mapping with `relay` and optional `input`")]
pub(crate) enum RawAction {
    Relay(RawId),
    Wired(RawWired),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawWired {
    pub relay: RawId,
    #[serde(default)]
    pub input: Option<RawId>,
}
