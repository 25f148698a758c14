//! Recognized signal identifiers.

use std::fmt;
use std::str::FromStr;

/// Signals handled by the decorator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    /// Serve an image referenced from a document.
    Image,
}

impl Signal {
    /// Wire identifier of the signal.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "parsedown2image",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal identifier not handled by the decorator.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Unknown signal: {0}")]
pub struct UnknownSignal(pub String);

impl FromStr for Signal {
    type Err = UnknownSignal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parsedown2image" => Ok(Self::Image),
            other => Err(UnknownSignal(other.to_owned())),
        }
    }
}
