//! Addressing mode for a deployment.

use std::fmt;
use std::str::FromStr;

/// How messages are addressed in this deployment.
///
/// The two modes are mutually exclusive per process: a paired relay
/// ignores direct-addressing events and vice versa.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Anonymous pairing: participants are matched into pairs and text
    /// is relayed to the current partner.
    Paired,

    /// Named addressing: participants send to an explicit recipient and
    /// can query the roster and per-pair history.
    Direct,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Paired => write!(f, "paired"),
            Mode::Direct => write!(f, "direct"),
        }
    }
}

/// Error returned when parsing a [`Mode`] from a string fails.
#[derive(Debug)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown mode '{}', expected 'paired' or 'direct'", self.0)
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paired" => Ok(Mode::Paired),
            "direct" => Ok(Mode::Direct),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}
