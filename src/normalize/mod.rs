//! Provider-independent normalization building blocks.

pub mod coordinates;
pub mod period;
pub mod resolver;
pub mod vocab;

pub use resolver::{Roster, Teams};
pub use vocab::VocabTable;

use serde::{Deserialize, Serialize};

/// What to do with a shot that cannot be normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotErrorPolicy {
    /// Fail the whole match on the first bad shot
    #[default]
    Abort,
    /// Drop the shot, log it and record it on the game
    Skip,
}

impl std::str::FromStr for ShotErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!("unknown shot error policy: {other}")),
        }
    }
}

/// Knobs shared by every provider pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    #[serde(default)]
    pub shot_error_policy: ShotErrorPolicy,
    #[serde(default = "default_half_length_minutes")]
    pub half_length_minutes: u32,
}

fn default_half_length_minutes() -> u32 {
    period::DEFAULT_HALF_LENGTH_MINUTES
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            shot_error_policy: ShotErrorPolicy::default(),
            half_length_minutes: default_half_length_minutes(),
        }
    }
}
