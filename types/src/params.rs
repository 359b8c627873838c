//! Tunable election parameters.
//!
//! The workflow itself is fixed; these only adjust edge-case behaviour of the
//! registration operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What `register_voter` does when the identity is already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReRegistrationPolicy {
    /// Succeed without touching the voter record or emitting an event.
    #[default]
    Ignore,
    /// Overwrite the record with a fresh registration and emit `VoterRegistered`.
    ResetVote,
}

impl ReRegistrationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::ResetVote => "reset_vote",
        }
    }
}

impl fmt::Display for ReRegistrationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters fixed at engine construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionParams {
    #[serde(default)]
    pub reregistration: ReRegistrationPolicy,
    /// Maximum proposal description length in bytes. `0` means unlimited.
    #[serde(default)]
    pub max_description_len: usize,
}

impl ElectionParams {
    /// Whether a description of `len` bytes is within the configured limit.
    pub fn description_fits(&self, len: usize) -> bool {
        self.max_description_len == 0 || len <= self.max_description_len
    }
}
