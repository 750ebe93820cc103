//! Match clock helpers.
//!
//! Providers report whole minutes. Stoppage time is not modelled: a shot in
//! minute 47 of a long first half is classified by the threshold alone unless
//! the provider names the period itself.

use crate::domain::Period;

pub const DEFAULT_HALF_LENGTH_MINUTES: u32 = 45;

pub fn seconds_from_minute(minute: u32) -> u32 {
    minute.saturating_mul(60)
}

/// Period from elapsed seconds when the provider has no period field.
///
/// Anything up to and including the end of the first half's nominal length is
/// first half; everything after is second half.
pub fn infer_period(seconds: u32, half_length_minutes: u32) -> Period {
    if seconds <= seconds_from_minute(half_length_minutes) {
        Period::FirstHalf
    } else {
        Period::SecondHalf
    }
}
