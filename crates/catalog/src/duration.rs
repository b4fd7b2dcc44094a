//! Decoder for the platform's compact duration encoding.
//!
//! Durations arrive as `PT#H#M#S` tokens where any of the hour, minute and
//! second components may be absent (`"PT24M47S"`, `"PT1H"`, `"PT45S"`).
//! Anything else decodes to `None`, which callers treat as "unknown" and
//! filter out. Decoding never fails loudly.

use regex::Regex;
use std::sync::LazyLock;

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("duration pattern is valid")
});

/// Decode a compact duration into total seconds.
///
/// ## Returns
/// * `Some(seconds)` - hours×3600 + minutes×60 + seconds
/// * `None` - the input does not match the grammar, has no component at
///   all (`"PT"`), or overflows `u64`
pub fn decode_duration(encoded: &str) -> Option<u64> {
    let caps = DURATION_RE.captures(encoded.trim())?;

    // "PT" alone matches the regex but carries no information
    if caps.get(1).is_none() && caps.get(2).is_none() && caps.get(3).is_none() {
        return None;
    }

    let component = |idx: usize| -> Option<u64> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Convert seconds to whole minutes for threshold comparisons.
///
/// A partial-minute remainder of 30 seconds or more rounds up, anything
/// shorter is truncated.
pub fn whole_minutes(seconds: u64) -> u64 {
    let minutes = seconds / 60;
    if seconds % 60 >= 30 {
        minutes + 1
    } else {
        minutes
    }
}
