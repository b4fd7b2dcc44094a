//! Filter to enforce the minimum length floor.
//!
//! Removes short videos, keeping the playlist to full-length recitations.

use crate::traits::Filter;
use anyhow::Result;
use catalog::whole_minutes;
use sources::{Candidate, RunContext};

/// Removes candidates shorter than a whole-minute floor.
///
/// ## Algorithm
/// For each candidate:
/// 1. Take the decoded duration in seconds (unknown → rejected)
/// 2. Round to whole minutes (a remainder of 30 s or more rounds up)
/// 3. Keep only if minutes >= min_minutes
pub struct MinimumDurationFilter {
    min_minutes: u64,
}

impl MinimumDurationFilter {
    /// Create a new MinimumDurationFilter.
    ///
    /// # Arguments
    /// * `min_minutes` - Minimum length in whole minutes (typically 15)
    pub fn new(min_minutes: u64) -> Self {
        Self { min_minutes }
    }

    pub fn min_minutes(&self) -> u64 {
        self.min_minutes
    }
}

impl Filter for MinimumDurationFilter {
    fn name(&self) -> &str {
        "MinimumDurationFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &RunContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| match candidate.item.duration_secs {
                Some(secs) => whole_minutes(secs) >= self.min_minutes,
                None => false,
            })
            .collect())
    }
}
