//! Filter to remove videos the destination playlist already holds.
//!
//! This is typically the first filter in the pipeline, as there's no
//! point examining a video that can never be inserted.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, RunContext};

/// Removes candidates already present in the run's membership set.
///
/// ## Algorithm
/// Uses the HashSet in RunContext for O(1) lookups. The set includes
/// anything accepted earlier in the same run.
pub struct AlreadyPresentFilter;

impl Filter for AlreadyPresentFilter {
    fn name(&self) -> &str {
        "AlreadyPresentFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, context: &RunContext) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !context.contains(candidate.video_id()))
            .collect();
        Ok(filtered)
    }
}
