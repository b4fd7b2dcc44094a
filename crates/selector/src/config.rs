//! Numeric bounds for a selection run.

use crate::error::{Result, SelectorError};
use sources::{BOOSTED_RESULTS_PER_QUERY, BROAD_RESULTS_PER_QUERY};

/// Bounds and limits for ranked and randomized selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionConfig {
    /// Shortest acceptable video, in whole minutes
    pub min_duration_minutes: u64,
    /// Randomized mode gives up after examining this many candidates
    pub max_attempts: usize,
    /// Ranked mode returns at most this many videos
    pub max_to_add: usize,
    /// Ceiling on distinct candidates collected in ranked mode
    pub max_candidates: usize,
    pub broad_results: u32,
    pub boosted_results: u32,
    /// Results requested for each randomized search
    pub random_results: u32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_duration_minutes: 15,
            max_attempts: 40,
            max_to_add: 3,
            max_candidates: 120,
            broad_results: BROAD_RESULTS_PER_QUERY,
            boosted_results: BOOSTED_RESULTS_PER_QUERY,
            random_results: 25,
        }
    }
}

impl SelectionConfig {
    pub fn with_min_duration_minutes(mut self, minutes: u64) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn with_max_to_add(mut self, count: usize) -> Self {
        self.max_to_add = count;
        self
    }

    pub fn with_max_candidates(mut self, count: usize) -> Self {
        self.max_candidates = count;
        self
    }

    pub fn with_random_results(mut self, count: u32) -> Self {
        self.random_results = count;
        self
    }

    /// Reject settings under which no run could ever pick anything.
    pub fn validate(&self) -> Result<()> {
        if self.max_to_add == 0 {
            return Err(SelectorError::Config("max_to_add must be at least 1".into()));
        }
        if self.max_candidates == 0 {
            return Err(SelectorError::Config("max_candidates must be at least 1".into()));
        }
        if self.broad_results == 0 || self.boosted_results == 0 || self.random_results == 0 {
            return Err(SelectorError::Config(
                "per-query result limits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
