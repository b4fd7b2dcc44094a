//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, RunContext};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyPresentFilter)
///     .add_filter(TitleQualityFilter::new(rules.clone()))
///     .add_filter(MinimumDurationFilter::new(15));
///
/// let filtered = pipeline.apply(candidates, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply(&self, candidates: Vec<Candidate>, context: &RunContext) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
            if current.is_empty() {
                break;
            }
        }
        Ok(current)
    }

    /// Name of the first filter that rejects `candidate`, or `None` if every
    /// filter accepts it.
    pub fn first_rejection(&self, candidate: &Candidate, context: &RunContext) -> Result<Option<&str>> {
        for filter in &self.filters {
            if filter.apply(vec![candidate.clone()], context)?.is_empty() {
                return Ok(Some(filter.name()));
            }
        }
        Ok(None)
    }

    /// Whether `candidate` passes every filter.
    pub fn accepts(&self, candidate: &Candidate, context: &RunContext) -> Result<bool> {
        Ok(self.first_rejection(candidate, context)?.is_none())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{AlreadyPresentFilter, VisibilityFilter};
    use catalog::{SearchHit, VideoId};
    use sources::CandidateSource;

    fn candidate(id: &str, order: usize) -> Candidate {
        Candidate::new(
            SearchHit::new(id, "Surah Yasin", "Alafasy"),
            CandidateSource::Broad,
            "q",
            order,
        )
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = RunContext::new("PL1", Vec::new());

        let candidates = vec![candidate("a", 0), candidate("b", 1)];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 2);
        assert!(pipeline.accepts(&candidate("a", 0), &context).unwrap());
    }

    #[test]
    fn test_single_filter() {
        let context = RunContext::new("PL1", vec![VideoId::new("a")]);

        let pipeline = FilterPipeline::new().add_filter(AlreadyPresentFilter);

        let candidates = vec![candidate("a", 0), candidate("b", 1)];

        let filtered = pipeline.apply(candidates, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].video_id(), &VideoId::new("b"));
    }

    #[test]
    fn test_first_rejection_names_the_filter() {
        let context = RunContext::new("PL1", Vec::new());
        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyPresentFilter)
            .add_filter(VisibilityFilter);

        // no details attached, so visibility is unknown
        let rejected_by = pipeline.first_rejection(&candidate("a", 0), &context).unwrap();
        assert_eq!(rejected_by, Some("VisibilityFilter"));
        assert_eq!(pipeline.filter_names(), vec!["AlreadyPresentFilter", "VisibilityFilter"]);
    }
}
