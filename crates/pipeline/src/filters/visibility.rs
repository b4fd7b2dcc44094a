//! Filter to keep only videos that can be shown to playlist viewers.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, RunContext};

/// Removes private candidates, and candidates whose privacy status is
/// unknown because no details were returned for them.
pub struct VisibilityFilter;

impl Filter for VisibilityFilter {
    fn name(&self) -> &str {
        "VisibilityFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &RunContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| matches!(candidate.item.visibility, Some(v) if !v.is_private()))
            .collect())
    }
}
