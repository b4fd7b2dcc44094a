//! Filter to keep only videos by a preferred creator.
//!
//! A candidate matches when a full creator name or a distinctive surname
//! fragment appears in its title or channel name, case-insensitively.

use crate::traits::Filter;
use anyhow::Result;
use catalog::PreferenceRules;
use sources::{Candidate, RunContext};
use std::sync::Arc;

/// Keeps only candidates attributable to a preferred creator.
pub struct CreatorPreferenceFilter {
    rules: Arc<PreferenceRules>,
}

impl CreatorPreferenceFilter {
    pub fn new(rules: Arc<PreferenceRules>) -> Self {
        Self { rules }
    }
}

impl Filter for CreatorPreferenceFilter {
    fn name(&self) -> &str {
        "CreatorPreferenceFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &RunContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| {
                self.rules
                    .matches_creator(candidate.title(), candidate.channel())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::SearchHit;
    use sources::CandidateSource;

    #[test]
    fn test_creator_preference_filter() {
        let context = RunContext::new("PL1", Vec::new());
        let filter = CreatorPreferenceFilter::new(Arc::new(PreferenceRules::default()));

        let candidates = vec![
            // full name in the title
            Candidate::new(
                SearchHit::new("a", "Surah Yasin - Mishary Rashid Alafasy", "Some Uploader"),
                CandidateSource::Random,
                "q",
                0,
            ),
            // fragment in the channel only
            Candidate::new(
                SearchHit::new("b", "Surah Rahman", "Sudais Official"),
                CandidateSource::Random,
                "q",
                1,
            ),
            Candidate::new(
                SearchHit::new("c", "Surah Mulk", "Random Recitations"),
                CandidateSource::Random,
                "q",
                2,
            ),
        ];

        let filtered = filter.apply(candidates, &context).unwrap();

        let ids: Vec<&str> = filtered.iter().map(|c| c.video_id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
