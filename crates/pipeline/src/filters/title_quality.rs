//! Filter to drop low-quality uploads by title.
//!
//! Shorts, edits, sped-up or slowed versions, memes, clips, multi-part
//! fragments and the like are recognised by case-insensitive markers held in
//! [`PreferenceRules`].

use crate::traits::Filter;
use anyhow::Result;
use catalog::PreferenceRules;
use sources::{Candidate, RunContext};
use std::sync::Arc;

/// Removes candidates whose title matches any disallowed pattern.
pub struct TitleQualityFilter {
    rules: Arc<PreferenceRules>,
}

impl TitleQualityFilter {
    pub fn new(rules: Arc<PreferenceRules>) -> Self {
        Self { rules }
    }
}

impl Filter for TitleQualityFilter {
    fn name(&self) -> &str {
        "TitleQualityFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, _context: &RunContext) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .filter(|candidate| !self.rules.is_bad_title(candidate.title()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::SearchHit;
    use sources::CandidateSource;

    fn candidate(id: &str, title: &str) -> Candidate {
        Candidate::new(SearchHit::new(id, title, "Channel"), CandidateSource::Broad, "q", 0)
    }

    #[test]
    fn test_title_quality_filter() {
        let context = RunContext::new("PL1", Vec::new());
        let filter = TitleQualityFilter::new(Arc::new(PreferenceRules::default()));

        let candidates = vec![
            candidate("a", "Surah Al-Kahf (Edited) #shorts"),
            candidate("b", "Surah Al-Kahf full recitation"),
            candidate("c", "SURAH YASIN SPED UP"),
            candidate("d", "Surah Mulk Part 2"),
            candidate("e", "Beautiful Surah Rahman"),
        ];

        let filtered = filter.apply(candidates, &context).unwrap();

        let ids: Vec<&str> = filtered.iter().map(|c| c.video_id().as_str()).collect();
        assert_eq!(ids, vec!["b", "e"]);
    }
}
