//! Preference scoring for candidate ranking.
//!
//! Candidates that survive the hard filters are weighted by how strongly
//! they point at preferred creators and topics, then ranked.

use catalog::PreferenceRules;
use rayon::prelude::*;
use sources::Candidate;
use std::cmp::Reverse;
use std::sync::Arc;

/// A candidate together with its preference weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: u32,
}

/// Scores and ranks candidates against [`PreferenceRules`].
///
/// ## Performance Note
/// Uses Rayon for the scoring map. Scores come back in input order, so
/// ranking stays deterministic regardless of thread scheduling.
#[derive(Clone)]
pub struct PreferenceScorer {
    rules: Arc<PreferenceRules>,
}

impl PreferenceScorer {
    pub fn new(rules: Arc<PreferenceRules>) -> Self {
        Self { rules }
    }

    /// Score every candidate, in the same order as the input.
    pub fn score_all(&self, candidates: &[Candidate]) -> Vec<u32> {
        candidates
            .par_iter()
            .map(|candidate| self.score(candidate))
            .collect()
    }

    /// Score a single candidate.
    pub fn score(&self, candidate: &Candidate) -> u32 {
        self.rules
            .preference_score(candidate.title(), candidate.channel())
    }

    /// Score and sort candidates, highest first.
    ///
    /// ## Algorithm
    /// 1. Score all candidates in parallel
    /// 2. Stable sort by descending score
    /// 3. Equal scores keep discovery order
    pub fn rank(&self, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        let scores = self.score_all(&candidates);
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .zip(scores)
            .map(|(candidate, score)| ScoredCandidate { candidate, score })
            .collect();
        scored.sort_by_key(|s| (Reverse(s.score), s.candidate.discovery_order));
        scored
    }

    /// The `k` best candidates.
    pub fn top_k(&self, candidates: Vec<Candidate>, k: usize) -> Vec<ScoredCandidate> {
        let mut ranked = self.rank(candidates);
        ranked.truncate(k);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::SearchHit;
    use sources::CandidateSource;

    fn candidate(id: &str, title: &str, channel: &str, order: usize) -> Candidate {
        Candidate::new(SearchHit::new(id, title, channel), CandidateSource::Broad, "q", order)
    }

    fn scorer() -> PreferenceScorer {
        PreferenceScorer::new(Arc::new(PreferenceRules::default()))
    }

    #[test]
    fn test_score_weights() {
        let scorer = scorer();
        // creator in title (5) + creator in channel (3) + topic in title (2)
        let full = candidate(
            "a",
            "Surah Yasin | Mishary Rashid Alafasy",
            "Mishary Rashid Alafasy",
            0,
        );
        assert_eq!(scorer.score(&full), 10);

        let channel_only = candidate("b", "Beautiful recitation", "Saad Al Ghamdi", 1);
        assert_eq!(scorer.score(&channel_only), 3);

        let nothing = candidate("c", "Morning vlog", "Someone", 2);
        assert_eq!(scorer.score(&nothing), 0);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let scorer = scorer();
        let candidates = vec![
            candidate("first", "Recitation", "Someone", 0),
            candidate("best", "Saad Al Ghamdi surah yasin", "x", 1),
            candidate("second", "Recitation", "Someone else", 2),
            candidate("third", "Another", "Nobody", 3),
        ];

        let ranked = scorer.rank(candidates);

        let ids: Vec<&str> = ranked.iter().map(|s| s.candidate.video_id().as_str()).collect();
        assert_eq!(ids, vec!["best", "first", "second", "third"]);
        assert_eq!(ranked[0].score, 7);
    }

    #[test]
    fn test_top_k() {
        let scorer = scorer();
        let candidates: Vec<Candidate> = (0..10)
            .map(|i| candidate(&format!("v{i}"), "Recitation", "Someone", i))
            .collect();

        let top = scorer.top_k(candidates, 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[2].candidate.discovery_order, 2);
        assert!(scorer.top_k(Vec::new(), 3).is_empty());
    }
}
