//! Query planning.
//!
//! Turns [`PreferenceRules`] into concrete search queries:
//! - Broad queries, not restricted to any creator
//! - Boosted queries, one per creator × topic pair (`"<creator> <topic>"`)
//! - A single random creator × topic query for randomized selection

use crate::types::CandidateSource;
use catalog::PreferenceRules;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Default result ceiling for each broad query.
pub const BROAD_RESULTS_PER_QUERY: u32 = 25;
/// Default result ceiling for each boosted query.
pub const BOOSTED_RESULTS_PER_QUERY: u32 = 10;

/// One search to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedQuery {
    pub text: String,
    pub source: CandidateSource,
    pub max_results: u32,
}

/// Ordered list of searches for ranked selection.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    queries: Vec<PlannedQuery>,
}

impl SearchPlan {
    /// Broad queries first, then every creator × topic pair.
    pub fn ranked(rules: &PreferenceRules) -> Self {
        Self::ranked_with_limits(rules, BROAD_RESULTS_PER_QUERY, BOOSTED_RESULTS_PER_QUERY)
    }

    /// Same as [`SearchPlan::ranked`] with explicit per-query ceilings.
    pub fn ranked_with_limits(rules: &PreferenceRules, broad_results: u32, boosted_results: u32) -> Self {
        let broad = rules.broad_queries().iter().map(|q| PlannedQuery {
            text: q.clone(),
            source: CandidateSource::Broad,
            max_results: broad_results,
        });
        let boosted = boosted_queries(rules).into_iter().map(|text| PlannedQuery {
            text,
            source: CandidateSource::Boosted,
            max_results: boosted_results,
        });
        Self {
            queries: broad.chain(boosted).collect(),
        }
    }

    pub fn queries(&self) -> &[PlannedQuery] {
        &self.queries
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Every `"<creator> <topic>"` pair, creators outermost.
pub fn boosted_queries(rules: &PreferenceRules) -> Vec<String> {
    rules
        .creators()
        .iter()
        .flat_map(|creator| {
            rules
                .topics()
                .iter()
                .map(move |topic| format!("{} {}", creator, topic))
        })
        .collect()
}

/// Pick one creator × topic query at random.
///
/// Returns `None` only if the rules have no creators or no topics, which
/// [`PreferenceRules`] validation already rules out.
pub fn pick_random_query<R: Rng + ?Sized>(
    rules: &PreferenceRules,
    max_results: u32,
    rng: &mut R,
) -> Option<PlannedQuery> {
    let creator = rules.creators().choose(rng)?;
    let topic = rules.topics().choose(rng)?;
    Some(PlannedQuery {
        text: format!("{} {}", creator, topic),
        source: CandidateSource::Random,
        max_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_ranked_plan_order() {
        let rules = PreferenceRules::default();
        let plan = SearchPlan::ranked(&rules);

        // 4 broad + 4 creators × 4 topics
        assert_eq!(plan.len(), 4 + 16);

        let first = &plan.queries()[0];
        assert_eq!(first.text, "quran recitation");
        assert_eq!(first.source, CandidateSource::Broad);
        assert_eq!(first.max_results, BROAD_RESULTS_PER_QUERY);

        let fifth = &plan.queries()[4];
        assert_eq!(fifth.text, "Abdul Rahman Al-Sudais quran recitation");
        assert_eq!(fifth.source, CandidateSource::Boosted);
        assert_eq!(fifth.max_results, BOOSTED_RESULTS_PER_QUERY);

        let last = plan.queries().last().unwrap();
        assert_eq!(last.text, "Saad Al Ghamdi surah al kahf");
    }

    #[test]
    fn test_boosted_queries_cross_product() {
        let rules = PreferenceRules::default();
        let queries = boosted_queries(&rules);
        assert_eq!(queries.len(), 16);
        assert!(queries.contains(&"Mishary Rashid Alafasy surah yasin".to_string()));
    }

    #[test]
    fn test_random_query_is_seedable() {
        let rules = PreferenceRules::default();
        let a = pick_random_query(&rules, 25, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = pick_random_query(&rules, 25, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.source, CandidateSource::Random);
        assert!(boosted_queries(&rules).contains(&a.text));
    }
}
