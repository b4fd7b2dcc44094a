//! Candidate collection.
//!
//! Runs planned searches against the platform, deduplicates hits by video id
//! across queries, and enriches candidates with duration and privacy details.
//!
//! ## Algorithm
//! 1. Run each planned query in order
//! 2. Skip hits whose id was already seen in an earlier query
//! 3. Stop as soon as `max_total` distinct candidates are collected
//! 4. Look up details in batches of at most 50 ids

use crate::query_plan::{PlannedQuery, SearchPlan};
use crate::types::Candidate;
use anyhow::{Context, Result};
use catalog::{VideoDetails, VideoId};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};
use youtube_client::{MAX_BATCH_SIZE, VideoPlatform};

/// Collect up to `max_total` distinct candidates following `plan`.
#[instrument(skip(platform, plan), fields(queries = plan.len()))]
pub async fn collect_candidates(
    platform: &dyn VideoPlatform,
    plan: &SearchPlan,
    max_total: usize,
) -> Result<Vec<Candidate>> {
    let mut seen: HashSet<VideoId> = HashSet::new();
    let mut candidates: Vec<Candidate> = Vec::new();

    for query in plan.queries() {
        if candidates.len() >= max_total {
            break;
        }
        let hits = run_query(platform, query).await?;
        for hit in hits {
            if !seen.insert(hit.video_id.clone()) {
                continue;
            }
            let order = candidates.len();
            candidates.push(Candidate::new(hit, query.source, query.text.clone(), order));
            if candidates.len() >= max_total {
                debug!("Reached candidate ceiling of {}", max_total);
                break;
            }
        }
    }

    debug!("Collected {} distinct candidates", candidates.len());
    Ok(candidates)
}

/// Run a single planned query, returning its hits as candidates.
///
/// Duplicate ids within the one response are dropped.
pub async fn search_candidates(
    platform: &dyn VideoPlatform,
    query: &PlannedQuery,
) -> Result<Vec<Candidate>> {
    let hits = run_query(platform, query).await?;
    let mut seen = HashSet::new();
    Ok(hits
        .into_iter()
        .filter(|hit| seen.insert(hit.video_id.clone()))
        .enumerate()
        .map(|(order, hit)| Candidate::new(hit, query.source, query.text.clone(), order))
        .collect())
}

async fn run_query(
    platform: &dyn VideoPlatform,
    query: &PlannedQuery,
) -> Result<Vec<catalog::SearchHit>> {
    let hits = platform
        .search(&query.text, query.max_results)
        .await
        .with_context(|| format!("Searching for {:?}", query.text))?;
    debug!("Query {:?} returned {} hits", query.text, hits.len());
    Ok(hits)
}

/// Merge duration and privacy details into each candidate.
///
/// Candidates the platform has no details for are returned unchanged, which
/// leaves their duration and visibility unknown.
#[instrument(skip(platform, candidates), fields(count = candidates.len()))]
pub async fn attach_details(
    platform: &dyn VideoPlatform,
    candidates: Vec<Candidate>,
) -> Result<Vec<Candidate>> {
    let ids: Vec<VideoId> = candidates.iter().map(|c| c.video_id().clone()).collect();

    let mut details: HashMap<VideoId, VideoDetails> = HashMap::with_capacity(ids.len());
    for batch in ids.chunks(MAX_BATCH_SIZE) {
        let found = platform
            .video_details(batch)
            .await
            .with_context(|| format!("Looking up details for {} videos", batch.len()))?;
        details.extend(found.into_iter().map(|d| (d.video_id.clone(), d)));
    }

    let missing = ids.len() - ids.iter().filter(|id| details.contains_key(*id)).count();
    if missing > 0 {
        debug!("{} candidates have no details", missing);
    }

    Ok(candidates
        .into_iter()
        .map(|mut candidate| {
            if let Some(d) = details.get(candidate.video_id()) {
                candidate.item = candidate.item.with_details(d);
            }
            candidate
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateSource;
    use catalog::{PreferenceRules, SearchHit, Visibility};
    use youtube_client::InMemoryPlatform;

    fn hit(id: &str) -> SearchHit {
        SearchHit::new(id, format!("Title {id}"), "Channel")
    }

    #[tokio::test]
    async fn test_collect_dedupes_across_queries() {
        let platform = InMemoryPlatform::new()
            .with_search("quran recitation", vec![hit("a"), hit("b")])
            .with_search("quran recitation beautiful voice", vec![hit("b"), hit("c")])
            .with_fallback_search(vec![hit("a"), hit("d")]);
        let plan = SearchPlan::ranked(&PreferenceRules::default());

        let candidates = collect_candidates(&platform, &plan, 120).await.unwrap();

        let ids: Vec<&str> = candidates.iter().map(|c| c.video_id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(candidates[1].query, "quran recitation");
        assert_eq!(candidates[2].query, "quran recitation beautiful voice");
        assert_eq!(candidates[3].source, CandidateSource::Broad);
        for (i, c) in candidates.iter().enumerate() {
            assert_eq!(c.discovery_order, i);
        }
        // every planned query still ran, since the ceiling was never hit
        assert_eq!(platform.calls().searches.len(), plan.len());
    }

    #[tokio::test]
    async fn test_collect_stops_at_ceiling() {
        let platform = InMemoryPlatform::new()
            .with_fallback_search((0..25).map(|i| hit(&format!("v{i}"))).collect());
        let plan = SearchPlan::ranked(&PreferenceRules::default());

        let candidates = collect_candidates(&platform, &plan, 10).await.unwrap();

        assert_eq!(candidates.len(), 10);
        assert_eq!(platform.calls().searches.len(), 1);
    }

    #[tokio::test]
    async fn test_attach_details_batches_of_fifty() {
        let mut platform = InMemoryPlatform::new();
        let mut candidates = Vec::new();
        for i in 0..120 {
            let id = format!("v{i}");
            if i % 2 == 0 {
                platform = platform.with_details(id.as_str(), "PT20M", Visibility::Public);
            }
            candidates.push(Candidate::new(hit(&id), CandidateSource::Broad, "q", i));
        }

        let enriched = attach_details(&platform, candidates).await.unwrap();

        assert_eq!(platform.calls().detail_batches, vec![50, 50, 20]);
        assert_eq!(enriched.len(), 120);
        assert_eq!(enriched[0].item.duration_secs, Some(1200));
        assert_eq!(enriched[1].item.duration_secs, None);
        assert!(!enriched[1].item.has_details());
    }

    #[tokio::test]
    async fn test_search_candidates_single_query() {
        let platform =
            InMemoryPlatform::new().with_fallback_search(vec![hit("a"), hit("a"), hit("b")]);
        let query = PlannedQuery {
            text: "Saad Al Ghamdi surah yasin".into(),
            source: CandidateSource::Random,
            max_results: 50,
        };

        let candidates = search_candidates(&platform, &query).await.unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].discovery_order, 1);
        assert_eq!(candidates[0].source, CandidateSource::Random);
    }
}
