//! Integration tests for the pipeline.
//!
//! These tests verify that the filters and the scorer work together the way
//! ranked and randomized selection use them.

use catalog::{PreferenceRules, SearchHit, VideoDetails, VideoId, Visibility};
use pipeline::filters::*;
use pipeline::{FilterPipeline, PreferenceScorer};
use sources::{Candidate, CandidateSource, RunContext};
use std::sync::Arc;

fn candidate(
    id: &str,
    title: &str,
    channel: &str,
    duration: &str,
    visibility: Visibility,
    order: usize,
) -> Candidate {
    let mut c = Candidate::new(
        SearchHit::new(id, title, channel),
        CandidateSource::Broad,
        "quran recitation",
        order,
    );
    c.item = c.item.with_details(&VideoDetails {
        video_id: VideoId::new(id),
        duration: duration.to_string(),
        visibility: Some(visibility),
    });
    c
}

fn create_test_setup() -> (Arc<PreferenceRules>, RunContext, Vec<Candidate>) {
    let rules = Arc::new(PreferenceRules::default());

    // abc123 is already in the playlist
    let context = RunContext::new("PL1", vec![VideoId::new("abc123")]);

    let candidates = vec![
        // Present - should be filtered
        candidate("abc123", "Surah Yasin Alafasy", "Alafasy", "PT30M", Visibility::Public, 0),
        // Bad title - should be filtered
        candidate("edit01", "Surah Al-Kahf (Edited) #shorts", "Alafasy", "PT30M", Visibility::Public, 1),
        // Too short - should be filtered
        candidate("short1", "Surah Rahman", "Sudais", "PT10M", Visibility::Public, 2),
        // Private - should be filtered
        candidate("priv01", "Surah Mulk", "Ghamdi", "PT40M", Visibility::Private, 3),
        // Passes, no creator
        candidate("plain1", "Quran recitation beautiful voice", "Unknown Qari", "PT20M", Visibility::Public, 4),
        // Passes, strong match
        candidate(
            "best01",
            "Surah Yasin - Mishary Rashid Alafasy",
            "Mishary Rashid Alafasy",
            "PT24M47S",
            Visibility::Unlisted,
            5,
        ),
    ];

    (rules, context, candidates)
}

#[test]
fn test_ranked_pipeline() {
    let (rules, context, candidates) = create_test_setup();

    let pipeline = FilterPipeline::new()
        .add_filter(AlreadyPresentFilter)
        .add_filter(TitleQualityFilter::new(rules.clone()))
        .add_filter(VisibilityFilter)
        .add_filter(MinimumDurationFilter::new(15));

    let filtered = pipeline.apply(candidates, &context).unwrap();
    let ids: Vec<&str> = filtered.iter().map(|c| c.video_id().as_str()).collect();
    assert_eq!(ids, vec!["plain1", "best01"]);

    let ranked = PreferenceScorer::new(rules).top_k(filtered, 3);
    assert_eq!(ranked[0].candidate.video_id().as_str(), "best01");
    assert_eq!(ranked[0].score, 10);
    assert_eq!(ranked[1].score, 2);
}

#[test]
fn test_randomized_pipeline_requires_creator() {
    let (rules, context, candidates) = create_test_setup();

    let pipeline = FilterPipeline::new()
        .add_filter(MinimumDurationFilter::new(15))
        .add_filter(VisibilityFilter)
        .add_filter(TitleQualityFilter::new(rules.clone()))
        .add_filter(CreatorPreferenceFilter::new(rules))
        .add_filter(AlreadyPresentFilter);

    let verdicts: Vec<Option<&str>> = candidates
        .iter()
        .map(|c| pipeline.first_rejection(c, &context).unwrap())
        .collect();

    assert_eq!(
        verdicts,
        vec![
            Some("AlreadyPresentFilter"),
            Some("TitleQualityFilter"),
            Some("MinimumDurationFilter"),
            Some("VisibilityFilter"),
            Some("CreatorPreferenceFilter"),
            None,
        ]
    );
}

#[test]
fn test_filters_preserve_order() {
    let (rules, context, mut candidates) = create_test_setup();
    candidates.reverse();

    let pipeline = FilterPipeline::new()
        .add_filter(AlreadyPresentFilter)
        .add_filter(TitleQualityFilter::new(rules));

    let filtered = pipeline.apply(candidates, &context).unwrap();
    let orders: Vec<usize> = filtered.iter().map(|c| c.discovery_order).collect();
    assert_eq!(orders, vec![5, 4, 3, 2]);
}
