//! # Selection Orchestrator
//!
//! This module coordinates a playlist filling run:
//! 1. List the destination playlist into a run context
//! 2. Source candidates (ranked plan, or one random creator × topic query)
//! 3. Look up duration and privacy details
//! 4. Apply the hard filters
//! 5. Rank by preference score (ranked mode) or take the first survivor
//!    of a shuffled batch (randomized mode)
//! 6. Insert the selection, classifying failures
//!
//! Network calls are awaited one at a time. Nothing is retried.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use catalog::{PreferenceRules, VideoId};
use pipeline::filters::{
    AlreadyPresentFilter, CreatorPreferenceFilter, MinimumDurationFilter, TitleQualityFilter,
    VisibilityFilter,
};
use pipeline::{FilterPipeline, PreferenceScorer, ScoredCandidate};
use sources::{
    attach_details, build_run_context, collect_candidates, pick_random_query, search_candidates,
    CandidateSource, RunContext, SearchPlan,
};
use youtube_client::VideoPlatform;

use crate::config::SelectionConfig;
use crate::error::{Result, SelectorError};
use crate::insertion::InsertionReport;

/// A video chosen for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVideo {
    pub video_id: VideoId,
    pub title: String,
    pub channel: String,
    pub duration_secs: Option<u64>,
    pub score: u32,
    pub source: CandidateSource,
    pub query: String,
}

impl From<ScoredCandidate> for SelectedVideo {
    fn from(scored: ScoredCandidate) -> Self {
        let ScoredCandidate { candidate, score } = scored;
        Self {
            video_id: candidate.item.video_id,
            title: candidate.item.title,
            channel: candidate.item.channel,
            duration_secs: candidate.item.duration_secs,
            score,
            source: candidate.source,
            query: candidate.query,
        }
    }
}

/// Outcome of a selection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Best first
    Accepted(Vec<SelectedVideo>),
    /// Nothing passed the filters after examining `attempts` candidates
    NoCandidate { attempts: usize },
}

impl Selection {
    pub fn videos(&self) -> &[SelectedVideo] {
        match self {
            Selection::Accepted(videos) => videos,
            Selection::NoCandidate { .. } => &[],
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Selection::Accepted(_))
    }
}

/// Which selection strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Score a broad candidate pool and take the top K
    Ranked,
    /// Examine shuffled random-query results until one qualifies
    Randomized,
}

/// Everything a run did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub playlist_id: String,
    pub members_before: usize,
    pub selection: Selection,
    /// `None` for dry runs or when nothing was selected
    pub insertion: Option<InsertionReport>,
}

/// Coordinates sourcing, filtering, ranking and insertion.
#[derive(Clone)]
pub struct SelectionOrchestrator {
    pub(crate) platform: Arc<dyn VideoPlatform>,
    rules: Arc<PreferenceRules>,
    config: SelectionConfig,
    ranked_filters: Arc<FilterPipeline>,
    random_filters: Arc<FilterPipeline>,
    scorer: PreferenceScorer,
}

impl SelectionOrchestrator {
    /// Create a new orchestrator with all components initialized
    ///
    /// Ranked mode applies the duplicate guard, the title quality filter,
    /// the visibility floor and the duration floor. Randomized mode applies
    /// the same floors plus the preferred-creator requirement.
    pub fn new(
        platform: Arc<dyn VideoPlatform>,
        rules: Arc<PreferenceRules>,
        config: SelectionConfig,
    ) -> Result<Self> {
        config.validate()?;

        let ranked_filters = Arc::new(
            FilterPipeline::new()
                .add_filter(AlreadyPresentFilter)
                .add_filter(TitleQualityFilter::new(rules.clone()))
                .add_filter(VisibilityFilter)
                .add_filter(MinimumDurationFilter::new(config.min_duration_minutes)),
        );
        let random_filters = Arc::new(
            FilterPipeline::new()
                .add_filter(MinimumDurationFilter::new(config.min_duration_minutes))
                .add_filter(VisibilityFilter)
                .add_filter(TitleQualityFilter::new(rules.clone()))
                .add_filter(CreatorPreferenceFilter::new(rules.clone()))
                .add_filter(AlreadyPresentFilter),
        );
        let scorer = PreferenceScorer::new(rules.clone());

        Ok(Self {
            platform,
            rules,
            config,
            ranked_filters,
            random_filters,
            scorer,
        })
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn rules(&self) -> &PreferenceRules {
        &self.rules
    }

    /// Capture the destination playlist's current membership.
    pub async fn load_context(&self, playlist_id: &str) -> Result<RunContext> {
        Ok(build_run_context(self.platform.as_ref(), playlist_id).await?)
    }

    /// Main entry point: select for `playlist_id` and insert the result.
    ///
    /// With `dry_run` the selection is returned without touching the playlist.
    #[instrument(skip(self, rng))]
    pub async fn run<R: Rng + ?Sized>(
        &self,
        playlist_id: &str,
        mode: SelectionMode,
        rng: &mut R,
        dry_run: bool,
    ) -> Result<RunReport> {
        let start_time = Instant::now();

        let mut context = self.load_context(playlist_id).await?;
        let members_before = context.member_count();

        let selection = match mode {
            SelectionMode::Ranked => self.select_ranked(&context).await?,
            SelectionMode::Randomized => self.select_random(&context, rng).await?,
        };

        let insertion = match &selection {
            Selection::Accepted(videos) if !dry_run => {
                Some(self.insert_selected(&mut context, videos.clone()).await?)
            }
            Selection::Accepted(videos) => {
                info!("Dry run, skipping insertion of {} videos", videos.len());
                None
            }
            Selection::NoCandidate { attempts } => {
                info!("No suitable candidate found after {} attempts", attempts);
                None
            }
        };

        info!(
            "Run for playlist {} finished in {:.2?}",
            playlist_id,
            start_time.elapsed()
        );
        Ok(RunReport {
            playlist_id: playlist_id.to_string(),
            members_before,
            selection,
            insertion,
        })
    }

    /// Ranked selection: the top `max_to_add` candidates by preference score.
    ///
    /// ## Algorithm
    /// 1. Run the broad queries, then every creator × topic query, keeping
    ///    distinct ids up to `max_candidates`
    /// 2. Look up details in batches of 50
    /// 3. Drop present, badly titled, private/unknown and short videos
    /// 4. Stable sort by descending score and truncate
    ///
    /// Returns `NoCandidate` with the number of candidates collected when
    /// nothing survives. The context is not modified, so repeating the call
    /// against an unchanged platform yields the same selection.
    pub async fn select_ranked(&self, context: &RunContext) -> Result<Selection> {
        let plan = SearchPlan::ranked_with_limits(
            &self.rules,
            self.config.broad_results,
            self.config.boosted_results,
        );
        let platform = self.platform.as_ref();

        let candidates = collect_candidates(platform, &plan, self.config.max_candidates).await?;
        let collected = candidates.len();
        info!("Collected {} candidates", collected);

        let candidates = attach_details(platform, candidates).await?;
        let filtered = self
            .ranked_filters
            .apply(candidates, context)
            .context("Failed to apply ranked filters")?;
        info!("Filtering complete, {} candidates remain", filtered.len());

        let top = self.scorer.top_k(filtered, self.config.max_to_add);
        if top.is_empty() {
            return Ok(Selection::NoCandidate {
                attempts: collected,
            });
        }

        for (rank, scored) in top.iter().enumerate() {
            info!(
                "Selected #{} (score={}): {} | Channel: {} | videoId: {}",
                rank + 1,
                scored.score,
                scored.candidate.title(),
                scored.candidate.channel(),
                scored.candidate.video_id()
            );
        }
        Ok(Selection::Accepted(
            top.into_iter().map(SelectedVideo::from).collect(),
        ))
    }

    /// Randomized selection: one qualifying video from random queries.
    ///
    /// ## Algorithm
    /// Until `max_attempts` is spent:
    /// 1. Pick a random creator × topic query and search
    /// 2. An empty result spends one attempt
    /// 3. Shuffle the hits and look up details for as many as attempts allow
    /// 4. Examine them in order, one attempt each; the first to pass every
    ///    filter is accepted
    pub async fn select_random<R: Rng + ?Sized>(
        &self,
        context: &RunContext,
        rng: &mut R,
    ) -> Result<Selection> {
        let max_attempts = self.config.max_attempts;
        let platform = self.platform.as_ref();
        let mut attempts = 0usize;

        while attempts < max_attempts {
            let query = pick_random_query(&self.rules, self.config.random_results, rng)
                .ok_or_else(|| SelectorError::Config("no creator × topic pairs".into()))?;
            debug!("Random query: {:?}", query.text);

            let mut candidates = search_candidates(platform, &query).await?;
            if candidates.is_empty() {
                attempts += 1;
                debug!("Attempt {}: query returned nothing", attempts);
                continue;
            }

            candidates.shuffle(rng);
            candidates.truncate(max_attempts - attempts);
            let candidates = attach_details(platform, candidates).await?;

            for candidate in candidates {
                attempts += 1;
                match self
                    .random_filters
                    .first_rejection(&candidate, context)
                    .context("Failed to apply randomized filters")?
                {
                    None => {
                        let score = self.scorer.score(&candidate);
                        info!(
                            "Accepted after {} attempts: {} | Channel: {} | videoId: {}",
                            attempts,
                            candidate.title(),
                            candidate.channel(),
                            candidate.video_id()
                        );
                        return Ok(Selection::Accepted(vec![SelectedVideo::from(
                            ScoredCandidate { candidate, score },
                        )]));
                    }
                    Some(filter) => debug!(
                        "Attempt {}: {} rejected by {}",
                        attempts,
                        candidate.video_id(),
                        filter
                    ),
                }
            }
        }

        Ok(Selection::NoCandidate { attempts })
    }
}
