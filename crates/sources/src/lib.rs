//! # Sources Crate
//!
//! Candidate sourcing for the playlist filler.
//!
//! ## Components
//!
//! ### Query planning
//! - Broad queries not tied to any creator (25 results each by default)
//! - Boosted creator × topic queries (10 results each by default)
//! - One random creator × topic query for randomized selection
//!
//! ### Collection
//! Runs the plan, deduplicates hits by video id and stops at a ceiling.
//! Duration and privacy details are then looked up in batches of 50.
//!
//! ### Membership
//! Lists the destination playlist once, up front, into a [`RunContext`].
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::PreferenceRules;
//! use sources::{SearchPlan, attach_details, build_run_context, collect_candidates};
//!
//! let rules = PreferenceRules::default();
//! let context = build_run_context(&client, "PLxxxx").await?;
//! let plan = SearchPlan::ranked(&rules);
//! let candidates = collect_candidates(&client, &plan, 120).await?;
//! let candidates = attach_details(&client, candidates).await?;
//! ```

pub mod collector;
pub mod membership;
pub mod query_plan;
pub mod types;

pub use collector::{attach_details, collect_candidates, search_candidates};
pub use membership::build_run_context;
pub use query_plan::{
    boosted_queries, pick_random_query, PlannedQuery, SearchPlan, BOOSTED_RESULTS_PER_QUERY,
    BROAD_RESULTS_PER_QUERY,
};
pub use types::{Candidate, CandidateSource, RunContext};
