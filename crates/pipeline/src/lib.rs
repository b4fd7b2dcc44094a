//! Pipeline for filtering and ranking playlist candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - PreferenceScorer for ranking the survivors
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (already present, bad title,
//!    private or unknown visibility, too short, wrong creator)
//! 2. PreferenceScorer weights the remaining candidates
//! 3. The caller takes the top K
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, PreferenceScorer};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyPresentFilter)
//!     .add_filter(TitleQualityFilter::new(rules.clone()))
//!     .add_filter(VisibilityFilter)
//!     .add_filter(MinimumDurationFilter::new(15));
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! let top = PreferenceScorer::new(rules.clone()).top_k(filtered, 3);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use scoring::{PreferenceScorer, ScoredCandidate};
pub use traits::Filter;
