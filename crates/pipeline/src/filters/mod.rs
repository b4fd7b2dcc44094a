//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_present;
pub mod creator_preference;
pub mod minimum_duration;
pub mod title_quality;
pub mod visibility;

// Re-export for convenience
pub use already_present::AlreadyPresentFilter;
pub use creator_preference::CreatorPreferenceFilter;
pub use minimum_duration::MinimumDurationFilter;
pub use title_quality::TitleQualityFilter;
pub use visibility::VisibilityFilter;
