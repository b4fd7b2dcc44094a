//! # Catalog Crate
//!
//! Domain types and curation rules shared by every stage of the playlist
//! filler.
//!
//! ## Main Components
//!
//! - **types**: video identifiers, search hits, detail records, candidate items
//! - **duration**: decoder for the compact `PT#H#M#S` duration encoding
//! - **rules**: preferred creators/topics and disallowed-title patterns
//! - **error**: error types for loading rules
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{decode_duration, whole_minutes, PreferenceRules};
//!
//! let rules = PreferenceRules::default();
//! assert!(rules.is_bad_title("Surah Al-Kahf (Edited) #shorts"));
//!
//! let secs = decode_duration("PT24M47S").unwrap();
//! assert_eq!(whole_minutes(secs), 25);
//! ```

pub mod duration;
pub mod error;
pub mod rules;
pub mod types;

pub use duration::{decode_duration, whole_minutes};
pub use error::{Result, RulesError};
pub use rules::{PreferenceRules, RulesConfig};
pub use types::{
    CandidateItem,
    PlaylistId,
    PlaylistItemId,
    SearchHit,
    VideoDetails,
    VideoId,
    Visibility,
};
