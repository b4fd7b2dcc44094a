//! Selector crate for the playlist filler.
//!
//! This crate contains the orchestrator that coordinates sourcing,
//! filtering, ranking and insertion for one destination playlist.

pub mod config;
pub mod error;
pub mod insertion;
pub mod orchestrator;

pub use config::SelectionConfig;
pub use error::{Result, SelectorError};
pub use insertion::{InsertOutcome, InsertedVideo, InsertionReport};
pub use orchestrator::{RunReport, SelectedVideo, Selection, SelectionMode, SelectionOrchestrator};
