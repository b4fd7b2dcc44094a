//! Curation rules: preferred creators, preferred topics and disallowed titles.
//!
//! Rules are read once at startup, either from the built-in defaults or from
//! a TOML file, compiled into a [`PreferenceRules`] value and then shared
//! read-only (usually behind an `Arc`) by every filter and scorer.
//!
//! ## File format
//! ```toml
//! creators = ["Mishary Rashid Alafasy", "Saad Al Ghamdi"]
//! creator_fragments = ["alafasy", "ghamdi"]
//! topics = ["surah yasin", "surah al kahf"]
//! broad_queries = ["quran recitation"]
//! title_patterns = ['\bshorts?\b', '\bedited\b']
//! filter_partial_numbers = false
//! ```
//! Any key left out keeps its built-in value.

use crate::error::{Result, RulesError};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Points for a preferred creator's name appearing in the title.
pub const CREATOR_IN_TITLE_POINTS: u32 = 5;
/// Points for a preferred creator's name appearing in the channel name.
pub const CREATOR_IN_CHANNEL_POINTS: u32 = 3;
/// Points for a preferred topic phrase appearing in the title.
pub const TOPIC_IN_TITLE_POINTS: u32 = 2;

/// Matches numbered-range markers such as "1-11" or "12 - 20".
const PARTIAL_NUMBER_PATTERN: &str = r"\b\d+\s*-\s*\d+\b";

// =============================================================================
// Raw configuration
// =============================================================================

/// Uncompiled rules, as written in a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Full creator names, in preference order
    pub creators: Vec<String>,
    /// Distinctive name fragments that tolerate spelling variants
    pub creator_fragments: Vec<String>,
    /// Preferred topic phrases
    pub topics: Vec<String>,
    /// General queries not tied to any creator
    pub broad_queries: Vec<String>,
    /// Case-insensitive regular expressions marking low-quality titles
    pub title_patterns: Vec<String>,
    /// Also reject titles carrying numbered-range markers like "1-11"
    pub filter_partial_numbers: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            creators: owned(&[
                "Abdul Rahman Al-Sudais",
                "Mishary Rashid Alafasy",
                "Maher Al Muaiqly",
                "Saad Al Ghamdi",
            ]),
            creator_fragments: owned(&["sudais", "alafasy", "afasy", "muaiqly", "ghamdi"]),
            topics: owned(&[
                "quran recitation",
                "surah al rahman",
                "surah yasin",
                "surah al kahf",
            ]),
            broad_queries: owned(&[
                "quran recitation",
                "quran recitation beautiful voice",
                "surah yasin recitation",
                "surah al kahf recitation",
            ]),
            title_patterns: owned(&[
                r"#shorts?\b",
                r"\bshorts?\b",
                r"\bedit(?:ed|s)?\b",
                r"\bsped\s*up\b",
                r"\bslowed\b",
                r"\breverb\b",
                r"\bmemes?\b",
                r"\bclips?\b",
                r"\b(?:part|pt)\.?\s*\d+\b",
                r"\btiktok\b",
                r"\bstatus\b",
            ]),
            filter_partial_numbers: false,
        }
    }
}

// =============================================================================
// Compiled rules
// =============================================================================

/// Compiled, immutable curation rules.
#[derive(Debug, Clone)]
pub struct PreferenceRules {
    creators: Vec<String>,
    creators_lower: Vec<String>,
    creator_fragments: Vec<String>,
    topics: Vec<String>,
    topics_lower: Vec<String>,
    broad_queries: Vec<String>,
    title_patterns: Vec<Regex>,
    filter_partial_numbers: bool,
}

impl PreferenceRules {
    /// Compile a [`RulesConfig`].
    ///
    /// Fails when a pattern is not a valid regex, when there are no creators
    /// or no topics, or when any phrase is blank (a blank phrase would match
    /// every title).
    pub fn from_config(config: RulesConfig) -> Result<Self> {
        if config.creators.is_empty() {
            return Err(RulesError::Validation("at least one creator is required".into()));
        }
        if config.topics.is_empty() {
            return Err(RulesError::Validation("at least one topic is required".into()));
        }
        let lists = [
            ("creators", &config.creators),
            ("creator_fragments", &config.creator_fragments),
            ("topics", &config.topics),
            ("broad_queries", &config.broad_queries),
        ];
        for (field, list) in lists {
            if list.iter().any(|s| s.trim().is_empty()) {
                return Err(RulesError::Validation(format!("{field} contains a blank entry")));
            }
        }

        let mut patterns: Vec<&str> = config.title_patterns.iter().map(String::as_str).collect();
        if config.filter_partial_numbers {
            patterns.push(PARTIAL_NUMBER_PATTERN);
        }
        let title_patterns = patterns
            .into_iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| RulesError::Pattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.trim().to_lowercase()).collect()
        };
        Ok(Self {
            creators_lower: lower(&config.creators),
            creator_fragments: lower(&config.creator_fragments),
            topics_lower: lower(&config.topics),
            creators: config.creators,
            topics: config.topics,
            broad_queries: config.broad_queries,
            title_patterns,
            filter_partial_numbers: config.filter_partial_numbers,
        })
    }

    /// Load and compile rules from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: display.clone(),
            source,
        })?;
        let config: RulesConfig = toml::from_str(&text).map_err(|source| RulesError::Parse {
            path: display,
            source,
        })?;
        Self::from_config(config)
    }

    pub fn creators(&self) -> &[String] {
        &self.creators
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn broad_queries(&self) -> &[String] {
        &self.broad_queries
    }

    pub fn filter_partial_numbers(&self) -> bool {
        self.filter_partial_numbers
    }

    /// Whether the title carries any disallowed marker.
    pub fn is_bad_title(&self, title: &str) -> bool {
        self.title_patterns.iter().any(|re| re.is_match(title))
    }

    /// Whether the title or channel names a preferred creator.
    ///
    /// Both full names and name fragments are tried against the lower-cased
    /// `title + channel` text.
    pub fn matches_creator(&self, title: &str, channel: &str) -> bool {
        let text = format!("{} {}", title, channel).to_lowercase();
        self.creators_lower
            .iter()
            .chain(self.creator_fragments.iter())
            .any(|needle| text.contains(needle.as_str()))
    }

    /// Integer preference weight used to rank acceptable candidates.
    ///
    /// ## Algorithm
    /// For each creator: +5 if named in the title, +3 if named in the channel.
    /// For each topic: +2 if named in the title.
    pub fn preference_score(&self, title: &str, channel: &str) -> u32 {
        let title = title.to_lowercase();
        let channel = channel.to_lowercase();

        let mut score = 0;
        for creator in &self.creators_lower {
            if title.contains(creator.as_str()) {
                score += CREATOR_IN_TITLE_POINTS;
            }
            if channel.contains(creator.as_str()) {
                score += CREATOR_IN_CHANNEL_POINTS;
            }
        }
        for topic in &self.topics_lower {
            if title.contains(topic.as_str()) {
                score += TOPIC_IN_TITLE_POINTS;
            }
        }
        score
    }
}

impl Default for PreferenceRules {
    fn default() -> Self {
        Self::from_config(RulesConfig::default()).expect("built-in rules compile")
    }
}
