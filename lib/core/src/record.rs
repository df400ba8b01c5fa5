//! Record types for the feature pipeline
//!
//! The metadata/feature boundary is a named contract: [`BottlingMeta`]
//! travels beside the numeric vector and is never part of the similarity
//! computation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A sensory-note dimension: flavor attribute name → 0–10 intensity.
/// `BTreeMap` keeps iteration deterministic for dedup keys and tests.
pub type NoteMap = BTreeMap<String, f64>;

/// One scraped bottling, fields still raw text as the scraper emitted
/// them. The collection-literal fields (`post_treatment`, the three
/// note dictionaries) hold the scrape's serialized form and are parsed
/// strictly during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    pub url: Option<String>,
    pub distillery: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub whisky_type: Option<String>,
    pub bottler: Option<String>,
    /// Free text like "12 years old", or absent for no-age-statement
    pub age_text: Option<String>,
    /// "NN.N%"
    pub strength_text: Option<String>,
    pub rating_text: Option<String>,
    /// Parenthesized/comma-grouped, e.g. "(1,234)"
    pub rating_count_text: Option<String>,
    pub review_count_text: Option<String>,
    pub name_suffix: Option<String>,
    /// List literal of post-treatment tags, e.g. `['Sherry Cask']`
    pub post_treatment: Option<String>,
    /// Dictionary literals: attribute → 0–10 score
    pub nosing_notes: Option<String>,
    pub tasting_notes: Option<String>,
    pub finish_notes: Option<String>,
}

/// Age reduced to a year count or the no-age-statement sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeStatement {
    Years(u32),
    NoAgeStatement,
}

impl AgeStatement {
    #[inline]
    pub fn is_nas(&self) -> bool {
        matches!(self, AgeStatement::NoAgeStatement)
    }
}

impl fmt::Display for AgeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeStatement::Years(y) => write!(f, "{}", y),
            AgeStatement::NoAgeStatement => write!(f, "NAS"),
        }
    }
}

impl FromStr for AgeStatement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "NAS" {
            return Ok(AgeStatement::NoAgeStatement);
        }
        s.parse::<u32>()
            .map(AgeStatement::Years)
            .map_err(|_| Error::malformed("age", format!("not a year count: '{}'", s)))
    }
}

/// The non-feature side of a catalog entry, keyed by `full_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottlingMeta {
    /// Distillery + age (omitted when NAS) + name suffix, whitespace
    /// collapsed. Unique within a catalog.
    pub full_name: String,
    pub distillery: String,
    pub url: Option<String>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub whisky_type: Option<String>,
    pub bottler: Option<String>,
    pub age: AgeStatement,
    /// Alcohol strength, percent by volume
    pub abv: f64,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    /// Frequently blank for rare bottlings; defaults to 0
    pub review_count: u32,
}

/// A [`RawRecord`] with scalars coerced and literals parsed. The three
/// sensory dimensions are still separate here; they are merged into one
/// composite map by the aggregator and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub meta: BottlingMeta,
    pub tags: Vec<String>,
    pub nosing: NoteMap,
    pub tasting: NoteMap,
    pub finish: NoteMap,
}
