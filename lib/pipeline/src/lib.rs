//! # drammatch Pipeline
//!
//! The feature engineering pipeline: turns raw scraped tasting records
//! into a fixed-schema numeric catalog.
//!
//! Data flows strictly downward:
//!
//! ```text
//! raw records ──normalize──> normalized records
//!      │                          │
//!      │            pass 1: schema discovery (tags ∪ notes)
//!      │                          │
//!      └──────── pass 2: per-record projection ──> Catalog
//! ```
//!
//! - [`parse`] - strict parsers for the scraped collection literals
//! - [`normalize`] - scalar coercion, full-name derivation, dedup
//! - [`encode`] - post-treatment tag discovery and 0/1 projection
//! - [`aggregate`] - three sensory dimensions → one composite 0–10 score
//! - [`build`] - two-pass feature matrix assembly
//! - [`io`] - raw/catalog CSV and the schema JSON artifact
//!
//! Schema discovery needs a global view of the corpus, so the build is a
//! single offline batch pass; errors abort the whole build rather than
//! producing a partial catalog.

pub mod aggregate;
pub mod build;
pub mod encode;
pub mod io;
pub mod normalize;
pub mod parse;

pub use aggregate::{composite_notes, discover_attributes, round_half_up, CompositeNotes};
pub use build::{build_catalog, build_catalog_from_raw};
pub use encode::{discover_tags, project_tags};
pub use io::{load_schema, read_catalog, read_raw_records, save_schema, write_catalog};
pub use normalize::{normalize, normalize_corpus};
pub use parse::{parse_note_map, parse_tag_list};
