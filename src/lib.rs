//! # drammatch
//!
//! A whisky recommender: a feature engineering pipeline that turns
//! semi-structured tasting records into fixed-schema numeric profiles,
//! and a cosine-similarity engine that recommends a previously-unseen
//! bottling from the ones a user already likes — with an explanation of
//! why.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use drammatch::prelude::*;
//!
//! // Build a catalog from a scraped batch
//! let raws = read_raw_records("details.csv".as_ref(), None).unwrap();
//! let catalog = build_catalog_from_raw(&raws).unwrap();
//!
//! // Recommend
//! let recommender = Recommender::new(Arc::new(catalog));
//! let selection = vec!["Lagavulin 16".to_string(), "Talisker 10".to_string()];
//! let recommendation = recommender.recommend(&selection).unwrap();
//! println!("try {}", recommendation.recommended);
//! ```
//!
//! ## Crate Structure
//!
//! - `drammatch-core` - feature vectors, schema, catalog, error taxonomy
//! - `drammatch-pipeline` - normalization, encoding, aggregation, I/O
//! - `drammatch-recommend` - profile, cosine ranking, explanations

pub mod feedback;

// Re-export core types
pub use drammatch_core::{
    AgeStatement, BottlingMeta, Catalog, CatalogEntry, Error, FeatureSchema, FeatureVector,
    NormalizedRecord, RawRecord, Result, ServingCatalog,
};

// Re-export the pipeline
pub use drammatch_pipeline::{
    build_catalog, build_catalog_from_raw, load_schema, normalize, normalize_corpus,
    read_catalog, read_raw_records, save_schema, write_catalog,
};

// Re-export the recommender
pub use drammatch_recommend::{
    explain, Explanation, Recommendation, RecommendationResponse, Recommender,
};

pub use feedback::{FeedbackRecord, FeedbackStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_catalog, build_catalog_from_raw, load_schema, normalize_corpus, read_catalog,
        read_raw_records, save_schema, write_catalog, AgeStatement, BottlingMeta, Catalog,
        CatalogEntry, Error, Explanation, FeatureSchema, FeatureVector, FeedbackRecord,
        FeedbackStore, RawRecord, Recommendation, RecommendationResponse, Recommender, Result,
        ServingCatalog,
    };
}
