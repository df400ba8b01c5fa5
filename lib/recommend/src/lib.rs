//! # drammatch Recommend
//!
//! The similarity recommendation engine: aggregates a user's selections
//! into a profile vector, scores every catalog entry against it with
//! cosine similarity, and explains the winner via shared vs. novel
//! high-scoring attributes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use drammatch_recommend::{Recommender, RecommendationResponse};
//! # fn catalog() -> drammatch_core::Catalog { unimplemented!() }
//!
//! let recommender = Recommender::new(Arc::new(catalog()));
//! let selection = vec!["Lagavulin 16".to_string(), "Talisker 10".to_string()];
//! let response: RecommendationResponse =
//!     recommender.recommend(&selection).unwrap().into();
//! println!("{}", serde_json::to_string(&response).unwrap());
//! ```

pub mod explain;
pub mod profile;
pub mod recommend;

pub use explain::{explain, Explanation, HIGH_NOTE_THRESHOLD, TOP_NOTES};
pub use profile::user_profile;
pub use recommend::{Recommendation, RecommendationResponse, Recommender};
