//! # drammatch Core
//!
//! Core data model for the drammatch whisky recommender:
//!
//! - [`FeatureVector`] - fixed-width numeric profile of one bottling
//! - [`FeatureSchema`] - the corpus-derived, ordered feature column list
//! - [`Catalog`] - name-keyed collection of vectors sharing one schema
//! - [`ServingCatalog`] - swap-on-publish snapshot handle for rebuilds
//! - [`RawRecord`] / [`NormalizedRecord`] / [`BottlingMeta`] - the
//!   metadata/feature split as a named contract
//!
//! ## Example
//!
//! ```rust
//! use drammatch_core::{Catalog, CatalogEntry, FeatureSchema, FeatureVector};
//! use drammatch_core::{AgeStatement, BottlingMeta};
//!
//! let schema = FeatureSchema::new(
//!     vec!["Sherry Cask".to_string()],
//!     vec!["peat".to_string(), "sweet".to_string()],
//! );
//! let entry = CatalogEntry {
//!     meta: BottlingMeta {
//!         full_name: "Lagavulin 16".to_string(),
//!         distillery: "Lagavulin".to_string(),
//!         url: None,
//!         country: None,
//!         region: None,
//!         whisky_type: None,
//!         bottler: None,
//!         age: AgeStatement::Years(16),
//!         abv: 43.0,
//!         rating: None,
//!         rating_count: None,
//!         review_count: 0,
//!     },
//!     vector: FeatureVector::new(vec![0.0, 9.0, 2.0]),
//! };
//! let catalog = Catalog::from_entries(schema, vec![entry]).unwrap();
//! assert!(catalog.contains("Lagavulin 16"));
//! ```

pub mod catalog;
pub mod error;
pub mod record;
pub mod schema;
pub mod serving;
pub mod vector;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{Error, Result};
pub use record::{AgeStatement, BottlingMeta, NormalizedRecord, NoteMap, RawRecord};
pub use schema::FeatureSchema;
pub use serving::ServingCatalog;
pub use vector::FeatureVector;
