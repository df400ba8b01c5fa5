//! Similarity recommender
//!
//! Scores every catalog entry against the user profile with cosine
//! similarity and recommends the best-scoring bottling the user has not
//! already selected. A pure, synchronous, read-only function over an
//! immutable catalog snapshot — safe under arbitrary request concurrency.

use ahash::AHashSet;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use drammatch_core::{Catalog, Error, Result};

use crate::explain::{explain, Explanation};
use crate::profile::user_profile;

/// The outcome of one recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub recommended: String,
    pub score: f32,
    pub explanation: Explanation,
}

/// Wire shape for the request-handling collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommended_whisky: String,
    pub common_high_notes: Vec<String>,
    pub additional_notes: Vec<String>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(r: Recommendation) -> Self {
        Self {
            recommended_whisky: r.recommended,
            common_high_notes: r.explanation.common_high,
            additional_notes: r.explanation.additional,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recommend one bottling for a selection of full names.
    ///
    /// The selected entries themselves are scored too (they usually top
    /// the ranking) but are never returned. Ties keep catalog order:
    /// the sort is stable, so the first-discovered entry wins.
    pub fn recommend(&self, selection_names: &[String]) -> Result<Recommendation> {
        let profile = user_profile(&self.catalog, selection_names)?;
        let selected: AHashSet<&str> = selection_names.iter().map(String::as_str).collect();

        let mut scored: Vec<(usize, f32)> = self
            .catalog
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| (i, entry.vector.cosine_similarity(&profile)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let (winner, score) = scored
            .iter()
            .map(|&(i, score)| (&self.catalog.entries()[i], score))
            .find(|(entry, _)| !selected.contains(entry.meta.full_name.as_str()))
            .ok_or(Error::NoCandidates)?;

        debug!(
            recommended = %winner.meta.full_name,
            score,
            selections = selection_names.len(),
            "recommendation computed"
        );

        let explanation = explain(&winner.vector, &profile, self.catalog.schema())?;
        Ok(Recommendation {
            recommended: winner.meta.full_name.clone(),
            score,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drammatch_core::{
        AgeStatement, BottlingMeta, CatalogEntry, FeatureSchema, FeatureVector,
    };

    fn entry(name: &str, data: Vec<f32>) -> CatalogEntry {
        CatalogEntry {
            meta: BottlingMeta {
                full_name: name.to_string(),
                distillery: name.to_string(),
                url: None,
                country: None,
                region: None,
                whisky_type: None,
                bottler: None,
                age: AgeStatement::NoAgeStatement,
                abv: 40.0,
                rating: None,
                rating_count: None,
                review_count: 0,
            },
            vector: FeatureVector::new(data),
        }
    }

    fn recommender(entries: Vec<CatalogEntry>) -> Recommender {
        let dim = entries[0].vector.dim();
        let schema = FeatureSchema::new(
            Vec::new(),
            (0..dim).map(|i| format!("n{}", i)).collect::<Vec<_>>(),
        );
        Recommender::new(Arc::new(Catalog::from_entries(schema, entries).unwrap()))
    }

    fn peaty_sweet() -> Recommender {
        recommender(vec![
            entry("A", vec![9.0, 2.0]),
            entry("B", vec![8.0, 9.0]),
            entry("C", vec![1.0, 9.0]),
        ])
    }

    #[test]
    fn test_never_recommends_a_selection() {
        let r = peaty_sweet();
        for name in ["A", "B", "C"] {
            let rec = r.recommend(&[name.to_string()]).unwrap();
            assert_ne!(rec.recommended, name);
        }
    }

    #[test]
    fn test_peaty_sweet_scenario() {
        // profile = A = [peaty 9, sweet 2]; B beats C on cosine
        let r = peaty_sweet();
        let rec = r.recommend(&["A".to_string()]).unwrap();
        assert_eq!(rec.recommended, "B");
        // peaty: A=9 and B=8 are both >= 8; sweet: A=2 < 8
        assert_eq!(rec.explanation.common_high, vec!["n0"]);
        assert!(!rec.explanation.common_high.contains(&"n1".to_string()));
    }

    #[test]
    fn test_selection_exhausting_catalog_is_no_candidates() {
        let r = peaty_sweet();
        let all = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert!(matches!(r.recommend(&all), Err(Error::NoCandidates)));
    }

    #[test]
    fn test_unknown_selection_surfaces() {
        let r = peaty_sweet();
        assert!(matches!(
            r.recommend(&["Nonexistent 12".to_string()]),
            Err(Error::UnknownSelection(name)) if name == "Nonexistent 12"
        ));
    }

    #[test]
    fn test_tie_break_keeps_catalog_order() {
        // two candidates collinear with the profile: identical similarity
        let r = recommender(vec![
            entry("Picked", vec![4.0, 0.0]),
            entry("First", vec![8.0, 0.0]),
            entry("Second", vec![2.0, 0.0]),
        ]);
        let rec = r.recommend(&["Picked".to_string()]).unwrap();
        assert_eq!(rec.recommended, "First");
    }

    #[test]
    fn test_zero_vector_entry_scores_zero_not_error() {
        let r = recommender(vec![
            entry("A", vec![5.0, 5.0]),
            entry("Zero", vec![0.0, 0.0]),
            entry("B", vec![5.0, 4.0]),
        ]);
        let rec = r.recommend(&["A".to_string()]).unwrap();
        assert_eq!(rec.recommended, "B");
    }

    #[test]
    fn test_response_shape() {
        let r = peaty_sweet();
        let response: RecommendationResponse =
            r.recommend(&["A".to_string()]).unwrap().into();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["recommended_whisky"], "B");
        assert!(json["common_high_notes"].is_array());
        assert!(json["additional_notes"].is_array());
    }
}
