//! Explainability for recommendations
//!
//! Derives the human-readable "common" and "additional" attribute lists
//! justifying a recommendation: attributes both the user profile and the
//! recommended bottling score highly, and the recommended bottling's
//! strongest remaining attributes.

use serde::Serialize;

use drammatch_core::{FeatureSchema, FeatureVector, Result};

/// A feature column qualifies as "common high" when both the recommended
/// vector and the user profile are at or above this value. On the 0–10
/// sensory scale; categorical 0/1 columns can never qualify.
pub const HIGH_NOTE_THRESHOLD: f32 = 8.0;

/// How many attributes each list reports at most.
pub const TOP_NOTES: usize = 3;

/// Attribute lists justifying a recommendation. Either list may be
/// shorter than [`TOP_NOTES`] or empty; that is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Columns where both recommendation and profile are ≥ threshold,
    /// by the recommended vector's value descending, top 3
    pub common_high: Vec<String>,
    /// The recommended vector's strongest columns outside the
    /// common-high set, descending, top 3
    pub additional: Vec<String>,
}

/// Explain a recommendation against the user profile.
///
/// Fails with `SchemaMismatch` when either vector's dimensionality does
/// not match the schema.
pub fn explain(
    recommended: &FeatureVector,
    profile: &FeatureVector,
    schema: &FeatureSchema,
) -> Result<Explanation> {
    ensure_dim(schema, recommended)?;
    ensure_dim(schema, profile)?;

    let columns: Vec<&str> = schema.columns().collect();
    let rec = recommended.as_slice();
    let prof = profile.as_slice();

    // every qualifying column, not just the reported top 3, is excluded
    // from the additional list
    let mut common: Vec<usize> = (0..columns.len())
        .filter(|&i| rec[i] >= HIGH_NOTE_THRESHOLD && prof[i] >= HIGH_NOTE_THRESHOLD)
        .collect();
    sort_by_recommended_desc(&mut common, rec);

    let mut additional: Vec<usize> = (0..columns.len())
        .filter(|i| !common.contains(i))
        .collect();
    sort_by_recommended_desc(&mut additional, rec);

    Ok(Explanation {
        common_high: take_names(&common, &columns),
        additional: take_names(&additional, &columns),
    })
}

/// Stable descending sort by the recommended vector's value; ties keep
/// schema column order.
fn sort_by_recommended_desc(indices: &mut [usize], rec: &[f32]) {
    indices.sort_by(|&a, &b| {
        rec[b]
            .partial_cmp(&rec[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn take_names(indices: &[usize], columns: &[&str]) -> Vec<String> {
    indices
        .iter()
        .take(TOP_NOTES)
        .map(|&i| columns[i].to_string())
        .collect()
}

fn ensure_dim(schema: &FeatureSchema, vector: &FeatureVector) -> Result<()> {
    if vector.dim() == schema.len() {
        Ok(())
    } else {
        Err(drammatch_core::Error::SchemaMismatch {
            expected: format!("{} columns", schema.len()),
            actual: format!("{} columns", vector.dim()),
        })
    }
}
