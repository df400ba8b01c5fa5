//! User profile construction
//!
//! A user's selections are aggregated into a single profile vector: the
//! elementwise arithmetic mean of the selected bottlings' feature
//! vectors, after deduplicating repeated names.

use ahash::AHashSet;

use drammatch_core::{Catalog, Error, FeatureVector, Result};

/// Build the profile vector for a selection.
///
/// Fails with `EmptySelection` on an empty list and `UnknownSelection`
/// (naming the offending entry) when any name does not resolve to a
/// catalog entry.
pub fn user_profile(catalog: &Catalog, selection_names: &[String]) -> Result<FeatureVector> {
    if selection_names.is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut seen = AHashSet::with_capacity(selection_names.len());
    let mut vectors = Vec::with_capacity(selection_names.len());
    for name in selection_names {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let entry = catalog
            .get(name)
            .ok_or_else(|| Error::UnknownSelection(name.clone()))?;
        vectors.push(&entry.vector);
    }

    // non-empty by the check above
    FeatureVector::mean(vectors).ok_or(Error::EmptySelection)
}
