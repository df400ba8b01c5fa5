//! Sensory aggregator
//!
//! Merges a record's three independent note dimensions (nosing, tasting,
//! finish) into one composite 0–10 score per attribute. The composite is
//! all the schema ever sees; the three raw dimensions are discarded after
//! aggregation and never exposed downstream.

use std::collections::{BTreeMap, BTreeSet};

use drammatch_core::NormalizedRecord;

/// attribute → composite score, 0–10
pub type CompositeNotes = BTreeMap<String, u8>;

/// Round to the nearest integer, with halves rounding up. This is the
/// documented reference behavior: 2.5 → 3, not bankers' rounding.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Merge the three note dimensions of one record.
///
/// The attribute universe is the union of keys across all three
/// dictionaries; a missing attribute in a dimension contributes 0. Each
/// composite is the three-dimension sum divided by 3, rounded half-up.
/// For legal inputs (each score in [0, 10]) the composite is in [0, 10].
pub fn composite_notes(record: &NormalizedRecord) -> CompositeNotes {
    let mut attributes: BTreeSet<&str> = BTreeSet::new();
    attributes.extend(record.nosing.keys().map(String::as_str));
    attributes.extend(record.tasting.keys().map(String::as_str));
    attributes.extend(record.finish.keys().map(String::as_str));

    attributes
        .into_iter()
        .map(|attr| {
            let sum = record.nosing.get(attr).copied().unwrap_or(0.0)
                + record.tasting.get(attr).copied().unwrap_or(0.0)
                + record.finish.get(attr).copied().unwrap_or(0.0);
            (attr.to_string(), round_half_up(sum / 3.0) as u8)
        })
        .collect()
}

/// Corpus-wide discovery: the sensory portion of the feature schema is
/// the union of composite-attribute keys across every record.
pub fn discover_attributes<'a, I>(composites: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a CompositeNotes>,
{
    let mut all = BTreeSet::new();
    for composite in composites {
        all.extend(composite.keys().cloned());
    }
    all
}
