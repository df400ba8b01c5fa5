//! Feature matrix builder
//!
//! Pure two-pass assembly: pass 1 derives the [`FeatureSchema`] from the
//! whole normalized corpus (tags, then composite sensory attributes);
//! pass 2 projects every record against that schema. No vector is
//! finalized before the schema is — any normalization or parse error
//! aborts the build, never a partial catalog.

use tracing::info;

use drammatch_core::{Catalog, CatalogEntry, FeatureSchema, FeatureVector, NormalizedRecord, RawRecord, Result};

use crate::aggregate::{composite_notes, discover_attributes};
use crate::encode::{discover_tags, project_tags};
use crate::normalize::normalize_corpus;

/// Build a catalog from an already-normalized corpus.
pub fn build_catalog(records: &[NormalizedRecord]) -> Result<Catalog> {
    // Pass 1: schema discovery over the full corpus.
    let composites: Vec<_> = records.iter().map(composite_notes).collect();
    let tags = discover_tags(records);
    let notes = discover_attributes(&composites);
    let schema = FeatureSchema::new(tags, notes);

    info!(
        records = records.len(),
        tag_columns = schema.treatment_tags().len(),
        sensory_columns = schema.sensory_notes().len(),
        fingerprint = format!("{:016x}", schema.fingerprint()),
        "feature schema discovered"
    );

    // Pass 2: pure per-record projection against the fixed schema.
    let entries: Vec<CatalogEntry> = records
        .iter()
        .zip(composites.iter())
        .map(|(record, composite)| {
            let mut data = project_tags(record, schema.treatment_tags());
            data.extend(
                schema
                    .sensory_notes()
                    .iter()
                    .map(|attr| f32::from(composite.get(attr).copied().unwrap_or(0))),
            );
            CatalogEntry {
                meta: record.meta.clone(),
                vector: FeatureVector::new(data),
            }
        })
        .collect();

    Catalog::from_entries(schema, entries)
}

/// Normalize a raw scrape batch and build its catalog in one pass.
pub fn build_catalog_from_raw(raws: &[RawRecord]) -> Result<Catalog> {
    let records = normalize_corpus(raws)?;
    if records.len() != raws.len() {
        info!(
            raw = raws.len(),
            kept = records.len(),
            "collapsed duplicate records during normalization"
        );
    }
    build_catalog(&records)
}
