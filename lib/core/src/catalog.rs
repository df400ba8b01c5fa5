//! The catalog: an ordered, name-keyed collection of feature vectors
//! sharing one schema.
//!
//! Built once, offline, from a batch of normalized records; read-only for
//! the lifetime of a serving process. A new scrape produces a whole new
//! catalog (see [`ServingCatalog`](crate::serving::ServingCatalog) for
//! atomic publication).

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::record::BottlingMeta;
use crate::schema::FeatureSchema;
use crate::vector::FeatureVector;

/// One bottling: metadata side table entry plus its feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub meta: BottlingMeta,
    pub vector: FeatureVector,
}

#[derive(Debug)]
pub struct Catalog {
    schema: FeatureSchema,
    entries: Vec<CatalogEntry>,
    index: AHashMap<String, usize>,
}

impl Catalog {
    /// Assemble a catalog, validating that every vector matches the
    /// schema's dimensionality and that full names are unique.
    pub fn from_entries(schema: FeatureSchema, entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(entries.len());

        for (pos, entry) in entries.iter().enumerate() {
            if entry.vector.dim() != schema.len() {
                return Err(Error::SchemaMismatch {
                    expected: format!("{} columns", schema.len()),
                    actual: format!(
                        "{} columns in vector for '{}'",
                        entry.vector.dim(),
                        entry.meta.full_name
                    ),
                });
            }
            if index
                .insert(entry.meta.full_name.clone(), pos)
                .is_some()
            {
                return Err(Error::DuplicateName(entry.meta.full_name.clone()));
            }
        }

        Ok(Self {
            schema,
            entries,
            index,
        })
    }

    #[inline]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in build order. Iteration order is the tie-break order for
    /// equally similar recommendation candidates.
    #[inline]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, full_name: &str) -> Option<&CatalogEntry> {
        self.index.get(full_name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.index.contains_key(full_name)
    }
}
