//! Feature schema definitions
//!
//! The schema is the ordered, immutable list of numeric feature columns —
//! one per discovered post-treatment tag, one per discovered sensory
//! attribute — fixed once for a catalog build. Two feature vectors are
//! only comparable when they were built against the same schema.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

fn default_version() -> u32 {
    1
}

/// The fixed, corpus-derived column layout shared by every vector in a
/// catalog.
///
/// Columns are laid out as the post-treatment tags followed by the
/// composite sensory attributes, each section in lexicographic order so
/// that rebuilding from an unchanged corpus reproduces the identical
/// schema. Built once per corpus; a new scrape requires a full rebuild
/// because any newly observed tag or attribute changes the dimensionality
/// of every vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureSchema {
    /// Schema artifact version for forward compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Discovered post-treatment tags, lexicographic
    treatment_tags: Vec<String>,

    /// Discovered composite sensory attributes, lexicographic
    sensory_notes: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from the discovered tag and note universes.
    /// Each section is sorted so the column order is deterministic.
    pub fn new<T, N>(tags: T, notes: N) -> Self
    where
        T: IntoIterator<Item = String>,
        N: IntoIterator<Item = String>,
    {
        let mut treatment_tags: Vec<String> = tags.into_iter().collect();
        let mut sensory_notes: Vec<String> = notes.into_iter().collect();
        treatment_tags.sort();
        treatment_tags.dedup();
        sensory_notes.sort();
        sensory_notes.dedup();

        Self {
            version: 1,
            treatment_tags,
            sensory_notes,
        }
    }

    #[inline]
    pub fn treatment_tags(&self) -> &[String] {
        &self.treatment_tags
    }

    #[inline]
    pub fn sensory_notes(&self) -> &[String] {
        &self.sensory_notes
    }

    /// Total number of feature columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.treatment_tags.len() + self.sensory_notes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All column names in vector order: tags first, then notes.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.treatment_tags
            .iter()
            .chain(self.sensory_notes.iter())
            .map(String::as_str)
    }

    /// FNV-1a over the column layout; used in mismatch diagnostics.
    pub fn fingerprint(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let mut hash = FNV_OFFSET;
        let mut feed = |bytes: &[u8]| {
            for &b in bytes {
                hash ^= u64::from(b);
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        };
        feed(&self.version.to_le_bytes());
        for col in self.columns() {
            feed(col.as_bytes());
            feed(&[0]);
        }
        // separator between sections so moving a column across the
        // tag/note boundary changes the fingerprint
        feed(&(self.treatment_tags.len() as u64).to_le_bytes());
        hash
    }

    fn describe(&self) -> String {
        format!(
            "schema v{} ({} columns, fp {:016x})",
            self.version,
            self.len(),
            self.fingerprint()
        )
    }

    /// Fail fast when a vector or persisted table was built against a
    /// different schema; columns are never silently truncated or padded.
    pub fn ensure_matches(&self, other: &FeatureSchema) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(Error::SchemaMismatch {
                expected: self.describe(),
                actual: other.describe(),
            })
        }
    }
}
