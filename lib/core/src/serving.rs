//! Swap-on-publish catalog snapshots
//!
//! The recommender is a pure, read-only function over an immutable
//! catalog, so concurrent requests need no locking as long as the catalog
//! is never mutated in place. Rebuilds publish a whole new snapshot:
//! readers in flight keep the `Arc` they took and finish against it, and
//! never observe a partially rebuilt schema.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalog::Catalog;

#[derive(Debug)]
pub struct ServingCatalog {
    inner: RwLock<Arc<Catalog>>,
}

impl ServingCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The current snapshot. Cheap (an `Arc` clone); hold it for the
    /// duration of one request.
    pub fn current(&self) -> Arc<Catalog> {
        self.inner.read().clone()
    }

    /// Atomically replace the snapshot with a freshly built catalog.
    pub fn publish(&self, catalog: Catalog) {
        *self.inner.write() = Arc::new(catalog);
    }
}
