//! One store session, one atomic commit point.

use std::sync::atomic::{AtomicU64, Ordering};

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::error::CatalogResult;
use crate::repository::{CategoryRepository, ProductRepository};

/// A unit of work binds one store session (an open transaction) to the
/// catalog repositories and provides the single commit point for everything
/// staged through them.
///
/// Mutations made through `categories()` / `products()` execute inside the
/// transaction: they are visible to reads through this same unit, but not to
/// any other session, until [`save`](UnitOfWork::save) commits them all as
/// one atomic change set.
///
/// Each request gets its own unit; units are never shared across requests.
/// Dropping an unsaved unit rolls the transaction back and releases the
/// session, so abandoning an in-flight operation is always safe.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
    staged: AtomicU64,
}

impl UnitOfWork {
    /// Open a new store session on the given connection pool.
    pub async fn begin(db: &DatabaseConnection) -> CatalogResult<Self> {
        let txn = db.begin().await?;
        Ok(Self {
            txn,
            staged: AtomicU64::new(0),
        })
    }

    /// The category repository bound to this unit's session.
    pub fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(&self.txn, &self.staged)
    }

    /// The product repository bound to this unit's session.
    pub fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.txn, &self.staged)
    }

    /// Commit every staged operation across all repositories bound to this
    /// unit as a single atomic change set. Returns the number of staged
    /// changes.
    ///
    /// On failure the store rejects the entire change set; no partial commit
    /// is observable. Consumes the unit: commit is a one-shot operation.
    pub async fn save(self) -> CatalogResult<u64> {
        let staged = self.staged.load(Ordering::Relaxed);
        self.txn.commit().await?;
        tracing::debug!(staged_changes = staged, "Unit of work committed");
        Ok(staged)
    }
}
