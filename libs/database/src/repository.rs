//! Generic repository over a single open transaction.
//!
//! A [`GenericRepository`] provides uniform create/read/update/delete
//! operations for any SeaORM entity whose primary key is a `Uuid`. It never
//! owns a connection: it borrows the transaction of the unit of work that
//! created it, so every mutation is staged inside that transaction and only
//! becomes durable when the unit commits. Reads made through the same unit
//! observe staged mutations; other sessions do not.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PrimaryKeyTrait,
};
use uuid::Uuid;

/// Uniform CRUD operations for one entity kind, bound to an open transaction.
///
/// Mutating operations (`add`, `update`, `delete`) increment the shared
/// staged-change counter owned by the unit of work, which reports it as the
/// affected-row count on commit.
pub struct GenericRepository<'uow, E>
where
    E: EntityTrait,
{
    txn: &'uow DatabaseTransaction,
    staged: &'uow AtomicU64,
    entity: PhantomData<E>,
}

impl<'uow, E> GenericRepository<'uow, E>
where
    E: EntityTrait,
{
    /// Bind a repository to the given transaction and staged-change counter.
    pub fn new(txn: &'uow DatabaseTransaction, staged: &'uow AtomicU64) -> Self {
        Self {
            txn,
            staged,
            entity: PhantomData,
        }
    }

    /// Stage an insert of the given entity. Returns the inserted row as the
    /// store sees it. Not durable until the owning unit of work commits.
    pub async fn add<A>(&self, entity: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let model = entity.insert(self.txn).await?;
        self.staged.fetch_add(1, Ordering::Relaxed);
        Ok(model)
    }

    /// Every entity of this kind visible to the transaction, in store-defined
    /// order. Empty tables yield an empty vec, never an error.
    pub async fn get_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().all(self.txn).await
    }

    /// Look up one entity by its unique identifier. Absence is `None`, not an
    /// error.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
    {
        E::find_by_id(id).one(self.txn).await
    }

    /// Stage a full replace of the entity's mutable fields.
    pub async fn update<A>(&self, entity: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let model = entity.update(self.txn).await?;
        self.staged.fetch_add(1, Ordering::Relaxed);
        Ok(model)
    }

    /// Stage removal of the given entity. The entity's primary key selects
    /// the row to remove.
    pub async fn delete<A>(&self, entity: A) -> Result<(), DbErr>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        E::delete(entity).exec(self.txn).await?;
        self.staged.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// The transaction this repository stages against. Specialized
    /// repositories use it for entity-specific queries.
    pub fn connection(&self) -> &'uow DatabaseTransaction {
        self.txn
    }
}
