//! Specialized repositories for the catalog entities.
//!
//! Thin named wrappers over [`database::GenericRepository`], bound to the
//! session of the unit of work that created them. They exist to give the
//! domain a typed surface and a home for entity-specific queries; all CRUD
//! mechanics live in the generic repository.

use std::sync::atomic::AtomicU64;

use database::GenericRepository;
use sea_orm::{ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, IntoActiveModel, QueryFilter};
use uuid::Uuid;

use crate::entity::{category, product};

/// Category repository bound to one unit of work.
pub struct CategoryRepository<'uow> {
    inner: GenericRepository<'uow, category::Entity>,
}

impl<'uow> CategoryRepository<'uow> {
    pub(crate) fn new(txn: &'uow DatabaseTransaction, staged: &'uow AtomicU64) -> Self {
        Self {
            inner: GenericRepository::new(txn, staged),
        }
    }

    /// Stage an insert; returns the inserted row.
    pub async fn add(&self, entity: category::ActiveModel) -> Result<category::Model, DbErr> {
        self.inner.add(entity).await
    }

    /// Every category currently visible to this unit's session.
    pub async fn get_all(&self) -> Result<Vec<category::Model>, DbErr> {
        self.inner.get_all().await
    }

    /// Look up one category; absence is `None`, not an error.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<category::Model>, DbErr> {
        self.inner.get_by_id(id).await
    }

    /// Stage a full replace of the category's mutable fields.
    pub async fn update(&self, entity: category::ActiveModel) -> Result<category::Model, DbErr> {
        self.inner.update(entity).await
    }

    /// Stage removal of the given category.
    pub async fn delete(&self, entity: category::Model) -> Result<(), DbErr> {
        self.inner.delete(entity.into_active_model()).await
    }
}

/// Product repository bound to one unit of work.
pub struct ProductRepository<'uow> {
    inner: GenericRepository<'uow, product::Entity>,
}

impl<'uow> ProductRepository<'uow> {
    pub(crate) fn new(txn: &'uow DatabaseTransaction, staged: &'uow AtomicU64) -> Self {
        Self {
            inner: GenericRepository::new(txn, staged),
        }
    }

    /// Stage an insert; returns the inserted row.
    pub async fn add(&self, entity: product::ActiveModel) -> Result<product::Model, DbErr> {
        self.inner.add(entity).await
    }

    /// Every product currently visible to this unit's session.
    pub async fn get_all(&self) -> Result<Vec<product::Model>, DbErr> {
        self.inner.get_all().await
    }

    /// Look up one product; absence is `None`, not an error.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<product::Model>, DbErr> {
        self.inner.get_by_id(id).await
    }

    /// Stage a full replace of the product's mutable fields.
    pub async fn update(&self, entity: product::ActiveModel) -> Result<product::Model, DbErr> {
        self.inner.update(entity).await
    }

    /// Stage removal of the given product.
    pub async fn delete(&self, entity: product::Model) -> Result<(), DbErr> {
        self.inner.delete(entity.into_active_model()).await
    }

    /// Every product referencing the given category.
    pub async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<product::Model>, DbErr> {
        product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .all(self.inner.connection())
            .await
    }
}
