use sea_orm::DatabaseConnection;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
use crate::patch::{PatchOp, apply_patch};
use crate::unit_of_work::UnitOfWork;

/// Service layer for the catalog.
///
/// Every operation validates its input first, then opens one unit of work,
/// composes repository calls through it, and commits with a single save.
/// Read-only operations never commit; dropping their unit releases the
/// session.
#[derive(Clone)]
pub struct CatalogService {
    db: DatabaseConnection,
}

impl CatalogService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let models = uow.categories().get_all().await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .categories()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;
        Ok(model.into())
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        let created = uow.categories().add(input.into()).await?;
        uow.save().await?;

        tracing::info!(category_id = %created.id, "Created category");
        Ok(created.into())
    }

    pub async fn update_category(&self, id: Uuid, input: UpdateCategory) -> CatalogResult<Category> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .categories()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut category: Category = model.into();
        category.apply_update(input);

        uow.categories().update((&category).into()).await?;
        uow.save().await?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(category)
    }

    /// Apply a list of field-level patch operations to a category.
    ///
    /// Fetch → project the editable view → apply operations in order →
    /// re-run the full-update validation rules → merge → save. Any failure
    /// aborts before persisted state changes.
    pub async fn patch_category(&self, id: Uuid, operations: &[PatchOp]) -> CatalogResult<Category> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .categories()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        let mut category: Category = model.into();
        let patched = apply_patch(&UpdateCategory::from(&category), operations)?;
        patched.validate()?;
        category.apply_update(patched);

        uow.categories().update((&category).into()).await?;
        uow.save().await?;

        tracing::info!(category_id = %id, "Patched category");
        Ok(category)
    }

    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .categories()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))?;

        uow.categories().delete(model).await?;
        uow.save().await?;

        tracing::info!(category_id = %id, "Deleted category");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    pub async fn list_products(&self) -> CatalogResult<Vec<Product>> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let models = uow.products().get_all().await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .products()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;
        Ok(model.into())
    }

    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        // Rejects nil category references before any store interaction;
        // referential existence is the foreign key's job at commit.
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        let created = uow.products().add(input.into()).await?;
        uow.save().await?;

        tracing::info!(product_id = %created.id, "Created product");
        Ok(created.into())
    }

    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input.validate()?;

        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .products()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut product: Product = model.into();
        product.apply_update(input);

        uow.products().update((&product).into()).await?;
        uow.save().await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(product)
    }

    /// Apply a list of field-level patch operations to a product.
    ///
    /// Fetch → project the editable view → apply operations in order →
    /// re-run the full-update validation rules → merge → save. Any failure
    /// aborts before persisted state changes.
    pub async fn patch_product(&self, id: Uuid, operations: &[PatchOp]) -> CatalogResult<Product> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .products()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        let mut product: Product = model.into();
        let patched = apply_patch(&UpdateProduct::from(&product), operations)?;
        patched.validate()?;
        product.apply_update(patched);

        uow.products().update((&product).into()).await?;
        uow.save().await?;

        tracing::info!(product_id = %id, "Patched product");
        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        let uow = UnitOfWork::begin(&self.db).await?;
        let model = uow
            .products()
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))?;

        uow.products().delete(model).await?;
        uow.save().await?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }
}
