//! Catalog Domain
//!
//! This crate provides the complete domain implementation for managing
//! products and their categories.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Handlers   │  ← HTTP endpoints
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Service    │  ← Business logic, validation, patch engine
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ Unit of Work │  ← One store session, one atomic commit point
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ Repositories │  ← Category/Product wrappers over the generic repository
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Entities   │  ← SeaORM models, DTOs
//! └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, service::CatalogService};
//! # async fn example(db: sea_orm::DatabaseConnection) {
//! let service = CatalogService::new(db);
//! let router = handlers::router(service);
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod patch;
pub mod repository;
pub mod service;
pub mod unit_of_work;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
pub use patch::{PatchOp, apply_patch};
pub use repository::{CategoryRepository, ProductRepository};
pub use service::CatalogService;
pub use unit_of_work::UnitOfWork;
