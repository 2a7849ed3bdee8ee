//! Integration tests for the unit of work and repositories
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Staged operations are visible within their own unit, invisible outside
//! - A single save commits every staged operation atomically
//! - Constraints are enforced by the store, not this layer
//! - Independently-scoped units do not block each other

use domain_catalog::models::{CreateCategory, CreateProduct};
use domain_catalog::{UnitOfWork, entity::category};
use rust_decimal::Decimal;
use sea_orm::ActiveValue::Set;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn category_input(name: String) -> CreateCategory {
    CreateCategory {
        name: Some(name),
        description: Some("integration test category".to_string()),
    }
}

fn product_input(name: String, category_id: Uuid) -> CreateProduct {
    CreateProduct {
        name: Some(name),
        description: None,
        price: Some(Decimal::new(1999, 2)),
        stock: Some(10),
        category_id: Some(category_id),
    }
}

#[tokio::test]
async fn test_staged_add_is_visible_within_the_same_unit() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("staged_add_visible");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "main")).into())
        .await
        .unwrap();

    // No commit boundary has been crossed, yet the same unit sees the row
    let fetched = uow.categories().get_by_id(created.id).await.unwrap();
    let fetched = assert_some(fetched, "staged category should be visible in its own unit");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_staged_add_is_invisible_to_other_units_until_save() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("staged_add_invisible");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "main")).into())
        .await
        .unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let invisible = reader.categories().get_by_id(created.id).await.unwrap();
    assert!(invisible.is_none(), "uncommitted row must not leak to other sessions");

    uow.save().await.unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let visible = reader.categories().get_by_id(created.id).await.unwrap();
    assert_some(visible, "committed category should be visible in a new unit");
}

#[tokio::test]
async fn test_dropping_an_unsaved_unit_discards_staged_changes() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("drop_discards");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "abandoned")).into())
        .await
        .unwrap();
    drop(uow);

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let gone = reader.categories().get_by_id(created.id).await.unwrap();
    assert!(gone.is_none(), "staged insert should roll back when the unit is dropped");
}

#[tokio::test]
async fn test_get_all_on_empty_store_returns_empty_sequence() {
    let db = TestDatabase::new().await;

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let categories = uow.categories().get_all().await.unwrap();
    let products = uow.products().get_all().await.unwrap();

    assert!(categories.is_empty());
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_add_save_get_round_trip_keeps_creation_identifier() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("round_trip");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "main")).into())
        .await
        .unwrap();
    let id_at_creation = created.id;
    uow.save().await.unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let fetched = reader.categories().get_by_id(id_at_creation).await.unwrap();
    let fetched = assert_some(fetched, "category should persist");

    assert_uuid_eq(fetched.id, id_at_creation, "persisted id");
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.description, created.description);
}

#[tokio::test]
async fn test_delete_save_get_returns_absent() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("delete_round_trip");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "doomed")).into())
        .await
        .unwrap();
    uow.save().await.unwrap();

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let fetched = uow.categories().get_by_id(created.id).await.unwrap();
    uow.categories().delete(fetched.unwrap()).await.unwrap();
    uow.save().await.unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let gone = reader.categories().get_by_id(created.id).await.unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_update_stages_a_full_replace() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("update_replace");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let created = uow
        .categories()
        .add(category_input(builder.name("category", "original")).into())
        .await
        .unwrap();
    uow.save().await.unwrap();

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let renamed = builder.name("category", "renamed");
    uow.categories()
        .update(category::ActiveModel {
            id: Set(created.id),
            name: Set(renamed.clone()),
            description: Set(None),
            created_at: Set(created.created_at),
            updated_at: Set(chrono::Utc::now().into()),
        })
        .await
        .unwrap();
    uow.save().await.unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let fetched = reader.categories().get_by_id(created.id).await.unwrap();
    let fetched = assert_some(fetched, "updated category should exist");
    assert_eq!(fetched.name, renamed);
    assert_eq!(fetched.description, None);
}

#[tokio::test]
async fn test_save_commits_all_repositories_as_one_change_set() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("one_change_set");

    // One unit, two repositories, one save
    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let cat = uow
        .categories()
        .add(category_input(builder.name("category", "main")).into())
        .await
        .unwrap();
    let prod = uow
        .products()
        .add(product_input(builder.name("product", "widget"), cat.id).into())
        .await
        .unwrap();
    let staged = uow.save().await.unwrap();
    assert_eq!(staged, 2, "save should report both staged changes");

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    assert_some(
        reader.categories().get_by_id(cat.id).await.unwrap(),
        "category committed",
    );
    let fetched = assert_some(
        reader.products().get_by_id(prod.id).await.unwrap(),
        "product committed",
    );
    assert_uuid_eq(fetched.category_id, cat.id, "product category reference");
}

#[tokio::test]
async fn test_find_by_category_scopes_to_one_category() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("find_by_category");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let cat_a = uow
        .categories()
        .add(category_input(builder.name("category", "a")).into())
        .await
        .unwrap();
    let cat_b = uow
        .categories()
        .add(category_input(builder.name("category", "b")).into())
        .await
        .unwrap();
    uow.products()
        .add(product_input(builder.name("product", "in-a"), cat_a.id).into())
        .await
        .unwrap();
    uow.products()
        .add(product_input(builder.name("product", "in-b"), cat_b.id).into())
        .await
        .unwrap();
    uow.save().await.unwrap();

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let in_a = reader.products().find_by_category(cat_a.id).await.unwrap();
    assert_eq!(in_a.len(), 1);
    assert_eq!(in_a[0].name, builder.name("product", "in-a"));
}

#[tokio::test]
async fn test_dangling_category_reference_is_a_store_failure() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("dangling_reference");

    // Non-nil but nonexistent category passes input validation; the store's
    // foreign key rejects it
    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let result = uow
        .products()
        .add(product_input(builder.name("product", "orphan"), Uuid::now_v7()).into())
        .await;

    assert!(result.is_err(), "foreign key constraint should reject the insert");
}

#[tokio::test]
async fn test_concurrent_units_on_disjoint_entities_do_not_block() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("concurrent_disjoint");

    let setup = UnitOfWork::begin(&db.connection()).await.unwrap();
    let cat_a = setup
        .categories()
        .add(category_input(builder.name("category", "a")).into())
        .await
        .unwrap();
    let cat_b = setup
        .categories()
        .add(category_input(builder.name("category", "b")).into())
        .await
        .unwrap();
    setup.save().await.unwrap();

    let conn_a = db.connection();
    let conn_b = db.connection();

    let update_name = |id: Uuid, name: String, created_at| {
        category::ActiveModel {
            id: Set(id),
            name: Set(name),
            description: Set(None),
            created_at: Set(created_at),
            updated_at: Set(chrono::Utc::now().into()),
        }
    };

    // Two independently-scoped units commit concurrently
    let task_a = {
        let name = builder.name("category", "a2");
        let model = update_name(cat_a.id, name, cat_a.created_at);
        async move {
            let uow = UnitOfWork::begin(&conn_a).await.unwrap();
            uow.categories().update(model).await.unwrap();
            uow.save().await.unwrap()
        }
    };
    let task_b = {
        let name = builder.name("category", "b2");
        let model = update_name(cat_b.id, name, cat_b.created_at);
        async move {
            let uow = UnitOfWork::begin(&conn_b).await.unwrap();
            uow.categories().update(model).await.unwrap();
            uow.save().await.unwrap()
        }
    };

    let (staged_a, staged_b) = tokio::join!(task_a, task_b);
    assert_eq!(staged_a, 1);
    assert_eq!(staged_b, 1);

    let reader = UnitOfWork::begin(&db.connection()).await.unwrap();
    let a = assert_some(
        reader.categories().get_by_id(cat_a.id).await.unwrap(),
        "category a",
    );
    let b = assert_some(
        reader.categories().get_by_id(cat_b.id).await.unwrap(),
        "category b",
    );
    assert_eq!(a.name, builder.name("category", "a2"));
    assert_eq!(b.name, builder.name("category", "b2"));
}

#[tokio::test]
async fn test_deleting_a_referenced_category_is_rejected_at_the_store() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("referenced_category");

    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let cat = uow
        .categories()
        .add(category_input(builder.name("category", "held")).into())
        .await
        .unwrap();
    uow.products()
        .add(product_input(builder.name("product", "holder"), cat.id).into())
        .await
        .unwrap();
    uow.save().await.unwrap();

    // The category does not own product lifetimes; removing it while
    // referenced violates the foreign key
    let uow = UnitOfWork::begin(&db.connection()).await.unwrap();
    let fetched = uow.categories().get_by_id(cat.id).await.unwrap().unwrap();
    let result = uow.categories().delete(fetched).await;
    assert!(result.is_err());
}
