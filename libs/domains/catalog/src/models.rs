use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Custom validator for product prices: must be at least 1.
fn validate_price(price: &Decimal) -> Result<(), validator::ValidationError> {
    if *price < Decimal::ONE {
        return Err(validator::ValidationError::new("price_below_minimum"));
    }
    Ok(())
}

/// Custom validator for category references: the nil UUID is never a valid
/// reference. Whether the referenced category actually exists is left to the
/// store's foreign-key constraint.
fn validate_category_ref(id: &Uuid) -> Result<(), validator::ValidationError> {
    if id.is_nil() {
        return Err(validator::ValidationError::new("empty_category_reference"));
    }
    Ok(())
}

/// Category entity - groups products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Category name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier, assigned at creation
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Unit price
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    /// Units in stock
    pub stock: i32,
    /// Owning category
    pub category_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(required, length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Editable view of a category, used for full updates and as the patch
/// engine's intermediate representation. Shares the creation rules.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(required, length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(required, length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    #[validate(required, range(min = 1, max = 1000))]
    pub stock: Option<i32>,
    #[validate(required, custom(function = "validate_category_ref"))]
    pub category_id: Option<Uuid>,
}

/// Editable view of a product, used for full updates and as the patch
/// engine's intermediate representation. Shares the creation rules.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(required, length(min = 3, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    #[validate(required, range(min = 1, max = 1000))]
    pub stock: Option<i32>,
    #[validate(required, custom(function = "validate_category_ref"))]
    pub category_id: Option<Uuid>,
}

impl Category {
    /// Apply a validated editable view onto this category (full replace of
    /// mutable fields).
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.description = update.description;
        self.updated_at = Utc::now();
    }
}

impl Product {
    /// Apply a validated editable view onto this product (full replace of
    /// mutable fields).
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.description = update.description;
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        self.updated_at = Utc::now();
    }
}

/// Project a category into its editable view.
impl From<&Category> for UpdateCategory {
    fn from(category: &Category) -> Self {
        Self {
            name: Some(category.name.clone()),
            description: category.description.clone(),
        }
    }
}

/// Project a product into its editable view.
impl From<&Product> for UpdateProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: product.description.clone(),
            price: Some(product.price),
            stock: Some(product.stock),
            category_id: Some(product.category_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product_input() -> CreateProduct {
        CreateProduct {
            name: Some("Widget".to_string()),
            description: None,
            price: Some(Decimal::new(1999, 2)),
            stock: Some(10),
            category_id: Some(Uuid::now_v7()),
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert!(valid_product_input().validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        let mut input = valid_product_input();
        input.name = Some("AB".to_string());
        assert!(input.validate().is_err());

        input.name = Some("A".repeat(51));
        assert!(input.validate().is_err());

        input.name = Some("ABC".to_string());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_name_is_reported() {
        let mut input = valid_product_input();
        input.name = None;
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_description_max_length() {
        let mut input = valid_product_input();
        input.description = Some("x".repeat(500));
        assert!(input.validate().is_ok());

        input.description = Some("x".repeat(501));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_price_must_be_at_least_one() {
        let mut input = valid_product_input();
        input.price = Some(Decimal::new(99, 2)); // 0.99
        assert!(input.validate().is_err());

        input.price = Some(Decimal::ONE);
        assert!(input.validate().is_ok());

        // Very large fixed-point values are fine
        input.price = Some(Decimal::new(i64::MAX, 4));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_stock_range() {
        let mut input = valid_product_input();
        input.stock = Some(0);
        assert!(input.validate().is_err());

        input.stock = Some(1001);
        assert!(input.validate().is_err());

        input.stock = Some(1000);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_nil_category_reference_rejected() {
        let mut input = valid_product_input();
        input.category_id = Some(Uuid::nil());
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category_id"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let input = CreateProduct {
            name: Some("AB".to_string()),
            description: Some("x".repeat(501)),
            price: Some(Decimal::ZERO),
            stock: Some(0),
            category_id: Some(Uuid::nil()),
        };

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("stock"));
        assert!(fields.contains_key("category_id"));
    }

    #[test]
    fn test_apply_update_replaces_mutable_fields() {
        let mut product = Product {
            id: Uuid::now_v7(),
            name: "Widget".to_string(),
            description: Some("original".to_string()),
            price: Decimal::new(1000, 2),
            stock: 10,
            category_id: Uuid::now_v7(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let id = product.id;

        let mut view = UpdateProduct::from(&product);
        view.stock = Some(500);
        view.description = None;
        product.apply_update(view);

        assert_eq!(product.id, id);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.stock, 500);
        assert_eq!(product.description, None);
    }
}
