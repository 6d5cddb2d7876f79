use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity - the record held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier, assigned at creation and never changed
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Fixed-point price
    pub price: Decimal,
}

impl Product {
    /// Build a product from a validated create payload under a fresh id.
    pub fn new(id: Uuid, input: CreateProduct) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
        }
    }
}

/// Flat projection of a product returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    #[schema(example = "Widget")]
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

/// DTO for creating a new product
///
/// Missing fields deserialize to their empty value so that they are reported
/// by validation rather than rejected as malformed JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[serde(default)]
    #[validate(custom(function = "crate::validation::validate_name"))]
    #[schema(example = "Widget")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Product description cannot exceed 500 characters."))]
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    #[validate(custom(function = "crate::validation::validate_price"))]
    #[schema(value_type = f64, example = 9.99)]
    pub price: Decimal,
}

/// Request body for replacing a product
///
/// The id comes from the path. A body `id`, when present, must match it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(default)]
    #[schema(example = "Widget2")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub price: Decimal,
}

/// Command replacing every mutable field of an existing product
#[derive(Debug, Clone, Validate)]
pub struct UpdateProduct {
    #[validate(custom(function = "crate::validation::validate_id"))]
    pub id: Uuid,
    #[validate(custom(function = "crate::validation::validate_name"))]
    pub name: String,
    #[validate(length(max = 500, message = "Product description cannot exceed 500 characters."))]
    pub description: String,
    #[validate(custom(function = "crate::validation::validate_price"))]
    pub price: Decimal,
}

impl UpdateProduct {
    pub fn from_request(id: Uuid, request: UpdateProductRequest) -> Self {
        Self {
            id,
            name: request.name,
            description: request.description,
            price: request.price,
        }
    }

    /// The replacement record; the id is carried over unchanged.
    pub fn into_product(self) -> Product {
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{
        DESCRIPTION_TOO_LONG, ID_EMPTY, NAME_REQUIRED, NAME_TOO_LONG, PRICE_NOT_POSITIVE,
    };
    use axum_helpers::{FieldError, field_errors};
    use serde_json::json;

    fn create(name: &str, description: &str, price: Decimal) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: description.to_string(),
            price,
        }
    }

    #[test]
    fn test_valid_create_passes() {
        assert!(create("Widget", "", Decimal::new(999, 2)).validate().is_ok());
    }

    #[test]
    fn test_create_collects_every_violation() {
        let errors = create("", "", Decimal::new(-5, 0)).validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![
                FieldError::new("name", NAME_REQUIRED),
                FieldError::new("price", PRICE_NOT_POSITIVE),
            ]
        );
    }

    #[test]
    fn test_length_limits() {
        let errors = create(&"n".repeat(101), &"d".repeat(501), Decimal::ONE)
            .validate()
            .unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![
                FieldError::new("description", DESCRIPTION_TOO_LONG),
                FieldError::new("name", NAME_TOO_LONG),
            ]
        );

        assert!(
            create(&"n".repeat(100), &"d".repeat(500), Decimal::ONE)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_update_rejects_nil_id() {
        let command = UpdateProduct {
            id: Uuid::nil(),
            name: "Widget".to_string(),
            description: String::new(),
            price: Decimal::ONE,
        };
        let errors = command.validate().unwrap_err();
        assert_eq!(field_errors(&errors), vec![FieldError::new("id", ID_EMPTY)]);
    }

    #[test]
    fn test_create_payload_defaults_missing_fields() {
        let payload: CreateProduct = serde_json::from_value(json!({ "name": "Widget" })).unwrap();
        assert_eq!(payload.description, "");
        assert_eq!(payload.price, Decimal::ZERO);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_price_travels_as_json_number() {
        let payload: CreateProduct =
            serde_json::from_value(json!({ "name": "Widget", "price": 9.99 })).unwrap();
        assert_eq!(payload.price, Decimal::new(999, 2));

        let dto = ProductDto::from(Product::new(Uuid::new_v4(), payload));
        let value = serde_json::to_value(&dto).unwrap();
        assert!(value["price"].is_number());
    }

    #[test]
    fn test_update_keeps_id() {
        let id = Uuid::new_v4();
        let request = UpdateProductRequest {
            id: None,
            name: "Widget2".to_string(),
            description: "Shiny".to_string(),
            price: Decimal::new(1999, 2),
        };
        let product = UpdateProduct::from_request(id, request).into_product();
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Widget2");
    }
}
