//! Field rules shared by the create and update payloads.
//!
//! The rules are attached to the payload types through `validator` derives;
//! running `Validate::validate` collects every violated rule rather than
//! stopping at the first.

use rust_decimal::Decimal;
use std::borrow::Cow;
use uuid::Uuid;
use validator::ValidationError;

pub const NAME_MAX_CHARS: usize = 100;

pub const ID_EMPTY: &str = "Product ID cannot be an empty GUID.";
pub const ID_MISMATCH: &str = "Product ID in the body must match the ID in the path.";
pub const NAME_REQUIRED: &str = "Product name is required.";
pub const NAME_TOO_LONG: &str = "Product name cannot exceed 100 characters.";
pub const DESCRIPTION_TOO_LONG: &str = "Product description cannot exceed 500 characters.";
pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than zero.";

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// The nil UUID is never a valid product id.
pub fn validate_id(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(violation("empty_id", ID_EMPTY));
    }
    Ok(())
}

/// Names must contain a non-whitespace character and fit in 100 characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(violation("required", NAME_REQUIRED));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(violation("max_length", NAME_TOO_LONG));
    }
    Ok(())
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(violation("positive", PRICE_NOT_POSITIVE));
    }
    Ok(())
}
