//! # Validation Module
//!
//! Input validation for Kasir request payloads.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request layer (apps/api)                                     │
//! │  └── JSON shape and types (serde deserialization)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Names present and within length                                   │
//! │  ├── Prices and stock not negative                                     │
//! │  └── Checkout quantities positive                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Checkout composer (under row lock)                           │
//! │  └── Product exists, stock sufficient                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::validation::validate_checkout_items;
//! use kasir_core::CheckoutItem;
//!
//! assert!(validate_checkout_items(&[CheckoutItem::new(1, 2)]).is_ok());
//! assert!(validate_checkout_items(&[CheckoutItem::new(1, 0)]).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{CategoryInput, CheckoutItem, ProductInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Maximum length of a category description.
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 500;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a trimmed name is present and at most `max` characters.
fn validate_name(field: &str, name: &str, max: usize) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a category create/update payload.
///
/// ## Rules
/// - `name` must not be blank and at most 100 characters
/// - `description` is optional, at most 500 characters
pub fn validate_category(input: &CategoryInput) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_CATEGORY_NAME_LEN)?;

    if input.description.chars().count() > MAX_CATEGORY_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_CATEGORY_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a product create/update payload.
///
/// ## Rules
/// - `name` must not be blank and at most 200 characters
/// - `price` and `stock` must be zero or greater (zero price is a free item)
///
/// `category_id` is not checked against existing categories.
pub fn validate_product(input: &ProductInput) -> ValidationResult<()> {
    validate_name("name", &input.name, MAX_PRODUCT_NAME_LEN)?;

    if input.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    if input.stock < 0 {
        return Err(ValidationError::Negative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates the items of a checkout request before any store access.
///
/// ## Rules
/// - every `product_id` must be positive
/// - every `quantity` must be positive
///
/// An empty list is valid and checks out as a zero-total transaction.
///
/// ## User Workflow
/// ```text
/// POST /transactions {"items":[{"product_id":1,"quantity":0}]}
///      │
///      ▼
/// validate_checkout_items ← THIS FUNCTION
///      │
///      ├── quantity <= 0?   → "items[0].quantity must be positive"
///      ├── product_id <= 0? → "items[0].product_id must be positive"
///      │
///      └── OK → compose() under a unit of work
/// ```
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult<()> {
    for (index, item) in items.iter().enumerate() {
        if item.product_id <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("items[{}].product_id", index),
            });
        }
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("items[{}].quantity", index),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(name: &str, price: i64, stock: i64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: Money::new(price),
            stock,
            category_id: 1,
        }
    }

    #[test]
    fn test_validate_category() {
        let ok = CategoryInput {
            name: "Minuman".to_string(),
            description: "Minuman dingin dan panas".to_string(),
        };
        assert!(validate_category(&ok).is_ok());

        let blank = CategoryInput {
            name: "   ".to_string(),
            description: String::new(),
        };
        assert!(matches!(
            validate_category(&blank),
            Err(ValidationError::Required { .. })
        ));

        let long_description = CategoryInput {
            name: "Snack".to_string(),
            description: "x".repeat(501),
        };
        assert!(matches!(
            validate_category(&long_description),
            Err(ValidationError::TooLong { max: 500, .. })
        ));
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product("Indomie Goreng", 3500, 100)).is_ok());
        assert!(validate_product(&product("Air Mineral Gratis", 0, 0)).is_ok());
        assert!(validate_product(&product("", 3500, 1)).is_err());
        assert!(validate_product(&product(&"A".repeat(201), 3500, 1)).is_err());

        match validate_product(&product("Teh Botol", -1, 1)) {
            Err(ValidationError::Negative { field }) => assert_eq!(field, "price"),
            other => panic!("expected negative price, got {:?}", other),
        }
        match validate_product(&product("Teh Botol", 4000, -3)) {
            Err(ValidationError::Negative { field }) => assert_eq!(field, "stock"),
            other => panic!("expected negative stock, got {:?}", other),
        }
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 100 multi-byte characters is still within the limit
        let name = "é".repeat(100);
        assert!(validate_name("name", &name, 100).is_ok());
    }

    #[test]
    fn test_validate_checkout_items() {
        assert!(validate_checkout_items(&[]).is_ok());
        assert!(validate_checkout_items(&[CheckoutItem::new(1, 2), CheckoutItem::new(1, 1)]).is_ok());

        match validate_checkout_items(&[CheckoutItem::new(1, 2), CheckoutItem::new(2, -1)]) {
            Err(ValidationError::MustBePositive { field }) => {
                assert_eq!(field, "items[1].quantity")
            }
            other => panic!("expected quantity error, got {:?}", other),
        }
        match validate_checkout_items(&[CheckoutItem::new(0, 1)]) {
            Err(ValidationError::MustBePositive { field }) => {
                assert_eq!(field, "items[0].product_id")
            }
            other => panic!("expected product id error, got {:?}", other),
        }
    }
}
