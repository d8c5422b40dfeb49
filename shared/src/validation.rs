//! Validation utilities for forms and basket lines

use rust_decimal::Decimal;
use validator::ValidationError;

// ============================================================================
// Field Validations
// ============================================================================

/// Validate a backend identifier (assigned by the backend, always positive)
pub fn validate_entity_id(id: i64) -> Result<(), &'static str> {
    if id <= 0 {
        return Err("Identifier must be a positive integer");
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate a sale price (strictly positive)
pub fn validate_sale_price(price: Decimal) -> Result<(), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Sale price must be greater than zero");
    }
    Ok(())
}

/// Validate a purchase price (zero allowed when the cost is unknown)
pub fn validate_purchase_price(price: Decimal) -> Result<(), &'static str> {
    if price < Decimal::ZERO {
        return Err("Purchase price cannot be negative");
    }
    Ok(())
}

// ============================================================================
// Form Validators (validator custom rules)
// ============================================================================

/// `#[validate(custom = ...)]` rule for catalogue prices
pub fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("Price cannot be negative".into());
        return Err(error);
    }
    Ok(())
}
