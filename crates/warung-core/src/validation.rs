//! # Validation Module
//!
//! Input validation rules for Warung POS.
//!
//! Small, single-purpose checks that run before business logic. The
//! database enforces its own constraints (NOT NULL, UNIQUE, foreign
//! keys) as a second layer behind these.

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// This is the first check in the transaction flow: a bad quantity
/// rejects the request before any menu lookup happens.
pub fn validate_quantity(qty: i64) -> Result<(), crate::error::CoreError> {
    if qty <= 0 {
        return Err(crate::error::CoreError::InvalidQuantity { quantity: qty });
    }
    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (promotional freebies)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative { field: "price" });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name (required, at most 150 characters).
pub fn validate_menu_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.chars().count() > 150 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 150,
        });
    }
    Ok(())
}

/// Validates a menu description (optional, at most 500 characters).
pub fn validate_menu_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > 500 {
        return Err(ValidationError::TooLong {
            field: "description",
            max: 500,
        });
    }
    Ok(())
}

/// Validates a category name (required, at most 100 characters).
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 100,
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// Deliberately shallow: non-empty and shaped like `local@domain`.
/// Anything stricter belongs to an email round-trip, not a regex.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "expected local@domain",
        });
    }
    Ok(())
}

/// Validates a password (at least 6 characters).
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::TooShort {
            field: "password",
            min: 6,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());

        assert!(matches!(
            validate_quantity(0),
            Err(CoreError::InvalidQuantity { quantity: 0 })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(CoreError::InvalidQuantity { quantity: -3 })
        ));
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_rupiah(15_000)).is_ok());
        assert!(validate_price(Money::from_rupiah(-1)).is_err());
    }

    #[test]
    fn test_validate_menu_name() {
        assert!(validate_menu_name("Soto Ayam").is_ok());
        assert!(validate_menu_name("").is_err());
        assert!(validate_menu_name("   ").is_err());
        assert!(validate_menu_name(&"x".repeat(151)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("kasir@warung.local").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("user@nodot").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("rahasia123").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password("abc").is_err());
    }
}
