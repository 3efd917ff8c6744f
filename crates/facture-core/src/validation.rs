//! # Validation Module
//!
//! Input rules checked by hosts (CLI, forms) before they call the store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host input parsing                                           │
//! │  └── Decimal / enum parsing (FromStr)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  └── Business rules: non-negative money, sane lengths                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InvoiceStore                                                 │
//! │  └── Never rejects. Absent targets are silent no-ops.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{ClientDraft, LineItemDraft};
use crate::{MAX_DESCRIPTION_LEN, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty
/// - At most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a line quantity: `0 ≤ quantity ≤ MAX_ITEM_QUANTITY`.
///
/// ## Example
/// ```rust
/// use facture_core::validation::validate_quantity;
/// use rust_decimal::Decimal;
///
/// assert!(validate_quantity(Decimal::new(15, 1)).is_ok()); // 1.5 hours
/// assert!(validate_quantity(Decimal::from(-1)).is_err());
/// ```
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if quantity > Decimal::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "0".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price: `0 ≤ price ≤ MAX_UNIT_PRICE`.
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    check_amount("unitPrice", price)
}

/// Validates a calculator amount with the same bounds as a unit price.
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    check_amount("amount", amount)
}

fn check_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    if amount.amount() > Decimal::from(MAX_UNIT_PRICE) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0".to_string(),
            max: MAX_UNIT_PRICE.to_string(),
        });
    }
    Ok(())
}

/// Validates a complete line item draft.
pub fn validate_line_item(draft: &LineItemDraft) -> ValidationResult<()> {
    validate_description(&draft.description)?;
    validate_quantity(draft.quantity)?;
    validate_unit_price(draft.unit_price)?;
    Ok(())
}

/// Validates an email address (loose check, empty allowed).
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(());
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "expected name@domain".to_string(),
        }),
    }
}

/// Validates a client draft: name required, email well-formed if given.
pub fn validate_client(draft: &ClientDraft) -> ValidationResult<()> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }
    validate_email(&draft.email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaxCategory;
    use rust_decimal_macros::dec;

    fn draft() -> LineItemDraft {
        LineItemDraft {
            description: "Consulting".to_string(),
            quantity: dec!(1.5),
            unit_price: Money::new(dec!(120)),
            tax_category: TaxCategory::Standard,
        }
    }

    #[test]
    fn test_valid_line_item() {
        assert!(validate_line_item(&draft()).is_ok());
    }

    #[test]
    fn test_zero_quantity_and_price_are_allowed() {
        let mut d = draft();
        d.quantity = dec!(0);
        d.unit_price = Money::zero();
        assert!(validate_line_item(&d).is_ok());
    }

    #[test]
    fn test_blank_description() {
        let mut d = draft();
        d.description = "   ".to_string();
        assert!(matches!(
            validate_line_item(&d),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_negative_values() {
        let mut d = draft();
        d.unit_price = Money::new(dec!(-0.001));
        assert!(matches!(validate_line_item(&d), Err(ValidationError::Negative { .. })));

        let mut d = draft();
        d.quantity = dec!(-2);
        assert!(matches!(validate_line_item(&d), Err(ValidationError::Negative { .. })));
    }

    #[test]
    fn test_quantity_limit() {
        assert!(validate_quantity(Decimal::from(MAX_ITEM_QUANTITY)).is_ok());
        assert!(validate_quantity(Decimal::from(MAX_ITEM_QUANTITY + 1)).is_err());
    }

    #[test]
    fn test_unit_price_limit() {
        let mut d = draft();
        d.unit_price = Money::new(Decimal::from(MAX_UNIT_PRICE));
        assert!(validate_line_item(&d).is_ok());

        d.unit_price = Money::MAX;
        assert!(matches!(
            validate_line_item(&d),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_amount(Money::MAX).is_err());
        assert!(validate_amount(Money::new(dec!(119))).is_ok());
    }

    #[test]
    fn test_client_rules() {
        let mut client = ClientDraft {
            name: "Client SARL".to_string(),
            email: "compta@client.tn".to_string(),
            ..Default::default()
        };
        assert!(validate_client(&client).is_ok());

        client.email = "not-an-email".to_string();
        assert!(validate_client(&client).is_err());

        client.email.clear();
        client.name = " ".to_string();
        assert!(matches!(
            validate_client(&client),
            Err(ValidationError::Required { .. })
        ));
    }
}
