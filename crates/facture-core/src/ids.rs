//! # Identifier Generator
//!
//! Two kinds of identity live on an invoice:
//!
//! - `id`: UUID v4, immutable, the real key in every collection
//! - `number`: human invoice number like `INV-202610-042`, printed on the
//!   document. Collisions are possible and tolerated; nothing keys on it.

use chrono::{Datelike, Local};
use rand::Rng;
use uuid::Uuid;

/// Returns a new globally-unique opaque id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates a human invoice number for the current local month.
///
/// Format: `{prefix}-{YYYY}{MM}-{NNN}` with a random 3-digit suffix.
pub fn new_invoice_number(prefix: &str) -> String {
    invoice_number_for(prefix, &Local::now().date_naive(), &mut rand::thread_rng())
}

/// Deterministic core of [`new_invoice_number`].
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use facture_core::ids::invoice_number_for;
/// use rand::rngs::mock::StepRng;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// let number = invoice_number_for("INV", &date, &mut StepRng::new(0, 0));
/// assert_eq!(number, "INV-202603-000");
/// ```
pub fn invoice_number_for(prefix: &str, date: &impl Datelike, rng: &mut impl Rng) -> String {
    let suffix: u32 = rng.gen_range(0..1000);
    format!("{}-{:04}{:02}-{:03}", prefix, date.year(), date.month(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_is_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_invoice_number_format() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let number = invoice_number_for("INV", &date, &mut rng);
            let parts: Vec<&str> = number.split('-').collect();
            assert_eq!(parts.len(), 3, "{number}");
            assert_eq!(parts[0], "INV");
            assert_eq!(parts[1], "202401");
            assert_eq!(parts[2].len(), 3);
            assert!(parts[2].parse::<u32>().unwrap() < 1000);
        }
    }

    #[test]
    fn test_custom_prefix_and_current_month() {
        let number = new_invoice_number("FAC");
        let today = Local::now().date_naive();
        assert!(number.starts_with(&format!("FAC-{:04}{:02}-", today.year(), today.month())));
    }
}
