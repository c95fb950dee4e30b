//! Classification port used by the recategoriser, plus the deterministic
//! merchant-table classifier.

use serde::{Deserialize, Serialize};
use tally_core::BookedTransaction;
use tally_ingest::{extract_merchant_name, extract_vendor_name};

/// Output of any classification engine (rules, LLM, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    /// 0-100
    pub confidence: u8,
    /// VAT rate tag, e.g. "standard_23"
    pub vat_rate: Option<String>,
    pub notes: Option<String>,
}

impl Classification {
    pub fn new(category: impl Into<String>, confidence: u8) -> Self {
        Self {
            category: category.into(),
            confidence: confidence.min(100),
            vat_rate: None,
            notes: None,
        }
    }

    pub fn with_vat_rate(mut self, vat_rate: impl Into<String>) -> Self {
        self.vat_rate = Some(vat_rate.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Produces a category guess for a transaction. Must not fail.
pub trait Classifier {
    fn classify(&self, transaction: &BookedTransaction) -> Classification;
}

impl<F> Classifier for F
where
    F: Fn(&BookedTransaction) -> Classification,
{
    fn classify(&self, transaction: &BookedTransaction) -> Classification {
        self(transaction)
    }
}

const MATCHED_CONFIDENCE: u8 = 90;
const UNMATCHED_INCOME_CONFIDENCE: u8 = 45;
const UNMATCHED_EXPENSE_CONFIDENCE: u8 = 30;

/// Classifies by the known-merchant table: vendor name, then merchant match.
#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantRulesClassifier;

impl Classifier for MerchantRulesClassifier {
    fn classify(&self, booked: &BookedTransaction) -> Classification {
        let vendor = extract_vendor_name(&booked.transaction.description);
        let matched = extract_merchant_name(&vendor);

        match matched.matched_merchant {
            Some(merchant) => Classification::new(merchant.category, MATCHED_CONFIDENCE)
                .with_vat_rate(merchant.vat_rate)
                .with_notes(format!(
                    "Matched {} ({})",
                    merchant.canonical_name, merchant.business_type
                )),
            None if booked.transaction.is_income() => {
                Classification::new("Sales", UNMATCHED_INCOME_CONFIDENCE)
            }
            None => Classification::new("General Expenses", UNMATCHED_EXPENSE_CONFIDENCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{Direction, Transaction};

    fn booked(desc: &str, direction: Direction) -> BookedTransaction {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        BookedTransaction::new(Transaction::new("t", desc, 10.0, date, direction), None)
    }

    #[test]
    fn test_matched_merchant() {
        let c = MerchantRulesClassifier.classify(&booked(
            "VDP-CHADWICKS DUBLIN 12345678 01/06/2024",
            Direction::Expense,
        ));
        assert_eq!(c.category, "Materials");
        assert_eq!(c.confidence, 90);
        assert!(c.vat_rate.is_some());
        assert!(c.notes.unwrap().starts_with("Matched Chadwicks"));
    }

    #[test]
    fn test_direct_debit_with_country_suffix() {
        let c = MerchantRulesClassifier.classify(&booked("DD ELECTRIC IRELAND 01/02/24", Direction::Expense));
        assert_eq!(c.category, "Utilities");
        assert_eq!(c.confidence, 90);
    }

    #[test]
    fn test_unmatched() {
        let c = MerchantRulesClassifier.classify(&booked("BGC J MURPHY", Direction::Income));
        assert_eq!(c, Classification::new("Sales", 45));

        let c = MerchantRulesClassifier.classify(&booked("FPO J MURPHY", Direction::Expense));
        assert_eq!(c.category, "General Expenses");
        assert_eq!(c.confidence, 30);
    }

    #[test]
    fn test_closure_classifier() {
        let always = |_: &BookedTransaction| Classification::new("Drawings", 150);
        let c = always.classify(&booked("ANYTHING", Direction::Expense));
        assert_eq!(c.confidence, 100);
    }
}
