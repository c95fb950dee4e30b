//! Fixed mapping tables from classification output to chart-of-accounts names.
//!
//! Both tables are ordered: candidates are tried in declaration order and the
//! first hit wins.

use serde::Serialize;
use tally_core::{AccountType, Direction};

/// A preferred account for a category
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AccountCandidate {
    pub name: &'static str,
    pub account_type: AccountType,
}

/// Candidate accounts for one category, per direction
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryMapping {
    pub category: &'static str,
    pub income: &'static [AccountCandidate],
    pub expense: &'static [AccountCandidate],
}

impl CategoryMapping {
    pub fn candidates(&self, direction: Direction) -> &'static [AccountCandidate] {
        match direction {
            Direction::Income => self.income,
            Direction::Expense => self.expense,
        }
    }
}

/// An Irish VAT rate with every spelling the classifiers emit for it
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct VatRate {
    pub tags: &'static [&'static str],
    pub percent: f64,
    /// Sales account that income at this rate is booked to
    pub income_account: &'static str,
}

pub static VAT_RATES: &[VatRate] = &[
    VatRate {
        tags: &["standard_23", "standard", "Standard 23%", "23%", "23"],
        percent: 23.0,
        income_account: "Sales Ireland 23%",
    },
    VatRate {
        tags: &["reduced_13_5", "reduced", "Reduced 13.5%", "13.5%", "13.5"],
        percent: 13.5,
        income_account: "Sales Ireland 13.5%",
    },
    VatRate {
        tags: &["second_reduced_9", "second_reduced", "Second Reduced 9%", "9%", "9"],
        percent: 9.0,
        income_account: "Sales Ireland 9%",
    },
    VatRate {
        tags: &["zero_rated", "zero", "Zero Rated", "0%", "0"],
        percent: 0.0,
        income_account: "Sales Ireland 0%",
    },
    VatRate {
        tags: &["exempt", "Exempt", "VAT Exempt"],
        percent: 0.0,
        income_account: "Sales Exempt",
    },
];

/// VAT rate for a tag in either spelling (case-insensitive)
pub fn find_vat_rate(tag: &str) -> Option<&'static VatRate> {
    let tag = tag.trim();
    VAT_RATES
        .iter()
        .find(|r| r.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)))
}

/// Percentage for a VAT tag, e.g. "reduced_13_5" -> 13.5
pub fn vat_rate_percent(tag: &str) -> Option<f64> {
    find_vat_rate(tag).map(|r| r.percent)
}

const fn acct(name: &'static str, account_type: AccountType) -> AccountCandidate {
    AccountCandidate { name, account_type }
}

const fn map(
    category: &'static str,
    income: &'static [AccountCandidate],
    expense: &'static [AccountCandidate],
) -> CategoryMapping {
    CategoryMapping {
        category,
        income,
        expense,
    }
}

use AccountType::{
    CostOfSales, CurrentAssets, CurrentLiabilities, Equity, Expense, FixedAssets, Income, Payroll,
    Vat,
};

pub static CATEGORY_ACCOUNTS: &[CategoryMapping] = &[
    // Income
    map("Sales", &[acct("Sales Ireland 23%", Income), acct("Sales", Income), acct("Other Income", Income)], &[]),
    map("Labour Income", &[acct("Labour Income", Income), acct("Sales Ireland 13.5%", Income), acct("Sales", Income)], &[]),
    map("Consulting", &[acct("Consulting Income", Income), acct("Sales Ireland 23%", Income), acct("Sales", Income)], &[]),
    map("Grants", &[acct("Grant Income", Income), acct("Other Income", Income)], &[]),
    map("Refunds", &[acct("Refunds Received", Income), acct("Other Income", Income)], &[]),
    map("Other Income", &[acct("Other Income", Income)], &[]),
    map("Capital Introduced", &[acct("Capital Introduced", Equity)], &[]),
    map("Interest", &[acct("Interest Received", Income), acct("Other Income", Income)], &[acct("Interest Paid", Expense), acct("Bank Charges", Expense)]),
    // Cost of sales
    map("Materials", &[], &[acct("Materials Purchased", CostOfSales), acct("Purchases", CostOfSales), acct("Materials", Expense)]),
    map("Subcontractors", &[], &[acct("Subcontractor Costs", CostOfSales), acct("Subcontractors", Expense)]),
    map("Tools", &[], &[acct("Small Tools & Equipment", Expense), acct("Tools", Expense)]),
    map("Equipment", &[], &[acct("Plant & Machinery", FixedAssets), acct("Computer Equipment", FixedAssets), acct("Small Tools & Equipment", Expense)]),
    // Motor and travel
    map("Fuel", &[], &[acct("Motor Fuel", Expense), acct("Motor Expenses", Expense), acct("Vehicle Expenses", Expense)]),
    map("Motor Expenses", &[], &[acct("Motor Expenses", Expense), acct("Vehicle Expenses", Expense)]),
    map("Vehicle Expenses", &[], &[acct("Vehicle Expenses", Expense), acct("Motor Expenses", Expense)]),
    map("Travel", &[], &[acct("Travel & Subsistence", Expense), acct("Travel Expenses", Expense), acct("Motor Expenses", Expense)]),
    map("Travel & Subsistence", &[], &[acct("Travel & Subsistence", Expense), acct("Travel Expenses", Expense)]),
    map("Subsistence", &[], &[acct("Subsistence", Expense), acct("Travel & Subsistence", Expense)]),
    map("Meals", &[], &[acct("Subsistence", Expense), acct("Travel & Subsistence", Expense), acct("Entertainment", Expense)]),
    map("Accommodation", &[], &[acct("Travel & Subsistence", Expense), acct("Accommodation", Expense)]),
    // Overheads
    map("Telephone", &[], &[acct("Telephone & Internet", Expense), acct("Telephone", Expense)]),
    map("Internet", &[], &[acct("Telephone & Internet", Expense), acct("Internet", Expense)]),
    map("Utilities", &[], &[acct("Light & Heat", Expense), acct("Utilities", Expense)]),
    map("Rent", &[], &[acct("Rent & Rates", Expense), acct("Rent", Expense)]),
    map("Insurance", &[], &[acct("Insurance", Expense)]),
    map("Software", &[], &[acct("Software & Subscriptions", Expense), acct("Computer Costs", Expense)]),
    map("Subscriptions", &[], &[acct("Software & Subscriptions", Expense), acct("Subscriptions", Expense)]),
    map("Advertising", &[], &[acct("Advertising & Marketing", Expense), acct("Advertising", Expense)]),
    map("Office", &[], &[acct("Office Expenses", Expense), acct("Printing, Postage & Stationery", Expense)]),
    map("Postage", &[], &[acct("Printing, Postage & Stationery", Expense), acct("Office Expenses", Expense)]),
    map("Professional Fees", &[], &[acct("Professional Fees", Expense), acct("Accountancy Fees", Expense)]),
    map("Accountancy", &[], &[acct("Accountancy Fees", Expense), acct("Professional Fees", Expense)]),
    map("Legal", &[], &[acct("Legal Fees", Expense), acct("Professional Fees", Expense)]),
    map("Bank Charges", &[], &[acct("Bank Charges", Expense)]),
    map("Repairs", &[], &[acct("Repairs & Maintenance", Expense)]),
    map("Training", &[], &[acct("Training", Expense), acct("Staff Training", Expense)]),
    map("Protective Clothing", &[], &[acct("Protective Clothing", Expense), acct("Workwear", Expense)]),
    // Payroll, tax and balance sheet
    map("Wages", &[], &[acct("Wages & Salaries", Payroll), acct("Wages", Payroll)]),
    map("Pension", &[], &[acct("Pension Contributions", Payroll)]),
    map("Tax Payment", &[], &[acct("Revenue Payments", CurrentLiabilities), acct("PAYE/PRSI Payable", CurrentLiabilities)]),
    map("VAT Payment", &[acct("VAT Control", Vat)], &[acct("VAT Payable", Vat), acct("VAT Control", Vat)]),
    map("Loan Repayment", &[acct("Loans", CurrentLiabilities)], &[acct("Loans", CurrentLiabilities), acct("Bank Loan", CurrentLiabilities)]),
    map("Transfer", &[acct("Internal Transfers", CurrentAssets)], &[acct("Internal Transfers", CurrentAssets)]),
    map("Drawings", &[], &[acct("Drawings", Equity), acct("Owner's Drawings", Equity)]),
    // Catch-alls
    map("General Expenses", &[], &[acct("General Expenses", Expense), acct("Sundry Expenses", Expense)]),
    map("Other", &[acct("Other Income", Income)], &[acct("General Expenses", Expense), acct("Sundry Expenses", Expense)]),
];

/// Mapping for a category: exact key first, then case-insensitive
pub fn category_mapping(category: &str) -> Option<&'static CategoryMapping> {
    let category = category.trim();
    CATEGORY_ACCOUNTS
        .iter()
        .find(|m| m.category == category)
        .or_else(|| {
            CATEGORY_ACCOUNTS
                .iter()
                .find(|m| m.category.eq_ignore_ascii_case(category))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vat_tags_both_spellings() {
        assert_eq!(vat_rate_percent("standard_23"), Some(23.0));
        assert_eq!(vat_rate_percent("Reduced 13.5%"), Some(13.5));
        assert_eq!(vat_rate_percent("ZERO_RATED"), Some(0.0));
        assert_eq!(find_vat_rate("exempt").unwrap().income_account, "Sales Exempt");
        assert_eq!(vat_rate_percent("luxury_99"), None);
    }

    #[test]
    fn test_category_lookup_case_insensitive() {
        assert_eq!(category_mapping("Materials").unwrap().category, "Materials");
        assert_eq!(category_mapping("motor expenses").unwrap().category, "Motor Expenses");
        assert!(category_mapping("Unicorns").is_none());
    }

    #[test]
    fn test_categories_unique() {
        let mut seen = HashSet::new();
        for m in CATEGORY_ACCOUNTS {
            assert!(seen.insert(m.category.to_lowercase()), "duplicate {}", m.category);
            assert!(
                !m.income.is_empty() || !m.expense.is_empty(),
                "{} maps to nothing",
                m.category
            );
        }
    }
}
