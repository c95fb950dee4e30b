//! Resolve a classification (category, direction, VAT tag) to an account in
//! the user's chart of accounts.

use serde::Serialize;
use tally_core::{Account, AccountType, Direction};

use crate::chart::{category_mapping, find_vat_rate};

const VAT_CONFIDENCE: u8 = 85;
const CATEGORY_CONFIDENCE: u8 = 80;

/// A suggested account name when no chart of accounts is available
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AccountSuggestion {
    pub account_name: String,
    pub account_code: Option<String>,
    pub account_type: AccountType,
    pub confidence: u8,
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn first_word(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// First words overlap when either contains the other
fn partial_match(account_name: &str, candidate_name: &str) -> bool {
    let a = first_word(account_name);
    let c = first_word(candidate_name);
    !a.is_empty() && !c.is_empty() && (a.contains(&c) || c.contains(&a))
}

fn vat_income_account(direction: Direction, vat_rate: Option<&str>) -> Option<&'static str> {
    match direction {
        Direction::Income => vat_rate
            .and_then(find_vat_rate)
            .map(|rate| rate.income_account),
        Direction::Expense => None,
    }
}

/// Find the account a categorised transaction should be posted to.
///
/// Income with a known VAT tag goes to the matching "Sales Ireland" account
/// when the chart has one. Otherwise the category's candidates are tried in
/// order, first by exact name then by first-word overlap, always requiring
/// the account type to agree.
pub fn find_matching_account<'a>(
    category: &str,
    direction: Direction,
    vat_rate: Option<&str>,
    accounts: &'a [Account],
) -> Option<&'a Account> {
    let by_vat = vat_income_account(direction, vat_rate)
        .and_then(|name| accounts.iter().find(|a| same_name(&a.name, name)));
    if by_vat.is_some() {
        return by_vat;
    }

    let candidates = category_mapping(category)?.candidates(direction);

    let exact = candidates.iter().find_map(|c| {
        accounts
            .iter()
            .find(|a| a.account_type == c.account_type && same_name(&a.name, c.name))
    });
    if exact.is_some() {
        return exact;
    }

    candidates.iter().find_map(|c| {
        accounts
            .iter()
            .find(|a| a.account_type == c.account_type && partial_match(&a.name, c.name))
    })
}

/// Suggest an account name without consulting a chart of accounts
pub fn get_account_suggestion(
    category: &str,
    direction: Direction,
    vat_rate: Option<&str>,
) -> Option<AccountSuggestion> {
    if let Some(name) = vat_income_account(direction, vat_rate) {
        return Some(AccountSuggestion {
            account_name: name.to_string(),
            account_code: None,
            account_type: AccountType::Income,
            confidence: VAT_CONFIDENCE,
        });
    }

    let candidate = category_mapping(category)?.candidates(direction).first()?;
    Some(AccountSuggestion {
        account_name: candidate.name.to_string(),
        account_code: None,
        account_type: candidate.account_type,
        confidence: CATEGORY_CONFIDENCE,
    })
}

/// Catch-all account for a direction: "Other Income" / "General Expenses",
/// else any account of the right type.
pub fn get_default_account(direction: Direction, accounts: &[Account]) -> Option<&Account> {
    let (name, account_type) = match direction {
        Direction::Income => ("Other Income", AccountType::Income),
        Direction::Expense => ("General Expenses", AccountType::Expense),
    };

    accounts
        .iter()
        .find(|a| a.account_type == account_type && same_name(&a.name, name))
        .or_else(|| accounts.iter().find(|a| a.account_type == account_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> Vec<Account> {
        vec![
            Account::new("a1", "Sales", AccountType::Income),
            Account::new("a2", "Sales Ireland 23%", AccountType::Income),
            Account::new("a3", "Materials Purchased", AccountType::CostOfSales),
            Account::new("a4", "General Expenses", AccountType::Expense),
            Account::new("a5", "Telephone Costs", AccountType::Expense),
            Account::new("a6", "Drawings", AccountType::Equity),
            Account::new("a7", "Other Income", AccountType::Income),
        ]
    }

    #[test]
    fn test_vat_tag_beats_category_order() {
        let accounts = chart();
        let acct = find_matching_account("Sales", Direction::Income, Some("standard_23"), &accounts);
        assert_eq!(acct.unwrap().name, "Sales Ireland 23%");

        // 13.5% account missing: falls through to the category table
        let acct = find_matching_account("Sales", Direction::Income, Some("reduced_13_5"), &accounts);
        assert_eq!(acct.unwrap().name, "Sales Ireland 23%");
    }

    #[test]
    fn test_vat_tag_ignored_for_expenses() {
        let accounts = chart();
        let acct = find_matching_account("Materials", Direction::Expense, Some("standard_23"), &accounts);
        assert_eq!(acct.unwrap().name, "Materials Purchased");
    }

    #[test]
    fn test_category_case_insensitive() {
        let accounts = chart();
        let acct = find_matching_account("drawings", Direction::Expense, None, &accounts);
        assert_eq!(acct.unwrap().id, "a6");
    }

    #[test]
    fn test_partial_first_word_match() {
        let accounts = chart();
        let acct = find_matching_account("Telephone", Direction::Expense, None, &accounts);
        assert_eq!(acct.unwrap().name, "Telephone Costs");
    }

    #[test]
    fn test_type_must_agree() {
        let accounts = vec![Account::new("x", "Materials Purchased", AccountType::CurrentAssets)];
        assert!(find_matching_account("Materials", Direction::Expense, None, &accounts).is_none());
    }

    #[test]
    fn test_unknown_category() {
        assert!(find_matching_account("Unicorns", Direction::Expense, None, &chart()).is_none());
        assert!(get_account_suggestion("Unicorns", Direction::Expense, None).is_none());
        // Materials has no income candidates
        assert!(get_account_suggestion("Materials", Direction::Income, None).is_none());
    }

    #[test]
    fn test_suggestions() {
        let s = get_account_suggestion("Sales", Direction::Income, Some("Reduced 13.5%")).unwrap();
        assert_eq!(s.account_name, "Sales Ireland 13.5%");
        assert_eq!(s.confidence, 85);
        assert_eq!(s.account_code, None);

        let s = get_account_suggestion("Fuel", Direction::Expense, None).unwrap();
        assert_eq!(s.account_name, "Motor Fuel");
        assert_eq!(s.account_type, AccountType::Expense);
        assert_eq!(s.confidence, 80);
    }

    #[test]
    fn test_default_account() {
        let accounts = chart();
        assert_eq!(get_default_account(Direction::Expense, &accounts).unwrap().id, "a4");
        assert_eq!(get_default_account(Direction::Income, &accounts).unwrap().id, "a7");

        let sparse = vec![Account::new("s", "Sales", AccountType::Income)];
        assert_eq!(get_default_account(Direction::Income, &sparse).unwrap().id, "s");
        assert!(get_default_account(Direction::Expense, &sparse).is_none());
    }
}
