//! Chart-of-Accounts entries supplied by the persistence layer

use serde::{Deserialize, Serialize};

/// Account classification in the chart of accounts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountType {
    #[serde(rename = "Income")]
    Income,
    #[serde(rename = "Cost of Sales")]
    CostOfSales,
    #[serde(rename = "Expense")]
    Expense,
    #[serde(rename = "VAT")]
    Vat,
    #[serde(rename = "Payroll")]
    Payroll,
    #[serde(rename = "Fixed Assets")]
    FixedAssets,
    #[serde(rename = "Current Assets")]
    CurrentAssets,
    #[serde(rename = "Current Liabilities")]
    CurrentLiabilities,
    #[serde(rename = "Equity")]
    Equity,
    #[serde(rename = "bank")]
    Bank,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Income => "Income",
            AccountType::CostOfSales => "Cost of Sales",
            AccountType::Expense => "Expense",
            AccountType::Vat => "VAT",
            AccountType::Payroll => "Payroll",
            AccountType::FixedAssets => "Fixed Assets",
            AccountType::CurrentAssets => "Current Assets",
            AccountType::CurrentLiabilities => "Current Liabilities",
            AccountType::Equity => "Equity",
            AccountType::Bank => "bank",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart-of-accounts entry. Read and selected, never created, by the engines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_type_wire_names() {
        let acct = Account::new("a1", "Materials Purchased", AccountType::CostOfSales);
        let json = serde_json::to_value(&acct).unwrap();
        assert_eq!(json["account_type"], "Cost of Sales");

        let bank: AccountType = serde_json::from_str("\"bank\"").unwrap();
        assert_eq!(bank, AccountType::Bank);
        assert_eq!(AccountType::Vat.to_string(), "VAT");
    }
}
