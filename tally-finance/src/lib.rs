//! tally-finance: account mapping, trip detection and bulk recategorisation

pub mod accounts;
pub mod chart;
pub mod classifier;
pub mod recategorise;
pub mod trip_expense;
pub mod trips;

pub use accounts::{AccountSuggestion, find_matching_account, get_account_suggestion, get_default_account};
pub use chart::{CATEGORY_ACCOUNTS, VAT_RATES, category_mapping, find_vat_rate, vat_rate_percent};
pub use classifier::{Classification, Classifier, MerchantRulesClassifier};
pub use recategorise::{
    CategoryUpdate, Invoice, MemoryStore, RecategoriseMode, RecategoriseOptions, RecategoriseReport,
    Recategoriser, TransactionStore,
};
pub use trip_expense::{TripExpenseType, classify_trip_expense};
pub use trips::{DetectedTrip, TripTransaction, detect_trips, detect_trips_with};
