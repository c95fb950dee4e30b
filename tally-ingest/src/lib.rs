//! tally-ingest: statement loading and description cleanup (vendor names, merchant matching)

pub mod matcher;
pub mod merchants;
pub mod statement;
pub mod vendor;

pub use matcher::{MerchantMatch, clean_description, extract_merchant_name, match_known_merchant};
pub use merchants::{KNOWN_MERCHANTS, KnownMerchant, find_merchant};
pub use statement::{parse_statement, read_booked_csv, read_transactions_csv};
pub use vendor::extract_vendor_name;
