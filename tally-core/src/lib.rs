//! tally-core: bookkeeping data model, the Irish town table and location lookup

pub mod account;
pub mod error;
pub mod location;
pub mod text;
pub mod towns;
pub mod transaction;

pub use account::{Account, AccountType};
pub use error::DictionaryError;
pub use location::{
    LocationDictionary, detect_transaction_location, extract_base_location,
    extract_county_from_address, extract_location_from_text,
};
pub use towns::{
    COUNTIES, TOWNS, Town, canonical_county, county_for_town, find_town, format_town_display,
    towns_in_county,
};
pub use transaction::{BookedTransaction, Direction, Transaction};
