//! Errors raised while building the static lookup dictionaries

use thiserror::Error;

/// A reference table that cannot produce a consistent dictionary.
///
/// Only raised at construction time; lookups themselves never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("duplicate town entry: {name}, Co. {county}")]
    DuplicateTown { name: String, county: String },

    #[error("town {name} names unknown county {county}")]
    UnknownCounty { name: String, county: String },

    #[error("expected exactly one town at distance 0, found {0}")]
    CapitalCount(usize),
}
