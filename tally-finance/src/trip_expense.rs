//! Classify a trip transaction as accommodation, transport or subsistence.

use serde::{Deserialize, Serialize};
use tally_core::text::{contains_term, normalize_text};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TripExpenseType {
    Accommodation,
    Transport,
    Subsistence,
    Other,
}

impl TripExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripExpenseType::Accommodation => "accommodation",
            TripExpenseType::Transport => "transport",
            TripExpenseType::Subsistence => "subsistence",
            TripExpenseType::Other => "other",
        }
    }
}

impl std::fmt::Display for TripExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bank and tax lines are never trip spend, whatever else they mention
const EXCLUDED: &[&str] = &[
    "bank charge",
    "bank fee",
    "government stamp",
    "stamp duty",
    "revenue",
    "rev comm",
    "interest charge",
    "account fee",
    "service charge",
    "direct debit",
    "standing order",
];

/// Keywords that alone make a single transaction an overnight stay
pub const HOTEL_KEYWORDS: &[&str] = &[
    "hotel",
    "b&b",
    "guesthouse",
    "hostel",
    "airbnb",
    "booking.com",
    "accommodation",
    "lodge",
    "inn",
];

const ACCOMMODATION: &[&str] = &[
    "hotel",
    "b&b",
    "b & b",
    "bnb",
    "b and b",
    "bed and breakfast",
    "guesthouse",
    "guest house",
    "hostel",
    "airbnb",
    "booking.com",
    "accommodation",
    "lodge",
    "inn",
    "travelodge",
    "maldron",
];

const TRANSPORT: &[&str] = &[
    "port of",
    "ferry",
    "ferries",
    "taxi",
    "uber",
    "freenow",
    "free now",
    "bolt",
    "taxify",
    "bus",
    "bus eireann",
    "buseireann",
    "train",
    "irish rail",
    "irishrail",
    "iarnrod",
    "luas",
    "toll",
    "eflow",
    "parking",
    "car park",
    "fuel",
    "petrol",
    "diesel",
];

const SUBSISTENCE: &[&str] = &[
    "restaurant",
    "cafe",
    "coffee",
    "food",
    "breakfast",
    "lunch",
    "dinner",
    "pub",
    "bar",
    "takeaway",
    "take away",
    "deli",
    "mcdonald",
    "supermac",
    "burger king",
    "subway",
    "starbucks",
    "costa",
    "insomnia",
    "centra",
    "spar",
    "mace",
    "londis",
    "tesco",
    "dunnes",
    "supervalu",
    "lidl",
    "aldi",
    "applegreen",
    "circle k",
    "circlek",
    "topaz",
    "maxol",
];

/// Short keywords that are also common word fragments ("dinner", "business",
/// "training", "delivery"); these only match as whole words.
const WHOLE_WORD_ONLY: &[&str] = &["inn", "bus", "bar", "pub", "bolt", "deli", "spar", "mace", "train"];

/// Substring match, except for [`WHOLE_WORD_ONLY`] keywords
fn mentions(text: &str, keyword: &str) -> bool {
    if WHOLE_WORD_ONLY.contains(&keyword) {
        contains_term(text, keyword)
    } else {
        text.contains(keyword)
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| mentions(text, k))
}

/// True when the description names an overnight stay
pub fn is_accommodation_booking(description: &str) -> bool {
    mentions_any(&normalize_text(description), HOTEL_KEYWORDS)
}

/// Expense type of a transaction on a business trip.
///
/// Exclusions are checked first, then accommodation, transport and
/// subsistence keywords in that order; anything else is `Other`.
pub fn classify_trip_expense(description: &str) -> TripExpenseType {
    let text = normalize_text(description);

    if mentions_any(&text, EXCLUDED) {
        return TripExpenseType::Other;
    }
    if mentions_any(&text, ACCOMMODATION) {
        return TripExpenseType::Accommodation;
    }
    if mentions_any(&text, TRANSPORT) {
        return TripExpenseType::Transport;
    }
    if mentions_any(&text, SUBSISTENCE) {
        return TripExpenseType::Subsistence;
    }
    TripExpenseType::Other
}
