//! Known Irish merchants seen on business bank statements.
//!
//! Order matters: the matcher takes the first entry whose key or keyword
//! appears in the cleaned description, so more specific entries come first
//! (e.g. "google ads" before "google"). Matching runs after a trailing
//! "ie"/"ireland" is stripped, so every entry needs a key or alias that
//! survives that ("electric" for Electric Ireland).

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct KnownMerchant {
    /// Primary lookup string (lowercase)
    pub key: &'static str,
    pub canonical_name: &'static str,
    /// Spending category, as used by the account mapping table
    pub category: &'static str,
    pub business_type: &'static str,
    /// VAT rate tag, e.g. "standard_23"
    pub vat_rate: &'static str,
    /// Extra lowercase aliases matched as substrings
    pub keywords: &'static [&'static str],
}

const fn merchant(
    key: &'static str,
    canonical_name: &'static str,
    category: &'static str,
    business_type: &'static str,
    vat_rate: &'static str,
    keywords: &'static [&'static str],
) -> KnownMerchant {
    KnownMerchant {
        key,
        canonical_name,
        category,
        business_type,
        vat_rate,
        keywords,
    }
}

pub static KNOWN_MERCHANTS: &[KnownMerchant] = &[
    // Builders merchants and trade suppliers
    merchant("chadwicks", "Chadwicks", "Materials", "Builders Merchant", "standard_23", &["chadwick"]),
    merchant("heiton buckley", "Heiton Buckley", "Materials", "Builders Merchant", "standard_23", &["heiton"]),
    merchant("brooks timber", "Brooks", "Materials", "Timber Merchant", "standard_23", &["brooks builders"]),
    merchant("woodies", "Woodie's", "Materials", "DIY Store", "standard_23", &["woodie"]),
    merchant("mcquillan", "McQuillan Tools", "Tools", "Trade Supplier", "standard_23", &[]),
    merchant("screwfix", "Screwfix", "Tools", "Trade Supplier", "standard_23", &[]),
    merchant("toolstation", "Toolstation", "Tools", "Trade Supplier", "standard_23", &["tool station"]),
    // Fuel and motoring
    merchant("circle k", "Circle K", "Fuel", "Fuel Station", "standard_23", &["circlek", "topaz"]),
    merchant("applegreen", "Applegreen", "Fuel", "Fuel Station", "standard_23", &["apple green"]),
    merchant("maxol", "Maxol", "Fuel", "Fuel Station", "standard_23", &[]),
    merchant("texaco", "Texaco", "Fuel", "Fuel Station", "standard_23", &[]),
    merchant("eflow", "eFlow", "Motor Expenses", "Toll Operator", "standard_23", &["e flow", "m50 toll"]),
    merchant("apcoa", "APCOA Parking", "Motor Expenses", "Car Park", "standard_23", &["parkingtag", "parking tag", "payzone parking"]),
    // Travel and accommodation
    merchant("irish rail", "Irish Rail", "Travel", "Rail Operator", "zero_rated", &["iarnrod", "irishrail"]),
    merchant("bus eireann", "Bus Eireann", "Travel", "Bus Operator", "zero_rated", &["buseireann"]),
    merchant("aer lingus", "Aer Lingus", "Travel", "Airline", "zero_rated", &["aerlingus"]),
    merchant("ryanair", "Ryanair", "Travel", "Airline", "zero_rated", &[]),
    merchant("freenow", "FREENOW", "Travel", "Taxi", "zero_rated", &["free now", "mytaxi"]),
    merchant("uber", "Uber", "Travel", "Taxi", "zero_rated", &[]),
    merchant("booking com", "Booking.com", "Travel", "Accommodation", "reduced_13_5", &["booking"]),
    merchant("airbnb", "Airbnb", "Travel", "Accommodation", "reduced_13_5", &[]),
    merchant("maldron", "Maldron Hotels", "Travel", "Hotel", "reduced_13_5", &[]),
    merchant("travelodge", "Travelodge", "Travel", "Hotel", "reduced_13_5", &[]),
    // Food on the go
    merchant("mcdonalds", "McDonald's", "Subsistence", "Fast Food", "reduced_13_5", &["mcdonald", "mc donalds"]),
    merchant("supermacs", "Supermac's", "Subsistence", "Fast Food", "reduced_13_5", &["supermac"]),
    merchant("insomnia", "Insomnia Coffee", "Subsistence", "Cafe", "reduced_13_5", &[]),
    merchant("costa coffee", "Costa Coffee", "Subsistence", "Cafe", "reduced_13_5", &["costa"]),
    merchant("starbucks", "Starbucks", "Subsistence", "Cafe", "reduced_13_5", &[]),
    merchant("centra", "Centra", "Subsistence", "Convenience Store", "reduced_13_5", &[]),
    merchant("spar", "Spar", "Subsistence", "Convenience Store", "reduced_13_5", &["eurospar"]),
    // Supermarkets (household shopping)
    merchant("tesco", "Tesco", "Drawings", "Supermarket", "zero_rated", &[]),
    merchant("dunnes", "Dunnes Stores", "Drawings", "Supermarket", "zero_rated", &[]),
    merchant("supervalu", "SuperValu", "Drawings", "Supermarket", "zero_rated", &["super valu"]),
    merchant("lidl", "Lidl", "Drawings", "Supermarket", "zero_rated", &[]),
    merchant("aldi", "Aldi", "Drawings", "Supermarket", "zero_rated", &[]),
    // Telecoms and utilities
    merchant("vodafone", "Vodafone", "Telephone", "Mobile Operator", "standard_23", &[]),
    merchant("eircom", "eir", "Telephone", "Telecoms", "standard_23", &["eir mobile", "eir broadband", "eir bill"]),
    merchant("three mobile", "Three", "Telephone", "Mobile Operator", "standard_23", &["3 mobile", "three"]),
    merchant("electric ireland", "Electric Ireland", "Utilities", "Energy Supplier", "reduced_13_5", &["electricireland", "elec irl", "electric"]),
    merchant("bord gais", "Bord Gais Energy", "Utilities", "Energy Supplier", "reduced_13_5", &["bordgais"]),
    merchant("airtricity", "SSE Airtricity", "Utilities", "Energy Supplier", "reduced_13_5", &[]),
    merchant("uisce eireann", "Uisce Eireann", "Utilities", "Water Utility", "exempt", &["irish water"]),
    // Software and advertising
    merchant("google ads", "Google Ads", "Advertising", "Online Advertising", "standard_23", &["adwords"]),
    merchant("facebook", "Meta", "Advertising", "Online Advertising", "standard_23", &["facebk", "meta ads"]),
    merchant("google", "Google", "Software", "Software Subscription", "standard_23", &["gsuite"]),
    merchant("microsoft", "Microsoft", "Software", "Software Subscription", "standard_23", &["msft", "office 365"]),
    merchant("adobe", "Adobe", "Software", "Software Subscription", "standard_23", &[]),
    merchant("xero", "Xero", "Software", "Accounting Software", "standard_23", &[]),
    // Office, equipment and post
    merchant("an post", "An Post", "Office", "Postal Service", "exempt", &["anpost"]),
    merchant("amazon", "Amazon", "Office", "Online Retailer", "standard_23", &["amzn"]),
    merchant("harvey norman", "Harvey Norman", "Equipment", "Electronics Retailer", "standard_23", &[]),
    merchant("currys", "Currys", "Equipment", "Electronics Retailer", "standard_23", &["pc world"]),
    // Insurance, tax and bank
    merchant("fbd", "FBD Insurance", "Insurance", "Insurer", "exempt", &[]),
    merchant("zurich", "Zurich", "Insurance", "Insurer", "exempt", &[]),
    merchant("allianz", "Allianz", "Insurance", "Insurer", "exempt", &[]),
    merchant("aviva", "Aviva", "Insurance", "Insurer", "exempt", &[]),
    merchant("revenue", "Revenue Commissioners", "Tax Payment", "Government", "exempt", &["rev comm", "collector general"]),
    merchant("bank charge", "Bank Charges", "Bank Charges", "Bank", "exempt", &["bank fee", "account fee", "service charge", "quarterly fee"]),
];

/// Case-insensitive lookup by primary key or canonical name
pub fn find_merchant(name: &str) -> Option<&'static KnownMerchant> {
    let name = name.trim();
    KNOWN_MERCHANTS
        .iter()
        .find(|m| m.key.eq_ignore_ascii_case(name) || m.canonical_name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique_and_lowercase() {
        let mut seen = HashSet::new();
        for m in KNOWN_MERCHANTS {
            assert!(seen.insert(m.key), "duplicate key {}", m.key);
            assert_eq!(m.key, m.key.to_lowercase());
            for k in m.keywords {
                assert_eq!(*k, k.to_lowercase(), "keyword {k} must be lowercase");
            }
        }
    }

    #[test]
    fn test_specific_before_generic() {
        let pos = |key: &str| KNOWN_MERCHANTS.iter().position(|m| m.key == key).unwrap();
        assert!(pos("google ads") < pos("google"));
    }

    #[test]
    fn test_find_merchant() {
        assert_eq!(find_merchant("CHADWICKS").unwrap().category, "Materials");
        assert_eq!(find_merchant("Circle K").unwrap().canonical_name, "Circle K");
        assert!(find_merchant("nobody").is_none());
    }
}
