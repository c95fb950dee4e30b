//! Match a (vendor-normalised) description against the known-merchant table,
//! falling back to a tidy title-cased name.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tally_core::text::{capitalize, collapse_whitespace};

use crate::merchants::{KNOWN_MERCHANTS, KnownMerchant};

/// Leading payment-channel words, each stripped at most once, in this order
const LEADING_NOISE: [&str; 5] = ["pos ", "card ", "debit ", "credit ", "payment to "];

/// Words kept for the fallback name
const MAX_NAME_WORDS: usize = 3;

fn trailing_country_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\b(?:ie|ireland)\s*$").expect("invalid country regex"))
}

fn dublin_district_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bdublin\s*\d*").expect("invalid dublin regex"))
}

fn full_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("invalid date regex"))
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("invalid punctuation regex"))
}

/// Result of merchant matching
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MerchantMatch {
    /// Canonical merchant name, or a title-cased fallback
    pub clean_name: String,
    pub matched_merchant: Option<&'static KnownMerchant>,
}

/// Lowercased description with channel words, country suffix, Dublin
/// districts, dates and punctuation removed.
pub fn clean_description(description: &str) -> String {
    let mut text = description.to_lowercase();
    for prefix in LEADING_NOISE {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start().to_string();
        }
    }

    let text = trailing_country_re().replace(&text, "");
    let text = dublin_district_re().replace_all(&text, "");
    let text = full_date_re().replace_all(&text, "");
    let text = punctuation_re().replace_all(&text, " ");
    collapse_whitespace(&text)
}

/// First known merchant whose key or keyword appears in already-cleaned text
pub fn match_known_merchant(cleaned: &str) -> Option<&'static KnownMerchant> {
    KNOWN_MERCHANTS.iter().find(|m| {
        cleaned.contains(m.key) || m.keywords.iter().any(|k| cleaned.contains(k))
    })
}

/// Identify the merchant behind a description.
///
/// Never fails: unknown merchants get up to three title-cased words of the
/// cleaned text, or the original description if nothing usable remains.
pub fn extract_merchant_name(description: &str) -> MerchantMatch {
    let cleaned = clean_description(description);

    if let Some(merchant) = match_known_merchant(&cleaned) {
        return MerchantMatch {
            clean_name: merchant.canonical_name.to_string(),
            matched_merchant: Some(merchant),
        };
    }

    let fallback = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .take(MAX_NAME_WORDS)
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    MerchantMatch {
        clean_name: if fallback.is_empty() {
            description.to_string()
        } else {
            fallback
        },
        matched_merchant: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match() {
        let m = extract_merchant_name("CHADWICK BUILDERS MERCHANTS");
        assert_eq!(m.clean_name, "Chadwicks");
        assert_eq!(m.matched_merchant.unwrap().category, "Materials");
    }

    #[test]
    fn test_noise_stripped_before_matching() {
        assert_eq!(
            clean_description("POS CARD Circle-K Dublin 12 03/04/2024 ie"),
            "circle k"
        );
        let m = extract_merchant_name("POS Circle-K Dublin 12");
        assert_eq!(m.matched_merchant.unwrap().canonical_name, "Circle K");
    }

    #[test]
    fn test_first_match_wins() {
        let m = extract_merchant_name("GOOGLE ADS 4421");
        assert_eq!(m.matched_merchant.unwrap().category, "Advertising");
        let m = extract_merchant_name("GOOGLE WORKSPACE");
        assert_eq!(m.matched_merchant.unwrap().category, "Software");
    }

    #[test]
    fn test_irish_suffix_does_not_hide_merchant() {
        let m = extract_merchant_name("ELECTRIC IRELAND");
        assert_eq!(m.matched_merchant.unwrap().category, "Utilities");
        let m = extract_merchant_name("THREE IE");
        assert_eq!(m.matched_merchant.unwrap().canonical_name, "Three");
    }

    #[test]
    fn test_every_merchant_reachable() {
        for merchant in KNOWN_MERCHANTS {
            let key = merchant.key.to_uppercase();
            for text in [key.clone(), format!("DD {key} IRELAND"), format!("{key} IE")] {
                let found = extract_merchant_name(&text).matched_merchant.map(|m| m.key);
                assert_eq!(found, Some(merchant.key), "{text}");
            }
        }
    }

    #[test]
    fn test_fallback_title_case() {
        let m = extract_merchant_name("payment to j murphy plastering ltd");
        assert!(m.matched_merchant.is_none());
        // single-letter "j" dropped, three words kept
        assert_eq!(m.clean_name, "Murphy Plastering Ltd");
    }

    #[test]
    fn test_fallback_to_original_when_nothing_left() {
        let m = extract_merchant_name("**");
        assert_eq!(m.clean_name, "**");
        assert!(m.matched_merchant.is_none());
        assert_eq!(extract_merchant_name("").clean_name, "");
    }
}
