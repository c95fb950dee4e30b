//! Vendor name recovery from raw bank-statement descriptions.
//!
//! Irish bank exports prefix descriptions with a transaction-type code and
//! pad them with card/account references, dates and IBANs:
//!   VDP-CHADWICKS DUBLIN 12345678 01/06/2024
//!   FPO J MURPHY IE29AIBK9311AB5212

use std::sync::OnceLock;

use regex::Regex;
use tally_core::text::collapse_whitespace;

/// Words kept from the cleaned description
const MAX_VENDOR_WORDS: usize = 3;

fn type_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:VDP-|VDC-|VDA-|POS |DD |D/D |STO |BGC |TFR |FPI |FPO |CHQ )")
            .expect("invalid type prefix regex")
    })
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{6,}").expect("invalid digit run regex"))
}

fn date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\s\d{2}/\d{2}/(?:\d{4}|\d{2})").expect("invalid date regex")
    })
}

fn iban_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s[A-Z]{2}\d{2}[A-Z0-9]{10,}").expect("invalid iban regex")
    })
}

/// Strip statement noise from a raw description, keeping at most three words.
///
/// Digit runs are removed before IBANs, so an IBAN whose tail is a long digit
/// run loses only that tail ("PAYMENT IE29AIBK93115212345678" -> "PAYMENT IE29AIBK").
pub fn extract_vendor_name(raw_description: &str) -> String {
    let text = raw_description.trim();
    let text = type_prefix_re().replace(text, "");
    let text = digit_run_re().replace_all(&text, "");
    let text = date_re().replace_all(&text, "");
    let text = iban_re().replace_all(&text, "");
    let text = collapse_whitespace(&text);

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_VENDOR_WORDS {
        words[..MAX_VENDOR_WORDS].join(" ")
    } else {
        text
    }
}
