//! Place-name detection in addresses and bank-statement descriptions.
//!
//! The dictionary maps lowercase keys (town names plus a few abbreviations
//! seen on Irish statements) to canonical town names. Matching tries the
//! longest keys first so "carrickmacross" wins over "carrick".

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::error::DictionaryError;
use crate::text::{capitalize, contains_word, normalize_text};
use crate::towns::{Town, TOWNS, canonical_county};

/// Extra keys for names the town list cannot produce on its own:
/// hyphenated towns after normalisation, short forms and Irish-language names.
/// Never overrides a key derived from a town name.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("dub", "Dublin"),
    ("baile atha cliath", "Dublin"),
    ("dunlaoghaire", "Dun Laoghaire"),
    ("dun laoire", "Dun Laoghaire"),
    ("blanch", "Blanchardstown"),
    ("carrick on shannon", "Carrick-on-Shannon"),
    ("carrick", "Carrick-on-Shannon"),
    ("carrick on suir", "Carrick-on-Suir"),
    ("droichead nua", "Newbridge"),
    ("corcaigh", "Cork"),
    ("gaillimh", "Galway"),
    ("luimneach", "Limerick"),
    ("port lairge", "Waterford"),
    ("cill airne", "Killarney"),
];

fn port_of_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bport of ([a-z0-9]+)").expect("invalid port-of regex"))
}

fn dublin_postcode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\bd(?:0[1-9]|1[0-9]|2[0-4]|6w)\b").expect("invalid postcode regex")
    })
}

fn county_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bco\.?\s+(\w+)").expect("invalid co. regex"))
}

fn county_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bcounty\s+(\w+)").expect("invalid county regex"))
}

/// Lowercase key -> canonical town name, plus town -> county.
#[derive(Debug, Clone)]
pub struct LocationDictionary {
    keys: HashMap<String, &'static str>,
    /// Same keys, longest first (ties alphabetical) for deterministic matching
    ordered: Vec<(String, &'static str)>,
    counties: HashMap<String, &'static str>,
}

impl LocationDictionary {
    /// Build a dictionary from a town table.
    ///
    /// Fails if the table has duplicate (name, county) pairs, a county outside
    /// the 26, or anything other than exactly one town at distance 0.
    pub fn build(towns: &[Town]) -> Result<Self, DictionaryError> {
        let mut seen = HashSet::new();
        let mut capitals = 0;
        for t in towns {
            if !seen.insert((t.name.to_lowercase(), t.county.to_lowercase())) {
                return Err(DictionaryError::DuplicateTown {
                    name: t.name.to_string(),
                    county: t.county.to_string(),
                });
            }
            if canonical_county(t.county).is_none() {
                return Err(DictionaryError::UnknownCounty {
                    name: t.name.to_string(),
                    county: t.county.to_string(),
                });
            }
            if t.distance_from_dublin == 0 {
                capitals += 1;
            }
        }
        if capitals != 1 {
            return Err(DictionaryError::CapitalCount(capitals));
        }

        let mut keys: HashMap<String, &'static str> = HashMap::new();
        let mut counties: HashMap<String, &'static str> = HashMap::new();
        for t in towns {
            let key = t.name.to_lowercase();
            keys.entry(key.clone()).or_insert(t.name);
            counties.entry(key).or_insert(t.county);
        }

        for (abbr, target) in ABBREVIATIONS {
            // Only point at towns this table actually has
            let Some(canonical) = keys.get(&target.to_lowercase()).copied() else {
                continue;
            };
            keys.entry(abbr.to_string()).or_insert(canonical);
        }

        let mut ordered: Vec<(String, &'static str)> =
            keys.iter().map(|(k, v)| (k.clone(), *v)).collect();
        ordered.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        debug!(towns = towns.len(), keys = ordered.len(), "built location dictionary");

        Ok(Self {
            keys,
            ordered,
            counties,
        })
    }

    /// Dictionary over the built-in town table, built on first use.
    ///
    /// Panics on first use if the built-in table is inconsistent.
    pub fn builtin() -> &'static LocationDictionary {
        static DICT: OnceLock<LocationDictionary> = OnceLock::new();
        DICT.get_or_init(|| match LocationDictionary::build(TOWNS) {
            Ok(dict) => dict,
            Err(e) => panic!("built-in town table is inconsistent: {e}"),
        })
    }

    /// Canonical name for an exact (case-insensitive) key
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.keys.get(&key.trim().to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// County of a canonical town name (case-insensitive)
    pub fn county_of(&self, town: &str) -> Option<&'static str> {
        self.counties.get(&town.trim().to_lowercase()).copied()
    }

    /// Find a place mentioned anywhere in free text.
    ///
    /// Order: whole-word dictionary keys (longest first), then "port of <key>",
    /// then a Dublin postal district (D01-D24, D6W).
    pub fn extract_location(&self, text: &str) -> Option<&'static str> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return None;
        }

        for (key, canonical) in &self.ordered {
            if contains_word(&normalized, key) {
                return Some(*canonical);
            }
        }

        // Never fires today: any key captured here already matched as a whole
        // word above. Kept as the documented fallback form.
        if let Some(caps) = port_of_re().captures(&normalized) {
            if let Some(canonical) = self.keys.get(&caps[1]).copied() {
                return Some(canonical);
            }
        }

        if dublin_postcode_re().is_match(&normalized) {
            return self.keys.get("dublin").copied();
        }

        None
    }

    /// Home base from a primary address, falling back to a second address
    pub fn base_location(
        &self,
        primary: Option<&str>,
        fallback: Option<&str>,
    ) -> Option<&'static str> {
        primary
            .and_then(|a| self.extract_location(a))
            .or_else(|| fallback.and_then(|a| self.extract_location(a)))
    }

    /// County named in an address ("Co. Cork", "County Kerry"), else the county
    /// of the first town found in it.
    pub fn county_from_address(&self, address: &str) -> Option<&'static str> {
        for re in [county_prefix_re(), county_word_re()] {
            if let Some(caps) = re.captures(address) {
                if let Some(county) = canonical_county(&capitalize(&caps[1])) {
                    return Some(county);
                }
            }
        }

        self.base_location(Some(address), None)
            .and_then(|town| self.county_of(town))
    }
}

/// Find a place mentioned in `text` using `dictionary`
pub fn extract_location_from_text(text: &str, dictionary: &LocationDictionary) -> Option<&'static str> {
    dictionary.extract_location(text)
}

/// Home base of a business from its addresses (built-in dictionary)
pub fn extract_base_location(primary: Option<&str>, fallback: Option<&str>) -> Option<&'static str> {
    LocationDictionary::builtin().base_location(primary, fallback)
}

/// County of an address (built-in dictionary)
pub fn extract_county_from_address(address: &str) -> Option<&'static str> {
    LocationDictionary::builtin().county_from_address(address)
}

/// Place mentioned in a bank-statement description (built-in dictionary)
pub fn detect_transaction_location(description: &str) -> Option<&'static str> {
    LocationDictionary::builtin().extract_location(description)
}
