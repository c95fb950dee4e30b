//! Text helpers shared by the location, merchant and trip matchers

/// Lowercase, replace anything outside `[a-z0-9 &.]` with a space, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '&' | '.' => c,
            _ => ' ',
        })
        .collect();
    collapse_whitespace(&lowered)
}

/// Collapse runs of whitespace to a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `needle` occurs in `haystack` with a word boundary on both sides.
///
/// Same semantics as a `\b{needle}\b` regex for needles that start and end with
/// word characters; no pattern compilation per lookup.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !is_word_char(c));
        before_ok && after_ok
    })
}

fn ends_word(rest: &str) -> bool {
    rest.chars().next().is_none_or(|c| !is_word_char(c))
}

/// Like [`contains_word`] but also accepts a plural "s"/"es" suffix,
/// so "bank charge" matches "bank charges" and "hotel" matches "hotels.com".
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, matched)| {
        let starts_word = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !is_word_char(c));
        let rest = &haystack[start + matched.len()..];
        starts_word
            && (ends_word(rest)
                || rest.strip_prefix("es").is_some_and(ends_word)
                || rest.strip_prefix('s').is_some_and(ends_word))
    })
}

/// "cARRICK" -> "Carrick"
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  POS CENTRA, Carrick-on-Shannon!! "), "pos centra carrick on shannon");
        assert_eq!(normalize_text("B&B Booking.com"), "b&b booking.com");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_contains_word_respects_boundaries() {
        assert!(contains_word("pos centra carrick", "carrick"));
        assert!(!contains_word("pos centra carrickmacross", "carrick"));
        assert!(!contains_word("dinner for two", "inn"));
        assert!(contains_word("the inn at ballyvaughan", "inn"));
        assert!(contains_word("stay b&b galway", "b&b"));
        assert!(!contains_word("anything", ""));
    }

    #[test]
    fn test_contains_word_finds_later_occurrence() {
        // first hit is inside a word, second is whole
        assert!(contains_word("innisfree inn", "inn"));
    }

    #[test]
    fn test_contains_term_allows_plurals() {
        assert!(contains_term("bank charges q1", "bank charge"));
        assert!(contains_term("hotels.com booking", "hotel"));
        assert!(contains_term("two taxis", "taxi"));
        assert!(!contains_term("business lunch", "bus"));
        assert!(!contains_term("dinner", "inn"));
        assert!(!contains_term("hotelier", "hotel"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cORK"), "Cork");
        assert_eq!(capitalize(""), "");
    }
}
