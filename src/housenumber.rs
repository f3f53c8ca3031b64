//! Fuzzy housenumber index variants.
//!
//! At ingest time every raw housenumber is expanded into the set of
//! normalized spellings a query term should match: case-folded latin
//! letter suffixes, spaced and unspaced letter boundaries, slash
//! compounds, and localized block/building abbreviations. The variants
//! are stored on the document and matched verbatim at query time.
//!
//! Implemented as a small ordered set of pattern rules evaluated
//! against the input, so each rule stays independently testable.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Recognized abbreviation families: full word, standard abbreviation,
/// one-letter code.
const ABBREVIATIONS: &[(&str, &str, &str)] = &[
    // "building"
    ("строение", "стр", "с"),
    // "korpus" (block)
    ("корпус", "корп", "к"),
];

/// Digits with a letter suffix, possibly separated by a space or
/// hyphen: "15A", "15-a", "15 a".
static LETTER_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)[ -]?([a-zа-я])$").unwrap());

/// Number, abbreviation spelling (any recognized form, optional
/// trailing period, optional intervening spaces), trailing sub-index:
/// "15 строение1a", "15 стр.1б", "15к1".
static ABBREVIATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+[a-zа-я]?) ?(строение|стр|корпус|корп|с|к)\.? ?(\d[0-9a-zа-я]*)$")
        .unwrap()
});

/// Slash-separated compound: "15/123"
static SLASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^/\s]+)/(\S+)$").unwrap());

/// Leading non-numeric prefix token such as "д." ("house") before the
/// housenumber proper
static PREFIXED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\d\s/]{1,4}\.?) ?(\d.*)$").unwrap());

/// Every normalized spelling of `raw` that should match the same query
/// term.
///
/// Pure and referentially transparent: identical input always yields
/// an identical set. Empty input yields an empty set; a bare number
/// yields only itself.
pub fn variants(raw: &str) -> HashSet<String> {
    let mut out = HashSet::new();

    let raw = raw.trim();
    if raw.is_empty() {
        return out;
    }

    out.insert(raw.to_string());
    expand(raw, &mut out);
    out
}

fn expand(raw: &str, out: &mut HashSet<String>) {
    if let Some(caps) = LETTER_SUFFIX.captures(raw) {
        suffix_variants(&caps[1], &caps[2], out);
    }

    if let Some(caps) = ABBREVIATED.captures(raw) {
        abbreviated_variants(&caps[1], &caps[2], &caps[3], out);
    }

    if let Some(caps) = SLASH.captures(raw) {
        let prefix = caps.get(1).unwrap().as_str();
        out.insert(prefix.to_string());
        if let Some(caps) = LETTER_SUFFIX.captures(prefix) {
            suffix_variants(&caps[1], &caps[2], out);
        }
    }

    if let Some(caps) = PREFIXED.captures(raw) {
        // index the numeric part as if the prefix were absent
        let rest = caps.get(2).unwrap().as_str();
        out.insert(rest.to_string());
        expand(rest, out);
    }
}

/// Spaced and unspaced spellings of a digits+letter boundary, with the
/// letter case-folded.
fn suffix_variants(digits: &str, letter: &str, out: &mut HashSet<String>) {
    let lower = letter.to_lowercase();
    out.insert(format!("{digits}{letter}"));
    out.insert(format!("{digits}{lower}"));
    out.insert(format!("{digits} {letter}"));
    out.insert(format!("{digits} {lower}"));
}

/// Normalization targets for a number + abbreviation + sub-index
/// compound. The bare number+letter concatenation without the
/// sub-index is never produced; without a sub-index the abbreviated
/// forms are meaningless.
fn abbreviated_variants(num: &str, abbr: &str, sub: &str, out: &mut HashSet<String>) {
    let abbr = abbr.to_lowercase();
    let Some((full, _, letter)) = ABBREVIATIONS
        .iter()
        .find(|(full, short, letter)| abbr == *full || abbr == *short || abbr == *letter)
    else {
        return;
    };

    let num = num.to_lowercase();
    let sub = sub.to_lowercase();

    // abbreviation spelled out and spaced
    out.insert(format!("{num} {full} {sub}"));
    // shortest one-letter code, spaced and unspaced
    out.insert(format!("{num} {letter}{sub}"));
    out.insert(format!("{num}{letter}{sub}"));
    // abbreviation omitted, separating space retained
    out.insert(format!("{num} {sub}"));

    // the numeric part alone still gets its letter-suffix variants
    if let Some(caps) = LETTER_SUFFIX.captures(&num) {
        suffix_variants(&caps[1], &caps[2], out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(variants("").is_empty());
        assert!(variants("   ").is_empty());
    }

    #[test]
    fn test_bare_number() {
        let set = variants("123");
        assert_eq!(set.len(), 1);
        assert!(set.contains("123"));
    }

    #[test]
    fn test_number_and_letter() {
        let set = variants("15A");

        assert!(set.contains("15A"));
        assert!(set.contains("15a"));
    }

    #[test]
    fn test_number_with_slash() {
        let set = variants("15/123");
        assert!(set.contains("15/123"));
        assert!(set.contains("15"));

        let set = variants("15A/123");
        assert!(set.contains("15A/123"));
        assert!(set.contains("15a"));
    }

    #[test]
    fn test_number_and_letter_with_suffix() {
        let set = variants("15Aк1");
        assert!(set.contains("15Aк1"));
        assert!(set.contains("15a"));
        assert!(set.contains("15a к1"));

        let set = variants("15 строение1a");
        assert!(set.contains("15 строение 1a"));
        assert!(set.contains("15 строение1a"));
        assert!(set.contains("15 с1a"));
        assert!(set.contains("15с1a"));
        assert!(set.contains("15 1a"));
        assert!(!set.contains("15с"));

        let set = variants("15 стр.1б");
        assert!(set.contains("15 стр.1б"));
        assert!(set.contains("15 с1б"));
        assert!(set.contains("15с1б"));
        assert!(!set.contains("15с"));

        let set = variants("15к1");
        assert!(set.contains("15к1"));
        assert!(set.contains("15 к1"));
        assert!(!set.contains("15к"));
    }

    #[test]
    fn test_korpus_spelled_out() {
        let set = variants("15 корпус 2");
        assert!(set.contains("15 корпус 2"));
        assert!(set.contains("15 к2"));
        assert!(set.contains("15к2"));
        assert!(set.contains("15 2"));
    }

    #[test]
    fn test_leading_house_prefix() {
        let set = variants("д. 15-a");

        assert!(set.contains("д. 15-a"));
        assert!(set.contains("15a"));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(variants("15 строение1a"), variants("15 строение1a"));
    }
}
