//! Character substitution tables for common OCR misreads, and the name
//! helpers built on top of them.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::collections::HashMap;

use crate::config::{MAX_SHIRT_NUMBER, MIN_SHIRT_NUMBER};

lazy_static! {
    /// Letters (and a few symbols) that the OCR engine returns in place of digits.
    pub static ref DIGIT_CORRECTIONS: HashMap<char, char> = [
        ('O', '0'),
        ('o', '0'),
        ('Q', '0'),
        ('D', '0'),
        ('I', '1'),
        ('l', '1'),
        ('i', '1'),
        ('|', '1'),
        ('Z', '2'),
        ('z', '2'),
        ('S', '5'),
        ('s', '5'),
        ('G', '6'),
        ('b', '6'),
        ('T', '7'),
        ('B', '8'),
        ('g', '9'),
        ('q', '9'),
    ]
    .into_iter()
    .collect();

    /// Digits (and a few symbols) that the OCR engine returns in place of letters.
    pub static ref LETTER_CORRECTIONS: HashMap<char, char> = [
        ('0', 'O'),
        ('1', 'I'),
        ('2', 'Z'),
        ('5', 'S'),
        ('6', 'G'),
        ('8', 'B'),
        ('@', 'A'),
        ('&', 'A'),
        ('|', 'I'),
        ('$', 'S'),
    ]
    .into_iter()
    .collect();

    static ref SHIRT_NUMBER: Regex = Regex::new(r"^[0-9]{1,2}$").unwrap();
    static ref NAME_SEPARATOR: Regex = Regex::new(r"[\s\-]+").unwrap();
}

fn apply_table(text: &str, table: &HashMap<char, char>) -> String {
    text.chars()
        .map(|c| table.get(&c).cloned().unwrap_or(c))
        .collect()
}

/// Replaces the letters that look like digits.
pub fn correct_digits(text: &str) -> String {
    apply_table(text, &DIGIT_CORRECTIONS)
}

/// Replaces the digits that look like letters.
pub fn correct_letters(text: &str) -> String {
    apply_table(text, &LETTER_CORRECTIONS)
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Cleans up a name as read by the OCR engine.
///
/// Letter corrections are applied first. The name is then split on spaces and
/// hyphens, and the title-cased words are joined with single spaces.
pub fn normalize_name(raw: &str) -> String {
    let corrected = correct_letters(raw).to_lowercase();
    NAME_SEPARATOR
        .split(&corrected)
        .filter(|word| !word.is_empty())
        .map(title_case)
        .collect::<Vec<String>>()
        .join(" ")
}

/// Reads a shirt number, tolerating the usual letter/digit confusions.
///
/// Returns None unless the corrected text is one or two digits between 1 and 99.
pub fn extract_shirt_number(text: &str) -> Option<u8> {
    let corrected = correct_digits(text.trim());
    if !SHIRT_NUMBER.is_match(&corrected) {
        return None;
    }
    let num = corrected.parse::<u8>().ok()?;
    if (MIN_SHIRT_NUMBER..=MAX_SHIRT_NUMBER).contains(&num) {
        Some(num)
    } else {
        debug!("extract_shirt_number: out of range: {:?}", text);
        None
    }
}

/// The name of a person, split in its components.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct NameParts {
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
}

impl NameParts {
    fn new(first_name: String, last_name: String) -> NameParts {
        let display_name = format!("{} {}", first_name, last_name).trim().to_string();
        NameParts {
            first_name,
            last_name,
            display_name,
        }
    }
}

/// Splits a player name written as `LASTNAME Firstname [Middle...]`.
pub fn parse_player_name(raw: &str) -> NameParts {
    let normalized = normalize_name(raw);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [last] => NameParts::new(String::new(), last.to_string()),
        [last, rest @ ..] => NameParts::new(rest.join(" "), last.to_string()),
    }
}

/// Splits an official name written as `Firstname [Middle...] Lastname`.
pub fn parse_official_name(raw: &str) -> NameParts {
    let normalized = normalize_name(raw);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [last] => NameParts::new(String::new(), last.to_string()),
        [rest @ .., last] => NameParts::new(rest.join(" "), last.to_string()),
    }
}

/// Number of letters in a string.
pub(crate) fn letter_count(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shirt_numbers_with_misreads() {
        assert_eq!(extract_shirt_number("7"), Some(7));
        assert_eq!(extract_shirt_number(" 12 "), Some(12));
        assert_eq!(extract_shirt_number("l2"), Some(12));
        assert_eq!(extract_shirt_number("O7"), Some(7));
        assert_eq!(extract_shirt_number("S"), Some(5));
        assert_eq!(extract_shirt_number("1B"), Some(18));
        assert_eq!(extract_shirt_number("0"), None);
        assert_eq!(extract_shirt_number("00"), None);
        assert_eq!(extract_shirt_number("oo"), None);
        assert_eq!(extract_shirt_number("100"), None);
        assert_eq!(extract_shirt_number("A1"), None);
        assert_eq!(extract_shirt_number(""), None);
    }

    #[test]
    fn shirt_numbers_stay_in_range() {
        let alphabet: Vec<char> = "0123456789OoIlZzSsGgBb".chars().collect();
        for a in alphabet.iter() {
            for b in alphabet.iter() {
                for s in [a.to_string(), format!("{}{}", a, b)] {
                    if let Some(n) = extract_shirt_number(&s) {
                        assert!((1..=99).contains(&n), "{:?} -> {}", s, n);
                    }
                }
            }
        }
    }

    #[test]
    fn normalize_title_cases() {
        assert_eq!(normalize_name("MÜLLER ANNA"), "Müller Anna");
        assert_eq!(normalize_name("  de   la  CRUZ "), "De La Cruz");
        assert_eq!(normalize_name("MEIER-MÜLLER lea"), "Meier Müller Lea");
        assert_eq!(normalize_name("keller -  FREI"), "Keller Frei");
        assert_eq!(normalize_name("B0SSHART"), "Bosshart");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["MÜLLER ANNA", "o'brien  KATE", "van der BERG-smit", "S. Angeli"] {
            let once = normalize_name(s);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn player_and_official_name_orders() {
        let p = parse_player_name("LAST First");
        assert_eq!(p.first_name, "First");
        assert_eq!(p.last_name, "Last");
        assert_eq!(p.display_name, "First Last");

        let o = parse_official_name("First Last");
        assert_eq!(o.first_name, "First");
        assert_eq!(o.last_name, "Last");
        assert_eq!(o.display_name, "First Last");
    }

    #[test]
    fn names_with_many_or_few_tokens() {
        let p = parse_player_name("SCHMIDT Lisa Marie");
        assert_eq!(p.last_name, "Schmidt");
        assert_eq!(p.first_name, "Lisa Marie");

        let p = parse_player_name("SCHMIDT");
        assert_eq!(p.last_name, "Schmidt");
        assert_eq!(p.first_name, "");
        assert_eq!(p.display_name, "Schmidt");

        let o = parse_official_name("Hans Peter Meier");
        assert_eq!(o.first_name, "Hans Peter");
        assert_eq!(o.last_name, "Meier");

        assert_eq!(parse_player_name("   "), NameParts::default());
        assert_eq!(parse_official_name(""), NameParts::default());
    }
}
