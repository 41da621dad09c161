//! Heuristics to split fields that the OCR engine read without any separator.
//!
//! None of them is lossless. They split as well as they can and never fail.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::MIN_NAME_LENGTH;

lazy_static! {
    static ref DATE_LONG_YEAR: Regex =
        Regex::new(r"^(\d{1,2})[./](\d{1,2})[./]((?:19|20)\d{2})").unwrap();
    static ref DATE_SHORT_YEAR: Regex = Regex::new(r"^(\d{1,2})[./](\d{1,2})[./](\d{2})").unwrap();
}

/// Splits names that were glued together, such as `S. AngeliL. Collier` or
/// `SuterAnna`.
///
/// A new name starts at every uppercase letter that directly follows a
/// lowercase letter. Fragments shorter than two characters are dropped.
pub fn split_concatenated_names(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut fragments: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            // Covers both `AngeliL.` (initial with a dot) and `SuterAnna`.
            if p.is_lowercase() && c.is_uppercase() {
                fragments.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        prev = Some(c);
    }
    fragments.push(current);

    fragments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| s.chars().count() >= MIN_NAME_LENGTH)
        .collect()
}

fn valid_day_month(day: &str, month: &str) -> bool {
    match (day.parse::<u32>(), month.parse::<u32>()) {
        (Ok(d), Ok(m)) => (1..=31).contains(&d) && (1..=12).contains(&m),
        _ => false,
    }
}

fn match_date_at(rest: &str) -> Option<usize> {
    for re in [&*DATE_LONG_YEAR, &*DATE_SHORT_YEAR] {
        if let Some(caps) = re.captures(rest) {
            if valid_day_month(&caps[1], &caps[2]) {
                return caps.get(0).map(|m| m.end());
            }
        }
    }
    None
}

/// Extracts the dates of a string in which several dates were glued together,
/// such as `20.2.9721.1.97`.
///
/// The scan moves left to right. At every position, a date with a four-digit
/// year is tried first, then a date with a two-digit year. Without a match the
/// scan moves by one character. The scan never goes back.
pub fn split_concatenated_dates(text: &str) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    let mut pos: usize = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if let Some(len) = match_date_at(rest) {
            res.push(rest[..len].to_string());
            pos += len;
        } else {
            // Moves to the next character boundary.
            let step = rest.chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            pos += step;
        }
    }
    res
}

/// Extracts jersey numbers from a run of digits, such as `71214`.
///
/// When `expected_count` is given, the grouping is chosen so that the digits
/// can still make up that many numbers. Without it, single digits are
/// preferred and a pair is only formed when the next digit is a zero.
///
/// The boundaries of a run of digits are ambiguous: `1213` can be `12, 13` or
/// `1, 2, 1, 3`. Ties go to single digits, as most jersey numbers are low.
pub fn split_concatenated_numbers(text: &str, expected_count: Option<usize>) -> Vec<u8> {
    let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(10)).collect();
    let mut res: Vec<u8> = Vec::new();
    let mut idx: usize = 0;
    while idx < digits.len() {
        let remaining = digits.len() - idx;
        let d = digits[idx];
        let next = digits.get(idx + 1).cloned();

        if let Some(expected) = expected_count {
            if res.len() >= expected {
                debug!(
                    "split_concatenated_numbers: dropping {:?} extra digits",
                    remaining
                );
                break;
            }
        }

        // A number does not start with a zero.
        if d == 0 {
            idx += 1;
            continue;
        }

        let take_pair = match (next, expected_count) {
            (None, _) => false,
            // The zero alone would not be a valid number.
            (Some(0), _) => true,
            (Some(_), Some(expected)) => {
                let needed = expected - res.len();
                // After a single digit, the rest must fit in the remaining
                // numbers of at most two digits each.
                remaining - 1 > 2 * (needed - 1)
            }
            (Some(_), None) => false,
        };

        if let (true, Some(n)) = (take_pair, next) {
            res.push((d * 10 + n) as u8);
            idx += 2;
        } else {
            res.push(d as u8);
            idx += 1;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_with_initials() {
        assert_eq!(
            split_concatenated_names("S. AngeliL. CollierO. Follouier"),
            vec!["S. Angeli", "L. Collier", "O. Follouier"]
        );
    }

    #[test]
    fn names_without_dots() {
        assert_eq!(split_concatenated_names("SuterAnna"), vec!["Suter", "Anna"]);
        assert_eq!(split_concatenated_names("Anna Suter"), vec!["Anna Suter"]);
    }

    #[test]
    fn names_empty_and_short() {
        assert!(split_concatenated_names("").is_empty());
        assert!(split_concatenated_names("   ").is_empty());
        assert_eq!(split_concatenated_names("aB. Meier"), vec!["B. Meier"]);
    }

    #[test]
    fn dates_two_digit_years() {
        assert_eq!(
            split_concatenated_dates("20.2.9721.1.9713.1.97"),
            vec!["20.2.97", "21.1.97", "13.1.97"]
        );
    }

    #[test]
    fn dates_four_digit_years_and_noise() {
        assert_eq!(
            split_concatenated_dates("x3.4.1998 / 12.11.2001;"),
            vec!["3.4.1998", "12.11.2001"]
        );
        assert!(split_concatenated_dates("no dates here").is_empty());
        assert!(split_concatenated_dates("").is_empty());
        assert!(split_concatenated_dates("99.99.99").is_empty());
    }

    #[test]
    fn dates_with_multibyte_characters() {
        assert_eq!(split_concatenated_dates("é1.1.99ü"), vec!["1.1.99"]);
    }

    #[test]
    fn numbers_without_hint() {
        assert_eq!(split_concatenated_numbers("123", None), vec![1, 2, 3]);
        assert_eq!(split_concatenated_numbers("1012", None), vec![10, 1, 2]);
        assert_eq!(split_concatenated_numbers("05", None), vec![5]);
        assert!(split_concatenated_numbers("abc", None).is_empty());
    }

    #[test]
    fn numbers_with_expected_count() {
        assert_eq!(split_concatenated_numbers("1234", Some(2)), vec![12, 34]);
        assert_eq!(split_concatenated_numbers("123", Some(2)), vec![1, 23]);
        assert_eq!(split_concatenated_numbers("7 3 14", Some(3)), vec![7, 3, 14]);
        assert_eq!(split_concatenated_numbers("123", Some(3)), vec![1, 2, 3]);
        assert_eq!(split_concatenated_numbers("12345", Some(1)), vec![12]);
    }
}
