//! Comparison of the people read on a sheet with a known roster.
//!
//! Names are compared token by token, so that `MEIER Anna` and `Anna Meier`
//! are the same person. Every pair of entries above the threshold is a
//! candidate, and the candidates are assigned greedily from the best score
//! down.

use log::debug;
use std::collections::HashSet;
use strsim::jaro_winkler;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::{ParsedOfficial, ParsedPlayer, DEFAULT_MATCH_THRESHOLD};

/// The score of an initial against a name that starts with the same letter.
const INITIAL_SCORE: f64 = 0.9;

/// A person of the known roster.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RosterEntry {
    pub id: String,
    pub display_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl RosterEntry {
    pub fn new(id: &str, display_name: &str) -> RosterEntry {
        RosterEntry {
            id: id.to_string(),
            display_name: display_name.to_string(),
            first_name: None,
            last_name: None,
        }
    }
}

/// Anything that has a name to compare.
pub trait NamedPerson {
    fn compared_name(&self) -> String;
}

impl NamedPerson for ParsedPlayer {
    fn compared_name(&self) -> String {
        self.display_name.clone()
    }
}

impl NamedPerson for ParsedOfficial {
    fn compared_name(&self) -> String {
        self.display_name.clone()
    }
}

impl NamedPerson for RosterEntry {
    /// The display name, or the first and last names when it is missing.
    fn compared_name(&self) -> String {
        if !self.display_name.trim().is_empty() {
            return self.display_name.clone();
        }
        let parts: Vec<&str> = self
            .first_name
            .iter()
            .chain(self.last_name.iter())
            .map(|p| p.as_str())
            .collect();
        parts.join(" ")
    }
}

/// The outcome of the comparison for one OCR entry or one roster entry.
#[derive(PartialEq, Debug, Clone)]
pub enum ComparisonResult<'a, T> {
    Match {
        ocr: &'a T,
        roster_id: String,
        confidence: f64,
    },
    /// The confidence is the best score reached against the roster.
    OcrOnly { ocr: &'a T, confidence: f64 },
    /// The confidence is the best score reached against the OCR entries.
    RosterOnly { roster_id: String, confidence: f64 },
}

impl<'a, T> ComparisonResult<'a, T> {
    pub fn status(&self) -> &'static str {
        match self {
            ComparisonResult::Match { .. } => "match",
            ComparisonResult::OcrOnly { .. } => "ocr-only",
            ComparisonResult::RosterOnly { .. } => "roster-only",
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            ComparisonResult::Match { confidence, .. }
            | ComparisonResult::OcrOnly { confidence, .. }
            | ComparisonResult::RosterOnly { confidence, .. } => *confidence,
        }
    }

    pub fn ocr(&self) -> Option<&'a T> {
        match self {
            ComparisonResult::Match { ocr, .. } | ComparisonResult::OcrOnly { ocr, .. } => {
                Some(*ocr)
            }
            ComparisonResult::RosterOnly { .. } => None,
        }
    }

    pub fn roster_id(&self) -> Option<&str> {
        match self {
            ComparisonResult::Match { roster_id, .. }
            | ComparisonResult::RosterOnly { roster_id, .. } => Some(roster_id.as_str()),
            ComparisonResult::OcrOnly { .. } => None,
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct CompareOptions {
    /// Minimal similarity, between 0 and 1, for two names to match.
    pub threshold: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

/// The count of each status.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ComparisonSummary {
    pub matched: usize,
    pub ocr_only: usize,
    pub roster_only: usize,
}

pub fn summarize<T>(results: &[ComparisonResult<T>]) -> ComparisonSummary {
    let mut s = ComparisonSummary::default();
    for r in results.iter() {
        match r {
            ComparisonResult::Match { .. } => s.matched += 1,
            ComparisonResult::OcrOnly { .. } => s.ocr_only += 1,
            ComparisonResult::RosterOnly { .. } => s.roster_only += 1,
        }
    }
    s
}

/// Lowercase tokens, without the accents.
fn tokenize(name: &str) -> Vec<String> {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| !tok.is_empty())
        .map(|tok| tok.to_string())
        .collect()
}

fn token_score(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let is_initial_of =
        |short: &str, long: &str| short.chars().count() == 1 && long.starts_with(short);
    if is_initial_of(a, b) || is_initial_of(b, a) {
        return INITIAL_SCORE;
    }
    jaro_winkler(a, b)
}

/// Average, over the tokens of `from`, of their best score in `to`.
fn directed_score(from: &[String], to: &[String]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|f| to.iter().map(|t| token_score(f, t)).fold(0.0, f64::max))
        .sum();
    total / (from.len() as f64)
}

/// The similarity of two names, between 0 and 1.
///
/// It does not depend on the case, the accents or the order of the first and
/// last names, and `name_similarity(a, b) == name_similarity(b, a)`.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    let ta = tokenize(a);
    let tb = tokenize(b);
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    (directed_score(&ta, &tb) + directed_score(&tb, &ta)) / 2.0
}

/// Compares the entries read on the sheet with the known roster.
///
/// The results list the OCR entries in their order (matched or not), followed
/// by the roster entries that were not matched, in roster order. Each roster
/// id is used by at most one match. When several pairs compete, the highest
/// score wins, then the earliest roster entry.
pub fn compare_rosters<'a, T: NamedPerson>(
    ocr: &'a [T],
    roster: &[RosterEntry],
    options: &CompareOptions,
) -> Vec<ComparisonResult<'a, T>> {
    let ocr_names: Vec<String> = ocr.iter().map(|o| o.compared_name()).collect();
    let roster_names: Vec<String> = roster.iter().map(|r| r.compared_name()).collect();

    // scores[oi][ri]
    let scores: Vec<Vec<f64>> = ocr_names
        .iter()
        .map(|o| roster_names.iter().map(|r| name_similarity(o, r)).collect())
        .collect();

    let mut candidates: Vec<(f64, usize, usize)> = Vec::new();
    for (oi, row) in scores.iter().enumerate() {
        for (ri, score) in row.iter().enumerate() {
            if *score >= options.threshold {
                candidates.push((*score, ri, oi));
            }
        }
    }
    candidates.sort_by(|x, y| {
        y.0.total_cmp(&x.0)
            .then(x.1.cmp(&y.1))
            .then(x.2.cmp(&y.2))
    });

    let mut assigned: Vec<Option<(usize, f64)>> = vec![None; ocr.len()];
    let mut roster_used: Vec<bool> = vec![false; roster.len()];
    let mut ids_used: HashSet<&str> = HashSet::new();
    for (score, ri, oi) in candidates.into_iter() {
        let id = roster[ri].id.as_str();
        if assigned[oi].is_some() || roster_used[ri] || ids_used.contains(id) {
            continue;
        }
        debug!(
            "compare_rosters: {:?} -> {:?} ({:.3})",
            ocr_names[oi], roster[ri].id, score
        );
        assigned[oi] = Some((ri, score));
        roster_used[ri] = true;
        ids_used.insert(id);
    }

    let mut res: Vec<ComparisonResult<'a, T>> = Vec::new();
    for (oi, entry) in ocr.iter().enumerate() {
        match assigned[oi] {
            Some((ri, confidence)) => res.push(ComparisonResult::Match {
                ocr: entry,
                roster_id: roster[ri].id.clone(),
                confidence,
            }),
            None => {
                let best = scores[oi].iter().cloned().fold(0.0, f64::max);
                res.push(ComparisonResult::OcrOnly {
                    ocr: entry,
                    confidence: best,
                });
            }
        }
    }
    for (ri, r) in roster.iter().enumerate() {
        if roster_used[ri] {
            continue;
        }
        let best = scores.iter().map(|row| row[ri]).fold(0.0, f64::max);
        res.push(ComparisonResult::RosterOnly {
            roster_id: r.id.clone(),
            confidence: best,
        });
    }
    res
}
