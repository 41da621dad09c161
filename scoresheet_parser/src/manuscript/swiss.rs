//! The Swiss layout of manuscript sheets.
//!
//! The headers are printed in German, French and Italian, and the two teams
//! share every row of the table: team A on the left half, team B on the right
//! half. The OCR engine separates the cells with tabs, but often glues
//! neighbouring cells together, so most of the work is done by the splitters.

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use super::{make_official, make_player};
use crate::config::*;
use crate::corrections::*;
use crate::splitters::*;

lazy_static! {
    static ref HEADER_PATTERNS: Vec<Regex> = [
        r"(?i)punkte.*points.*punti",
        r"(?i)name.*nom.*nome",
        r"(?i)spieler.*joueurs?.*giocator",
        r"(?i)lizenz.*licence.*licenza",
        r"(?i)mannschaft.*[ée]quipe.*squadra",
        r"(?i)geburtsdatum.*date.*nascita",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
    // `AngeliL. Collier` or `SuterAnna`
    static ref CONCATENATED_NAME: Regex =
        Regex::new(r"\p{Ll}\p{Lu}\.\s?\p{Lu}|\p{Ll}{2}\p{Lu}\p{Ll}{2}").unwrap();
    static ref CLUB_PREFIX: Regex =
        Regex::new(r"\b(?:VBC|VTV|STV|TSV|USC|TV|BC|VC|SC|FC|US)\b").unwrap();
    /// Lines that only carry scores, counters or ruling.
    static ref NOISE_PATTERNS: Vec<Regex> = [
        r"^[\d\s]+$",
        r"^[\d\s.,:;/|_\-+()]+$",
        r"^[\W\d_]*$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();
    static ref TRAILING_NOISE: Regex = Regex::new(r"[\s\d.,:;/|_\-]+$").unwrap();
    static ref LIBERO_MARKER: Regex = Regex::new(r"(?i)\blibero").unwrap();
    static ref OFFICIALS_MARKER: Regex =
        Regex::new(r"(?i)\b(?:offizielle|officiels|ufficiali|officials?|trainer|coach)\b").unwrap();
    static ref TERMINAL_MARKER: Regex =
        Regex::new(r"(?i)(?:signature|unterschrift|captain|kapitän|capitaine)").unwrap();
    static ref DATE_CELL: Regex = Regex::new(r"^\d{1,2}[./]\d{1,2}[./](?:\d{4}|\d{2})$").unwrap();
    static ref JERSEY_CELL: Regex = Regex::new(r"^[0-9OoIlZzSs]{1,2}$").unwrap();
    static ref ROLE_CELL: Regex = Regex::new(r"(?i)^(?:C|AC\d?|M)$").unwrap();
    static ref NUMBER_TOKEN: Regex = Regex::new(r"^\d{1,2}$").unwrap();
    static ref DIGIT_RUN: Regex = Regex::new(r"^\d{3,}$").unwrap();
    static ref LICENSE_TOKEN: Regex = Regex::new(r"(?i)^(?:OK|NOK|NO|X)$").unwrap();
}

/// True if the text looks like a Swiss scoresheet: one of the multilingual
/// headers is present, and the table was either read with tabs or with
/// glued names.
pub fn is_swiss_tabular_format(text: &str) -> bool {
    if !HEADER_PATTERNS.iter().any(|re| re.is_match(text)) {
        return false;
    }
    let tab_lines = text.lines().filter(|l| l.contains('\t')).count();
    tab_lines >= 3 || CONCATENATED_NAME.is_match(text)
}

fn has_dates(line: &str) -> bool {
    !split_concatenated_dates(line).is_empty()
}

fn clean_team_name(segment: &str) -> String {
    let collapsed = segment.split_whitespace().collect::<Vec<&str>>().join(" ");
    TRAILING_NOISE.replace(&collapsed, "").to_string()
}

fn is_noise_line(line: &str) -> bool {
    NOISE_PATTERNS.iter().any(|r| r.is_match(line))
}

/// True for lines such as `VBC Bern` or `TV Muri 2`.
pub(super) fn starts_with_club_prefix(line: &str) -> bool {
    CLUB_PREFIX
        .find(line)
        .map(|m| m.start() == 0)
        .unwrap_or(false)
}

/// The names of the two teams, found from the club prefixes (`VBC`, `TV`, ...).
///
/// A name runs from its prefix to the next prefix or the end of the line, minus
/// the trailing numbers. Missing names are empty.
pub fn extract_swiss_team_names(text: &str) -> (String, String) {
    let mut names: Vec<String> = Vec::new();
    for line in text.lines() {
        if names.len() >= 2 {
            break;
        }
        if has_dates(line) {
            continue;
        }
        let starts: Vec<usize> = CLUB_PREFIX.find_iter(line).map(|m| m.start()).collect();
        for (i, start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).cloned().unwrap_or(line.len());
            let name = clean_team_name(&line[*start..end]);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
    }
    debug!("extract_swiss_team_names: {:?}", names);
    let mut it = names.into_iter();
    (it.next().unwrap_or_default(), it.next().unwrap_or_default())
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum SwissSection {
    Players,
    Libero,
    Officials,
}

/// The non-empty cells of a line, with their position among all the cells.
struct Cells<'a> {
    cells: Vec<(usize, &'a str)>,
    total: usize,
}

impl<'a> Cells<'a> {
    fn new(line: &'a str) -> Cells<'a> {
        let raw: Vec<&str> = line.split('\t').collect();
        let total = raw.len();
        let cells = raw
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i, c.trim()))
            .filter(|(_, c)| !c.is_empty())
            .collect();
        Cells { cells, total }
    }

    /// The left half of the row belongs to team A.
    fn side_of(&self, position: usize) -> TeamSide {
        if self.total <= 1 || position * 2 < self.total {
            TeamSide::A
        } else {
            TeamSide::B
        }
    }
}

/// A shirt number or a role, then a name.
#[derive(Debug)]
enum Lead {
    Jersey(u8),
    Role(String),
}

#[derive(Debug)]
struct Entry {
    lead: Option<Lead>,
    name: String,
    birth_date: Option<String>,
}

/// Reads one entry of a libero or officials row, starting at the given cell:
/// an optional date, then the number or the role, the name, and an optional
/// date. Returns the entry and the index of the next unread cell.
fn parse_entry(
    cells: &[(usize, &str)],
    start: usize,
    section: SwissSection,
) -> Option<(Entry, usize)> {
    let mut idx = start;
    let mut birth_date = None;
    if let Some((_, c)) = cells.get(idx) {
        if DATE_CELL.is_match(c) {
            birth_date = Some(c.to_string());
            idx += 1;
        }
    }
    let mut lead = None;
    if let Some((_, c)) = cells.get(idx) {
        lead = match section {
            SwissSection::Libero if JERSEY_CELL.is_match(c) => {
                extract_shirt_number(c).map(Lead::Jersey)
            }
            SwissSection::Officials if ROLE_CELL.is_match(c) => Some(Lead::Role(c.to_uppercase())),
            _ => None,
        };
        if lead.is_some() {
            idx += 1;
        }
    }
    let (_, name) = cells.get(idx)?;
    if letter_count(name) < MIN_NAME_LENGTH {
        return None;
    }
    idx += 1;
    if birth_date.is_none() {
        if let Some((_, c)) = cells.get(idx) {
            if DATE_CELL.is_match(c) {
                birth_date = Some(c.to_string());
                idx += 1;
            }
        }
    }
    let entry = Entry {
        lead,
        name: name.to_string(),
        birth_date,
    };
    Some((entry, idx))
}

/// Names that start with an initial (`S. Angeli`) are written first name first.
fn name_parts(name: &str) -> NameParts {
    let first = name.split_whitespace().next().unwrap_or("");
    if first.ends_with('.') || first.chars().count() == 1 {
        parse_official_name(name)
    } else {
        parse_player_name(name)
    }
}

/// What one half of an unstructured player row holds.
#[derive(Debug, Default)]
struct HalfRow {
    names: Vec<String>,
    dates: Vec<String>,
    numbers: Vec<u8>,
    licenses: Vec<String>,
    digit_runs: Vec<String>,
}

impl HalfRow {
    fn add_cell(&mut self, cell: &str) {
        for tok in cell.split_whitespace() {
            if NUMBER_TOKEN.is_match(tok) {
                if let Some(n) = extract_shirt_number(tok) {
                    self.numbers.push(n);
                }
            } else if DIGIT_RUN.is_match(tok) {
                self.digit_runs.push(tok.to_string());
            }
        }
        self.dates.extend(split_concatenated_dates(cell));
        if letter_count(cell) == 0 {
            return;
        }
        let letters: String = cell.chars().filter(|c| !c.is_ascii_digit()).collect();
        for fragment in split_concatenated_names(&letters) {
            let tokens: Vec<&str> = fragment
                .split_whitespace()
                .map(|tok| tok.trim_start_matches(|c: char| !c.is_alphabetic()))
                .filter(|tok| letter_count(tok) > 0)
                .collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.iter().all(|tok| LICENSE_TOKEN.is_match(tok)) {
                self.licenses.extend(tokens.iter().map(|tok| tok.to_uppercase()));
                continue;
            }
            let name: Vec<&str> = tokens
                .into_iter()
                .filter(|tok| !LICENSE_TOKEN.is_match(tok))
                .collect();
            self.names.push(name.join(" "));
        }
    }
}

struct SwissParser<'a> {
    options: &'a ParseOptions,
    section: SwissSection,
    numbers_warned: bool,
    sheet: ParsedGameSheet,
}

impl<'a> SwissParser<'a> {
    fn team(&mut self, side: TeamSide) -> &mut ParsedTeam {
        match side {
            TeamSide::A => &mut self.sheet.team_a,
            TeamSide::B => &mut self.sheet.team_b,
        }
    }

    fn add_player(&mut self, side: TeamSide, player: ParsedPlayer) {
        let team = self.team(side);
        if team.players.len() >= MAX_SWISS_PLAYERS_PER_TEAM {
            debug!("add_player: team {:?} is full, dropping {:?}", side, player.raw_name);
            return;
        }
        team.players.push(player);
    }

    fn add_entry(&mut self, side: TeamSide, entry: Entry) {
        match self.section {
            SwissSection::Officials => {
                let role = match &entry.lead {
                    Some(Lead::Role(r)) => Some(r.as_str()),
                    _ => None,
                };
                let options = self.options;
                let team = self.team(side);
                if let Some(o) = make_official(role, &entry.name, team, options) {
                    team.officials.push(o);
                }
            }
            _ => {
                let number = match entry.lead {
                    Some(Lead::Jersey(n)) => Some(n),
                    _ => None,
                };
                let parts = name_parts(&entry.name);
                if let Some(p) = make_player(number, &entry.name, parts, entry.birth_date) {
                    self.add_player(side, p);
                }
            }
        }
    }

    /// Libero and officials rows: at most one entry per team.
    fn parse_structured_row(&mut self, cells: &Cells) {
        let mut idx = 0;
        let mut seen: Vec<TeamSide> = Vec::new();
        while idx < cells.cells.len() && seen.len() < 2 {
            match parse_entry(&cells.cells, idx, self.section) {
                Some((entry, next)) => {
                    let side = if seen.is_empty() {
                        cells.side_of(cells.cells[idx].0)
                    } else {
                        TeamSide::B
                    };
                    idx = next;
                    if seen.contains(&side) {
                        debug!("parse_structured_row: second entry for {:?}: {:?}", side, entry);
                        continue;
                    }
                    seen.push(side);
                    self.add_entry(side, entry);
                }
                None => idx += 1,
            }
        }
    }

    fn resolve_digit_runs(&mut self, half: &mut HalfRow) {
        for run in std::mem::take(&mut half.digit_runs) {
            let missing = half.names.len().saturating_sub(half.numbers.len());
            if missing == 0 {
                debug!("resolve_digit_runs: no name left for {:?}", run);
                continue;
            }
            half.numbers.extend(split_concatenated_numbers(&run, Some(missing)));
            if !self.numbers_warned {
                self.numbers_warned = true;
                self.sheet.warnings.push(
                    "Jersey numbers were split from concatenated digits and may be unreliable"
                        .to_string(),
                );
            }
        }
    }

    /// Player rows: each half is split into names, dates and numbers, which are
    /// then paired in reading order. A name needs a date or a number.
    fn parse_player_row(&mut self, cells: &Cells) {
        let mut halves = [HalfRow::default(), HalfRow::default()];
        for (pos, cell) in cells.cells.iter() {
            match cells.side_of(*pos) {
                TeamSide::A => halves[0].add_cell(cell),
                TeamSide::B => halves[1].add_cell(cell),
            }
        }
        for (mut half, side) in halves.into_iter().zip([TeamSide::A, TeamSide::B]) {
            self.resolve_digit_runs(&mut half);
            for (i, name) in half.names.iter().enumerate() {
                let number = half.numbers.get(i).cloned();
                let birth_date = half.dates.get(i).cloned();
                if number.is_none() && birth_date.is_none() {
                    debug!("parse_player_row: no date nor number for {:?}", name);
                    continue;
                }
                if let Some(mut p) = make_player(number, name, name_parts(name), birth_date) {
                    if let Some(l) = half.licenses.get(i) {
                        p.license_status = l.clone();
                    }
                    self.add_player(side, p);
                }
            }
        }
    }

    /// Returns false once the end of the lists is reached.
    fn parse_line(&mut self, line: &str) -> bool {
        if is_noise_line(line) {
            return true;
        }
        if TERMINAL_MARKER.is_match(line) {
            debug!("parse_line: end marker {:?}", line);
            return false;
        }
        let cells = Cells::new(line);
        let dated = has_dates(line);
        if cells.cells.len() <= 2 && !dated {
            if LIBERO_MARKER.is_match(line) {
                self.section = SwissSection::Libero;
                return true;
            }
            if OFFICIALS_MARKER.is_match(line) {
                self.section = SwissSection::Officials;
                return true;
            }
        }
        if !dated && HEADER_PATTERNS.iter().any(|re| re.is_match(line)) {
            return true;
        }
        if !dated && starts_with_club_prefix(line) {
            return true;
        }
        match self.section {
            SwissSection::Players => self.parse_player_row(&cells),
            SwissSection::Libero | SwissSection::Officials => self.parse_structured_row(&cells),
        }
        true
    }
}

/// Parses a Swiss sheet. Warnings for the missing data are added by the caller.
pub(super) fn parse_swiss_tabular(text: &str, options: &ParseOptions) -> ParsedGameSheet {
    let (name_a, name_b) = extract_swiss_team_names(text);
    info!("parse_swiss_tabular: teams {:?} and {:?}", name_a, name_b);
    let mut parser = SwissParser {
        options,
        section: SwissSection::Players,
        numbers_warned: false,
        sheet: ParsedGameSheet::default(),
    };
    parser.sheet.team_a.name = name_a;
    parser.sheet.team_b.name = name_b;
    for line in text.lines() {
        // The tabs carry the columns.
        let line = line.trim_matches(|c: char| c == ' ' || c == '\r');
        if !parser.parse_line(line) {
            break;
        }
    }
    parser.sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manuscript::parse_manuscript;

    const SWISS_SHEET: &str = "\
Mannschaft / Équipe / Squadra
VBC Bern 3\tTV Muri 1
Spieler / Joueurs / Giocatori
Nr\tName Nom Nome\tGeburtsdatum Date de naissance Data di nascita\tNr\tName Nom Nome\tGeburtsdatum Date de naissance Data di nascita
1\tS. Angeli\t20.2.97\t4\tMeier Lea\t3.4.98
23\tL. CollierO. Follouier\t21.1.9713.1.97\t5\tGERBER Nina\t1.5.99
Libero
7\tMeier Sara\t9\tGerber Jana
Offizielle / Officiels / Ufficiali
C\tHans Muster\tC\tPeter Beispiel
Unterschrift Kapitän
12\tLATE Row\t1.1.99
";

    #[test]
    fn noise_lines() {
        for line in ["25 25 15", "3:1 (25:20)", "-- / --", "|||", "\t\t"] {
            assert!(is_noise_line(line), "{:?}", line);
        }
        for line in ["1\tMeier Lea", "Libero", "VBC Bern 3"] {
            assert!(!is_noise_line(line), "{:?}", line);
        }
        assert!(starts_with_club_prefix("TV Muri 2"));
        assert!(!starts_with_club_prefix("Hans Muster"));
        assert!(!starts_with_club_prefix("Trainer VBC Bern"));
    }

    #[test]
    fn detects_the_layout() {
        assert!(is_swiss_tabular_format(SWISS_SHEET));
        assert!(is_swiss_tabular_format(
            "Name Nom Nome\nS. AngeliL. Collier 20.2.9721.1.97"
        ));
        // Headers without tabs nor glued names.
        assert!(!is_swiss_tabular_format("Name Nom Nome\n1 MEIER Anna"));
        // Tabs without the headers.
        assert!(!is_swiss_tabular_format("a\tb\nc\td\ne\tf\n"));
        assert!(!is_swiss_tabular_format(""));
    }

    #[test]
    fn team_names_from_club_prefixes() {
        assert_eq!(
            extract_swiss_team_names(SWISS_SHEET),
            ("VBC Bern".to_string(), "TV Muri".to_string())
        );
        assert_eq!(
            extract_swiss_team_names("VBC Thun 12\nnothing else"),
            ("VBC Thun".to_string(), String::new())
        );
        assert_eq!(
            extract_swiss_team_names("no clubs"),
            (String::new(), String::new())
        );
    }

    #[test]
    fn full_sheet() {
        let _ = env_logger::builder().is_test(true).try_init();
        let options = ParseOptions::new(ScoresheetType::Manuscript);
        let sheet = parse_manuscript(SWISS_SHEET, &options);
        assert!(sheet.warnings.is_empty(), "{:?}", sheet.warnings);
        assert_eq!(sheet.team_a.name, "VBC Bern");
        assert_eq!(sheet.team_b.name, "TV Muri");

        let a = &sheet.team_a.players;
        let names: Vec<&str> = a.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["S. Angeli", "L. Collier", "O. Follouier", "Sara Meier"]);
        assert_eq!(a[0].shirt_number, Some(1));
        assert_eq!(a[0].last_name, "Angeli");
        assert_eq!(a[0].birth_date, Some("20.2.97".to_string()));
        assert_eq!(a[1].shirt_number, Some(23));
        assert_eq!(a[2].shirt_number, None);
        assert_eq!(a[2].birth_date, Some("13.1.97".to_string()));
        assert_eq!(a[3].shirt_number, Some(7));

        let b = &sheet.team_b.players;
        assert_eq!(b.len(), 3);
        assert_eq!(b[0].last_name, "Meier");
        assert_eq!(b[0].first_name, "Lea");
        assert_eq!(b[1].last_name, "Gerber");
        assert_eq!(b[1].shirt_number, Some(5));
        assert_eq!(b[2].first_name, "Jana");
        assert_eq!(b[2].shirt_number, Some(9));

        assert_eq!(sheet.team_a.officials.len(), 1);
        assert_eq!(sheet.team_a.officials[0].role, OfficialRole::C);
        assert_eq!(sheet.team_a.officials[0].last_name, "Muster");
        assert_eq!(sheet.team_b.officials.len(), 1);
        assert_eq!(sheet.team_b.officials[0].first_name, "Peter");
    }

    #[test]
    fn glued_numbers_are_split_with_a_warning() {
        let text = "Name Nom Nome\tName Nom Nome\n\
x\ty\n\
712\tS. AngeliL. Collier\t20.2.9721.1.97\t\t\t\n";
        let sheet = parse_manuscript(text, &ParseOptions::new(ScoresheetType::Manuscript));
        let numbers: Vec<Option<u8>> = sheet.team_a.players.iter().map(|p| p.shirt_number).collect();
        assert_eq!(numbers, vec![Some(7), Some(12)]);
        assert!(sheet.warnings.contains(
            &"Jersey numbers were split from concatenated digits and may be unreliable".to_string()
        ));
    }

    #[test]
    fn players_are_capped_per_team() {
        let mut text = String::from("Name Nom Nome\na\tb\nc\td\n");
        for i in 1..=20 {
            text.push_str(&format!("{}\tMEIER Anna\t1.1.99\t\t\t\n", i));
        }
        let sheet = parse_manuscript(&text, &ParseOptions::new(ScoresheetType::Manuscript));
        assert_eq!(sheet.team_a.players.len(), MAX_SWISS_PLAYERS_PER_TEAM);
        assert!(sheet.team_b.players.is_empty());
    }
}
