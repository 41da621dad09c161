//! Parser for the machine-printed (electronic) scoresheets.
//!
//! The OCR text of these sheets is a table: every row carries the data of
//! team A in the first three columns and the data of team B in the next three.
//! The rows are read by a small state machine that only moves forward:
//! header, players, libero, officials and done.

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;

use crate::config::*;
use crate::corrections::*;
use crate::{add_missing_data_warnings, empty_input_sheet, is_blank};

lazy_static! {
    static ref PLAYER_ROW_START: Regex =
        Regex::new(r"^(\d{1,2})\t(\p{Lu}[\p{Lu}'\-]{3,})(?:\s|$)").unwrap();
    static ref LIBERO_ENTRY: Regex = Regex::new(r"^(\d{1,2})\s+(.+)$").unwrap();
}

/// The sections of an electronic scoresheet, in the order they appear.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum Section {
    Header,
    Players,
    Libero,
    Officials,
    /// Nothing after the signatures is read.
    Done,
}

/// What a single line of the sheet announces.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum LineKind {
    /// Signatures or team captain: the end of the team lists.
    Terminal,
    OfficialsMarker,
    LiberoMarker,
    /// The header of the player table.
    HeaderRow,
    Data,
}

fn split_fields(line: &str) -> Vec<&str> {
    line.split('\t').map(|s| s.trim()).collect()
}

pub fn is_terminal_line(line: &str) -> bool {
    let up = line.to_uppercase();
    up.contains("SIGNATURES") || up.contains("TEAM CAPTAIN")
}

pub fn is_officials_marker(line: &str) -> bool {
    let up = line.to_uppercase();
    up.contains("OFFICIAL MEMBERS") || up.contains("ADMITTED ON THE BENCH")
}

/// A libero marker only holds a title. Libero data rows have more columns.
pub fn is_libero_marker(line: &str) -> bool {
    line.to_uppercase().contains("LIBERO") && split_fields(line).len() <= 2
}

pub fn is_header_row(line: &str) -> bool {
    let low = line.to_lowercase();
    low.contains("name of the player") || (low.contains("n.") && low.contains("name"))
}

pub fn classify_line(line: &str) -> LineKind {
    if is_terminal_line(line) {
        LineKind::Terminal
    } else if is_officials_marker(line) {
        LineKind::OfficialsMarker
    } else if is_libero_marker(line) {
        LineKind::LiberoMarker
    } else if is_header_row(line) {
        LineKind::HeaderRow
    } else {
        LineKind::Data
    }
}

/// The transition function of the state machine. It never goes back to an
/// earlier section.
pub fn next_section(state: Section, line: &str) -> Section {
    if state == Section::Done {
        return Section::Done;
    }
    let target = match classify_line(line) {
        LineKind::Terminal => Section::Done,
        LineKind::OfficialsMarker => Section::Officials,
        LineKind::LiberoMarker => Section::Libero,
        LineKind::HeaderRow => Section::Players,
        LineKind::Data => state,
    };
    state.max(target)
}

fn is_numeric_heavy(field: &str) -> bool {
    let total = field.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return true;
    }
    let digits = field.chars().filter(|c| c.is_ascii_digit()).count();
    (digits as f64) / (total as f64) >= NUMERIC_HEAVY_RATIO
}

/// Where the player rows start, and the team names found around it.
#[derive(Eq, PartialEq, Debug, Clone)]
struct PlayerSection {
    first_row: usize,
    team_a: Option<String>,
    team_b: Option<String>,
}

fn team_names_from_line(line: &str, skip_numeric: bool) -> Vec<String> {
    split_fields(line)
        .into_iter()
        .filter(|f| !f.is_empty())
        .filter(|f| !skip_numeric || !is_numeric_heavy(f))
        .map(|f| f.to_string())
        .collect()
}

fn find_player_section(lines: &[&str]) -> Option<PlayerSection> {
    if let Some(header_idx) = lines.iter().position(|l| is_header_row(l)) {
        debug!("find_player_section: header row at line {}", header_idx);
        let lookback_start = header_idx.saturating_sub(HEADER_LOOKBACK_LINES);
        for idx in (lookback_start..header_idx).rev() {
            let names = team_names_from_line(lines[idx], true);
            if names.len() >= 2 {
                return Some(PlayerSection {
                    first_row: header_idx + 1,
                    team_a: Some(names[0].clone()),
                    team_b: Some(names[1].clone()),
                });
            }
        }
        return Some(PlayerSection {
            first_row: header_idx + 1,
            team_a: None,
            team_b: None,
        });
    }

    // No header: the first line that looks like a player row.
    let first_row = lines.iter().position(|l| {
        PLAYER_ROW_START
            .captures(l)
            .and_then(|caps| extract_shirt_number(&caps[1]))
            .is_some()
    })?;
    debug!(
        "find_player_section: no header row, first player row at line {}",
        first_row
    );
    let mut names = if first_row > 0 {
        team_names_from_line(lines[first_row - 1], false)
    } else {
        Vec::new()
    };
    let team_b = if names.len() >= 2 {
        Some(names.remove(1))
    } else {
        None
    };
    Some(PlayerSection {
        first_row,
        team_a: names.into_iter().next(),
        team_b,
    })
}

// ******** Bounding boxes *********

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn find_ocr_line<'a>(line: &str, ocr_lines: &'a [OcrLine]) -> Option<&'a OcrLine> {
    let key = collapse_whitespace(line);
    ocr_lines.iter().find(|ol| {
        collapse_whitespace(&ol.text) == key
            || collapse_whitespace(
                &ol.words
                    .iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<&str>>()
                    .join(" "),
            ) == key
    })
}

/// The x position separating the columns of team A and team B.
///
/// It is learned from the rows that carry data for both teams: the gap
/// between the last word of team A and the first word of team B.
pub fn infer_column_boundary(lines: &[&str], ocr_lines: &[OcrLine]) -> Option<f64> {
    let mut gaps: Vec<f64> = Vec::new();
    for line in lines.iter() {
        let fields = split_fields(line);
        if fields.len() < 6 {
            continue;
        }
        let words_a: usize = fields[..3]
            .iter()
            .map(|f| f.split_whitespace().count())
            .sum();
        let ocr_line = match find_ocr_line(line, ocr_lines) {
            Some(x) => x,
            None => continue,
        };
        if words_a == 0 || ocr_line.words.len() <= words_a {
            continue;
        }
        let left = ocr_line.words[words_a - 1].bbox.x1;
        let right = ocr_line.words[words_a].bbox.x0;
        gaps.push((left + right) / 2.0);
    }
    if gaps.is_empty() {
        None
    } else {
        let boundary = gaps.iter().sum::<f64>() / (gaps.len() as f64);
        debug!(
            "infer_column_boundary: boundary {} from {} rows",
            boundary,
            gaps.len()
        );
        Some(boundary)
    }
}

// ******** Row parsing *********

fn parse_player_cells(number: &str, name: &str, license: &str) -> Option<ParsedPlayer> {
    let shirt_number = extract_shirt_number(number)?;
    let raw_name = name.trim();
    if letter_count(raw_name) < MIN_NAME_LENGTH {
        return None;
    }
    let parts = parse_player_name(raw_name);
    if parts.display_name.is_empty() {
        return None;
    }
    Some(ParsedPlayer {
        shirt_number: Some(shirt_number),
        last_name: parts.last_name,
        first_name: parts.first_name,
        display_name: parts.display_name,
        raw_name: raw_name.to_string(),
        license_status: license.trim().to_uppercase(),
        birth_date: None,
    })
}

/// A libero entry holds the number and the name in one cell: `7 MEIER ANNA`.
fn parse_libero_entry(entry: &str, license: &str) -> Option<ParsedPlayer> {
    let caps = LIBERO_ENTRY.captures(entry.trim())?;
    parse_player_cells(&caps[1], &caps[2], license)
}

fn parse_official_cells(
    role: &str,
    name: &str,
    options: &ParseOptions,
) -> Option<ParsedOfficial> {
    let role: OfficialRole = role.parse().ok()?;
    if !options.accepts_role(role) {
        debug!("parse_official_cells: role {} not accepted", role);
        return None;
    }
    let raw_name = name.trim();
    if letter_count(raw_name) < MIN_NAME_LENGTH {
        return None;
    }
    let parts = parse_official_name(raw_name);
    if parts.display_name.is_empty() {
        return None;
    }
    Some(ParsedOfficial {
        role,
        last_name: parts.last_name,
        first_name: parts.first_name,
        display_name: parts.display_name,
        raw_name: raw_name.to_string(),
    })
}

fn cell<'a>(fields: &[&'a str], idx: usize) -> &'a str {
    fields.get(idx).cloned().unwrap_or("")
}

struct ElectronicParser<'a> {
    options: &'a ParseOptions,
    ocr_lines: &'a [OcrLine],
    boundary: Option<f64>,
    boundary_warned: bool,
    sheet: ParsedGameSheet,
}

impl<'a> ElectronicParser<'a> {
    fn team(&mut self, side: TeamSide) -> &mut ParsedTeam {
        match side {
            TeamSide::A => &mut self.sheet.team_a,
            TeamSide::B => &mut self.sheet.team_b,
        }
    }

    /// Decides the team of a row that only has the columns of one team.
    fn overflow_side(&mut self, line: &str) -> TeamSide {
        let boundary = match self.boundary {
            Some(b) => b,
            None => {
                if !self.boundary_warned {
                    self.boundary_warned = true;
                    self.sheet.warnings.push(
                        "Column boundary could not be determined: single-column rows were assigned to team A"
                            .to_string(),
                    );
                }
                return TeamSide::A;
            }
        };
        match find_ocr_line(line, self.ocr_lines).and_then(|ol| ol.words.first()) {
            Some(word) if word.bbox.x0 >= boundary => {
                debug!(
                    "overflow_side: {:?} at x={} is right of {}",
                    line, word.bbox.x0, boundary
                );
                TeamSide::B
            }
            Some(_) => TeamSide::A,
            None => {
                debug!("overflow_side: no word boxes for {:?}", line);
                TeamSide::A
            }
        }
    }

    fn push_player(&mut self, side: TeamSide, player: Option<ParsedPlayer>) {
        if let Some(p) = player {
            debug!("push_player: team {:?}: {:?}", side, p);
            self.team(side).players.push(p);
        }
    }

    fn push_official(&mut self, side: TeamSide, official: Option<ParsedOfficial>) {
        if let Some(o) = official {
            debug!("push_official: team {:?}: {:?}", side, o);
            self.team(side).officials.push(o);
        }
    }

    fn handle_player_row(&mut self, line: &str) {
        let fields = split_fields(line);
        if fields.len() >= 6 {
            let a = parse_player_cells(fields[0], fields[1], fields[2]);
            let b = parse_player_cells(fields[3], fields[4], fields[5]);
            self.push_player(TeamSide::A, a);
            self.push_player(TeamSide::B, b);
        } else {
            let player = if fields.len() == 1 {
                // The tabs were lost: `7 MEIER ANNA`.
                parse_libero_entry(fields[0], "")
            } else {
                parse_player_cells(fields[0], fields[1], cell(&fields, 2))
            };
            if player.is_some() {
                let side = self.overflow_side(line);
                self.push_player(side, player);
            }
        }
    }

    fn handle_libero_row(&mut self, line: &str) {
        let fields = split_fields(line);
        if fields.len() >= 6 {
            let a = parse_libero_entry(fields[1], fields[2]);
            let b = parse_libero_entry(fields[4], fields[5]);
            self.push_player(TeamSide::A, a);
            self.push_player(TeamSide::B, b);
        } else {
            // The label column may be missing on a single-column row.
            let player = (0..fields.len().min(2))
                .find_map(|idx| parse_libero_entry(fields[idx], cell(&fields, idx + 1)));
            if player.is_some() {
                let side = self.overflow_side(line);
                self.push_player(side, player);
            }
        }
    }

    fn handle_official_row(&mut self, line: &str) {
        let fields = split_fields(line);
        if fields.len() >= 4 {
            let a = parse_official_cells(fields[0], fields[1], self.options);
            let b = parse_official_cells(fields[2], fields[3], self.options);
            self.push_official(TeamSide::A, a);
            self.push_official(TeamSide::B, b);
        } else if fields.len() >= 2 {
            let official = parse_official_cells(fields[0], fields[1], self.options);
            if official.is_some() {
                let side = self.overflow_side(line);
                self.push_official(side, official);
            }
        }
    }

    fn handle_line(&mut self, state: Section, line: &str) {
        match state {
            Section::Players => self.handle_player_row(line),
            Section::Libero => self.handle_libero_row(line),
            Section::Officials => self.handle_official_row(line),
            Section::Header | Section::Done => {}
        }
    }
}

/// Parses the OCR output of an electronic scoresheet.
///
/// The word boxes of the page are optional. When present, they place the rows
/// that only hold one team in the right column.
pub fn parse_electronic(page: &OcrPage, options: &ParseOptions) -> ParsedGameSheet {
    if is_blank(&page.full_text) {
        return empty_input_sheet();
    }
    let lines: Vec<&str> = page
        .full_text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut parser = ElectronicParser {
        options,
        ocr_lines: &page.lines,
        boundary: infer_column_boundary(&lines, &page.lines),
        boundary_warned: false,
        sheet: ParsedGameSheet::default(),
    };

    match find_player_section(&lines) {
        Some(section) => {
            info!(
                "parse_electronic: player rows start at line {}, teams: {:?} / {:?}",
                section.first_row, section.team_a, section.team_b
            );
            match (section.team_a, section.team_b) {
                (None, None) => {
                    parser
                        .sheet
                        .warnings
                        .push("Team names could not be detected".to_string());
                }
                (a, b) => {
                    for (name, label) in [(&a, "A"), (&b, "B")] {
                        if name.is_none() {
                            parser
                                .sheet
                                .warnings
                                .push(format!("Team {} name could not be detected", label));
                        }
                    }
                    parser.sheet.team_a.name = a.unwrap_or_default();
                    parser.sheet.team_b.name = b.unwrap_or_default();
                }
            }

            let mut state = Section::Players;
            for line in lines.iter().skip(section.first_row) {
                let next = next_section(state, line);
                if next == Section::Done {
                    debug!("parse_electronic: end marker {:?}", line);
                    break;
                }
                if next != state {
                    debug!("parse_electronic: {:?} -> {:?}", state, next);
                    state = next;
                    continue;
                }
                if classify_line(line) == LineKind::HeaderRow {
                    continue;
                }
                parser.handle_line(state, line);
            }
        }
        None => {
            warn!("parse_electronic: no player section found");
            parser
                .sheet
                .warnings
                .push("Could not locate the player section".to_string());
        }
    }

    let mut sheet = parser.sheet;
    add_missing_data_warnings(&mut sheet);
    sheet
}

/// Same as [parse_electronic], without word boxes.
pub fn parse_electronic_text(text: &str, options: &ParseOptions) -> ParsedGameSheet {
    parse_electronic(&OcrPage::from_text(text), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "VBC Heimteam\tVBC Gastteam\nN.\tName of the player\tLicense\tN.\tName of the player\tLicense\n1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK";

    fn word(text: &str, x0: f64) -> OcrWord {
        OcrWord {
            text: text.to_string(),
            confidence: 90.0,
            bbox: BoundingBox {
                x0,
                y0: 0.0,
                x1: x0 + 10.0 * text.chars().count() as f64,
                y1: 12.0,
            },
        }
    }

    fn ocr_line(words: Vec<OcrWord>) -> OcrLine {
        OcrLine {
            text: words
                .iter()
                .map(|w| w.text.clone())
                .collect::<Vec<String>>()
                .join(" "),
            words,
        }
    }

    #[test]
    fn canonical_fixture() {
        let sheet = parse_electronic_text(FIXTURE, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Heimteam");
        assert_eq!(sheet.team_b.name, "VBC Gastteam");

        let a = &sheet.team_a.players[0];
        assert_eq!(a.shirt_number, Some(1));
        assert_eq!(a.last_name, "Müller");
        assert_eq!(a.first_name, "Anna");
        assert_eq!(a.display_name, "Anna Müller");
        assert_eq!(a.raw_name, "MÜLLER ANNA");
        assert_eq!(a.license_status, "OK");

        let b = &sheet.team_b.players[0];
        assert_eq!(b.shirt_number, Some(3));
        assert_eq!(b.last_name, "Schmidt");
        assert_eq!(b.first_name, "Lisa");
        assert_eq!(sheet.team_a.players.len(), 1);
        assert_eq!(sheet.team_b.players.len(), 1);
        assert!(sheet
            .warnings
            .contains(&"No officials found for either team".to_string()));
    }

    #[test]
    fn empty_input() {
        let sheet = parse_electronic_text("  \n ", &ParseOptions::default());
        assert_eq!(sheet.warnings, vec!["No OCR text provided".to_string()]);
        assert!(sheet.is_empty());
    }

    #[test]
    fn sections_only_move_forward() {
        assert_eq!(next_section(Section::Players, "LIBERO"), Section::Libero);
        assert_eq!(
            next_section(Section::Libero, "OFFICIAL MEMBERS ADMITTED ON THE BENCH"),
            Section::Officials
        );
        assert_eq!(next_section(Section::Officials, "LIBERO"), Section::Officials);
        assert_eq!(
            next_section(Section::Officials, "Signatures\tTeam captain"),
            Section::Done
        );
        assert_eq!(next_section(Section::Done, "N.\tName"), Section::Done);
        assert_eq!(next_section(Section::Header, "N.\tName"), Section::Players);
    }

    #[test]
    fn full_sheet_with_libero_and_officials() {
        let text = "\
Volleyball Match
VBC Heimteam\tVBC Gastteam
N.\tName of the player\tLicense\tN.\tName of the player\tLicense
1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK
4\tKELLER EVA\tOK\t8\tHUBER NINA MARIA\tOK
12\tBRUNNER LEA\tOK
LIBERO
L1\t7 MEIER SARA\tOK\tL1\t9 GERBER JANA\tOK
OFFICIAL MEMBERS ADMITTED ON THE BENCH
C\tHans Muster\tC\tPeter Beispiel
AC\tUrs Vogel\tX\tNobody Here
SIGNATURES
1\tLATE ROW\tOK\t2\tIGNORED ROW\tOK
";
        let sheet = parse_electronic_text(text, &ParseOptions::default());
        let a_numbers: Vec<Option<u8>> =
            sheet.team_a.players.iter().map(|p| p.shirt_number).collect();
        assert_eq!(a_numbers, vec![Some(1), Some(4), Some(12), Some(7)]);
        let b_numbers: Vec<Option<u8>> =
            sheet.team_b.players.iter().map(|p| p.shirt_number).collect();
        assert_eq!(b_numbers, vec![Some(3), Some(8), Some(9)]);
        assert_eq!(sheet.team_b.players[1].first_name, "Nina Maria");

        assert_eq!(sheet.team_a.officials.len(), 2);
        assert_eq!(sheet.team_a.officials[0].role, OfficialRole::C);
        assert_eq!(sheet.team_a.officials[0].first_name, "Hans");
        assert_eq!(sheet.team_a.officials[0].last_name, "Muster");
        assert_eq!(sheet.team_a.officials[1].role, OfficialRole::AC);
        assert_eq!(sheet.team_b.officials.len(), 1);
        assert_eq!(sheet.team_b.officials[0].display_name, "Peter Beispiel");

        // The single-column row had no word boxes.
        assert!(sheet
            .warnings
            .iter()
            .any(|w| w.starts_with("Column boundary could not be determined")));
    }

    #[test]
    fn header_fallback() {
        let text = "VBC Heimteam\tVBC Gastteam\n5\tMEIER ANNA\tOK\t6\tMOSER LEA\tOK";
        let sheet = parse_electronic_text(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Heimteam");
        assert_eq!(sheet.team_b.name, "VBC Gastteam");
        assert_eq!(sheet.team_a.players[0].last_name, "Meier");
        assert_eq!(sheet.team_b.players[0].last_name, "Moser");
    }

    #[test]
    fn single_team_name_is_reported() {
        let text = "VBC Heimteam\n5\tMEIER ANNA\tOK\t6\tMOSER LEA\tOK";
        let sheet = parse_electronic_text(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Heimteam");
        assert_eq!(sheet.team_b.name, "");
        assert!(sheet
            .warnings
            .contains(&"Team B name could not be detected".to_string()));
        assert!(!sheet
            .warnings
            .contains(&"Team names could not be detected".to_string()));
    }

    #[test]
    fn no_player_section() {
        let sheet = parse_electronic_text("just some words", &ParseOptions::default());
        assert!(sheet.is_empty());
        assert!(sheet
            .warnings
            .contains(&"Could not locate the player section".to_string()));
        assert!(sheet
            .warnings
            .contains(&"No players found for team A".to_string()));
    }

    #[test]
    fn overflow_row_goes_to_team_a_without_boxes() {
        let text = "A\tB\nN.\tName of the player\tLicense\tN.\tName of the player\tLicense\n1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK\n\t\t\t5\tWEBER ZOE\tOK";
        let sheet = parse_electronic_text(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.players.len(), 2);
        assert_eq!(sheet.team_b.players.len(), 1);
        assert_eq!(sheet.team_a.players[1].last_name, "Weber");
    }

    #[test]
    fn overflow_row_placed_by_word_boxes() {
        let text = "A\tB\nN.\tName of the player\tLicense\tN.\tName of the player\tLicense\n1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK\n\t\t\t5\tWEBER ZOE\tOK\n6\tFREI MIA\tOK";
        let page = OcrPage {
            full_text: text.to_string(),
            lines: vec![
                ocr_line(vec![
                    word("1", 10.0),
                    word("MÜLLER", 40.0),
                    word("ANNA", 110.0),
                    word("OK", 200.0),
                    word("3", 400.0),
                    word("SCHMIDT", 430.0),
                    word("LISA", 510.0),
                    word("OK", 600.0),
                ]),
                ocr_line(vec![
                    word("5", 400.0),
                    word("WEBER", 430.0),
                    word("ZOE", 500.0),
                    word("OK", 600.0),
                ]),
                ocr_line(vec![
                    word("6", 10.0),
                    word("FREI", 40.0),
                    word("MIA", 90.0),
                    word("OK", 200.0),
                ]),
            ],
        };
        let sheet = parse_electronic(&page, &ParseOptions::default());
        let a: Vec<&str> = sheet
            .team_a
            .players
            .iter()
            .map(|p| p.last_name.as_str())
            .collect();
        let b: Vec<&str> = sheet
            .team_b
            .players
            .iter()
            .map(|p| p.last_name.as_str())
            .collect();
        assert_eq!(a, vec!["Müller", "Frei"]);
        assert_eq!(b, vec!["Schmidt", "Weber"]);
        assert!(!sheet
            .warnings
            .iter()
            .any(|w| w.starts_with("Column boundary")));
    }

    #[test]
    fn boundary_is_learned_from_two_column_rows() {
        let lines = vec!["1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK"];
        let ocr = vec![ocr_line(vec![
            word("1", 10.0),
            word("MÜLLER", 40.0),
            word("ANNA", 110.0),
            word("OK", 200.0),
            word("3", 400.0),
            word("SCHMIDT", 430.0),
            word("LISA", 510.0),
            word("OK", 600.0),
        ])];
        // OK ends at 220, the number of team B starts at 400.
        assert_eq!(infer_column_boundary(&lines, &ocr), Some(310.0));
        assert_eq!(infer_column_boundary(&lines, &[]), None);
    }

    #[test]
    fn medical_role_is_configurable() {
        let text = "A\tB\nN.\tName of the player\tLicense\tN.\tName of the player\tLicense\n1\tMÜLLER ANNA\tOK\t3\tSCHMIDT LISA\tOK\nOFFICIAL MEMBERS\nM\tDora Arzt\tC\tIvo Trainer";
        let sheet = parse_electronic_text(text, &ParseOptions::default());
        assert!(sheet.team_a.officials.is_empty());
        assert_eq!(sheet.team_b.officials.len(), 1);

        let mut options = ParseOptions::default();
        options.official_roles.push(OfficialRole::M);
        let sheet = parse_electronic_text(text, &options);
        assert_eq!(sheet.team_a.officials[0].role, OfficialRole::M);
        assert_eq!(sheet.team_a.officials[0].last_name, "Arzt");
    }
}
