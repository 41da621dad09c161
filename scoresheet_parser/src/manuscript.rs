//! Parser for handwritten (manuscript) scoresheets.
//!
//! Two layouts are supported. The Swiss layout is a two-column table with
//! multilingual headers and is handled in [swiss]. All the other sheets are
//! read sequentially: a block for team A, then a block for team B.

mod swiss;

pub use swiss::{extract_swiss_team_names, is_swiss_tabular_format};

use swiss::starts_with_club_prefix;

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use crate::config::*;
use crate::corrections::*;
use crate::{add_missing_data_warnings, empty_input_sheet, is_blank};

lazy_static! {
    static ref TEAM_A_MARKER: Regex = Regex::new(
        r"(?i)^(?:(?:team|[ée]quipe|mannschaft)\s*a|home|heim)\b[\s:.\-]*(.*)$"
    )
    .unwrap();
    static ref TEAM_B_MARKER: Regex = Regex::new(
        r"(?i)^(?:(?:team|[ée]quipe|mannschaft)\s*b|away|gast)\b[\s:.\-]*(.*)$"
    )
    .unwrap();
    static ref PLAYER_LINE: Regex = Regex::new(r"^(\d{1,2})[\s.:_\-]+(.+)$").unwrap();
    // Same as above, with the characters that are commonly read instead of digits.
    static ref PLAYER_LINE_LENIENT: Regex =
        Regex::new(r"^([0-9OoQDIli|ZzSsGbTBgq]{1,2})([\s.:_\-]+)(.+)$").unwrap();
    static ref OFFICIAL_LINE: Regex = Regex::new(r"(?i)^(C|AC\d?)[\s.:_\-]+(.+)$").unwrap();
    // Only read when the medical staff is accepted: `M.` is usually an initial.
    static ref MEDICAL_LINE: Regex = Regex::new(r"(?i)^(M)[\s.:_\-]+(.+)$").unwrap();
    static ref OFFICIALS_MARKER: Regex =
        Regex::new(r"(?i)\b(?:official|officials|coach|trainer)\b").unwrap();
    static ref OFFICIALS_MARKER_REST: Regex =
        Regex::new(r"(?i)^(?:officials?|coach|trainer)\b[\s:.\-]*(.*)$").unwrap();
    static ref TERMINAL_MARKER: Regex =
        Regex::new(r"(?i)(?:signature|captain|referee|arbitre)").unwrap();
    static ref BIRTH_DATE: Regex =
        Regex::new(r"\b\d{1,2}[./]\d{1,2}[./](?:\d{4}|\d{2})\b").unwrap();
}

/// The meaning of one line of a sequential manuscript sheet.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ManuscriptLine {
    /// Start of the block of a team, with the team name if it is on the same line.
    TeamMarker(TeamSide, Option<String>),
    /// Nothing after this line belongs to the team.
    Terminal,
    /// Start of the officials, with a name if one follows the marker.
    OfficialsMarker(Option<String>),
    Official(String, String),
    Player(u8, String),
    TeamName(String),
    Other,
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if letter_count(t) > 0 {
        Some(t.to_string())
    } else {
        None
    }
}

fn team_marker(line: &str) -> Option<(TeamSide, Option<String>)> {
    if let Some(caps) = TEAM_A_MARKER.captures(line) {
        return Some((TeamSide::A, non_empty(&caps[1])));
    }
    if let Some(caps) = TEAM_B_MARKER.captures(line) {
        return Some((TeamSide::B, non_empty(&caps[1])));
    }
    None
}

fn player_line(line: &str) -> Option<(u8, String)> {
    if let Some(caps) = PLAYER_LINE.captures(line) {
        if letter_count(&caps[2]) >= MIN_NAME_LENGTH {
            let num = extract_shirt_number(&caps[1])?;
            return Some((num, caps[2].to_string()));
        }
    }
    let caps = PLAYER_LINE_LENIENT.captures(line)?;
    if letter_count(&caps[3]) < MIN_NAME_LENGTH {
        return None;
    }
    let prefix = &caps[1];
    let separator = &caps[2];
    // A bare letter followed by a space is more likely a word than a number.
    let has_digit = prefix.chars().any(|c| c.is_ascii_digit());
    let has_punctuation = separator.chars().any(|c| !c.is_whitespace());
    if !has_digit && !has_punctuation {
        return None;
    }
    let num = extract_shirt_number(prefix)?;
    debug!("player_line: lenient number {:?} -> {}", prefix, num);
    Some((num, caps[3].to_string()))
}

/// Letters over all the visible characters.
fn letter_ratio(line: &str) -> f64 {
    let total = line.chars().filter(|c| !c.is_whitespace()).count();
    if total == 0 {
        return 0.0;
    }
    (letter_count(line) as f64) / (total as f64)
}

fn looks_like_team_name(line: &str) -> bool {
    letter_count(line) >= 3 && letter_ratio(line) > TEAM_NAME_LETTER_RATIO
}

pub fn classify_manuscript_line(line: &str, options: &ParseOptions) -> ManuscriptLine {
    let line = line.trim();
    if let Some((side, name)) = team_marker(line) {
        return ManuscriptLine::TeamMarker(side, name);
    }
    if TERMINAL_MARKER.is_match(line) {
        return ManuscriptLine::Terminal;
    }
    let official = OFFICIAL_LINE.captures(line).or_else(|| {
        if options.accepts_role(OfficialRole::M) {
            MEDICAL_LINE.captures(line)
        } else {
            None
        }
    });
    if let Some(caps) = official {
        return ManuscriptLine::Official(caps[1].to_string(), caps[2].trim().to_string());
    }
    if let Some((num, name)) = player_line(line) {
        return ManuscriptLine::Player(num, name);
    }
    if OFFICIALS_MARKER.is_match(line) {
        let rest = OFFICIALS_MARKER_REST
            .captures(line)
            .and_then(|caps| non_empty(&caps[1]));
        return ManuscriptLine::OfficialsMarker(rest);
    }
    if looks_like_team_name(line) {
        return ManuscriptLine::TeamName(line.to_string());
    }
    ManuscriptLine::Other
}

/// Separates the date of birth (if any) from the name, and drops the
/// tokens without letters.
fn clean_player_name(raw: &str) -> (String, Option<String>) {
    let birth_date = BIRTH_DATE.find(raw).map(|m| m.as_str().to_string());
    let without_date = BIRTH_DATE.replace_all(raw, " ");
    let name = without_date
        .split_whitespace()
        .filter(|tok| letter_count(tok) > 0)
        .collect::<Vec<&str>>()
        .join(" ");
    (name, birth_date)
}

fn make_player(
    shirt_number: Option<u8>,
    raw: &str,
    parts: NameParts,
    birth_date: Option<String>,
) -> Option<ParsedPlayer> {
    if letter_count(raw) < MIN_NAME_LENGTH || parts.display_name.is_empty() {
        return None;
    }
    Some(ParsedPlayer {
        shirt_number,
        last_name: parts.last_name,
        first_name: parts.first_name,
        display_name: parts.display_name,
        raw_name: raw.to_string(),
        license_status: String::new(),
        birth_date,
    })
}

/// Builds an official. Without an explicit role, the next bench role of the
/// team is used.
fn make_official(
    role: Option<&str>,
    raw: &str,
    team: &ParsedTeam,
    options: &ParseOptions,
) -> Option<ParsedOfficial> {
    let role = match role {
        Some(code) => code.parse::<OfficialRole>().ok()?,
        None => OfficialRole::nth_bench_role(team.officials.len())?,
    };
    if !options.accepts_role(role) {
        debug!("make_official: role {} is not accepted", role);
        return None;
    }
    let raw = raw.trim();
    if letter_count(raw) < MIN_NAME_LENGTH {
        return None;
    }
    let parts = parse_official_name(raw);
    if parts.display_name.is_empty() {
        return None;
    }
    Some(ParsedOfficial {
        role,
        last_name: parts.last_name,
        first_name: parts.first_name,
        display_name: parts.display_name,
        raw_name: raw.to_string(),
    })
}

#[derive(Debug, Default)]
struct Bucket<'a> {
    name: Option<String>,
    lines: Vec<&'a str>,
    player_lines: usize,
}

/// Distributes the lines between the two teams.
///
/// Without team markers, the first name line is the name of team A, and the
/// next name line after the players of team A starts team B. In a block of
/// officials, only a name starting with a club prefix starts team B.
fn split_into_buckets<'a>(
    lines: &[&'a str],
    options: &ParseOptions,
) -> (Bucket<'a>, Bucket<'a>) {
    let mut a = Bucket::default();
    let mut b = Bucket::default();
    let has_markers = lines.iter().any(|l| team_marker(l).is_some());
    debug!("split_into_buckets: explicit team markers: {}", has_markers);

    let mut active: Option<TeamSide> = None;
    let mut in_officials = false;
    for line in lines.iter() {
        let kind = classify_manuscript_line(line, options);
        match &kind {
            ManuscriptLine::OfficialsMarker(_) | ManuscriptLine::Official(_, _) => {
                in_officials = true
            }
            ManuscriptLine::Player(_, _) => in_officials = false,
            _ => {}
        }
        if let ManuscriptLine::TeamMarker(side, name) = kind {
            active = Some(side);
            in_officials = false;
            let bucket = if side == TeamSide::A { &mut a } else { &mut b };
            if bucket.name.is_none() {
                bucket.name = name;
            }
            continue;
        }

        if !has_markers {
            if let ManuscriptLine::TeamName(name) = &kind {
                match active {
                    None => {
                        active = Some(TeamSide::A);
                        a.name = Some(name.clone());
                        continue;
                    }
                    Some(TeamSide::A)
                        if b.name.is_none()
                            && a.player_lines > 0
                            && (!in_officials || starts_with_club_prefix(name)) =>
                    {
                        active = Some(TeamSide::B);
                        in_officials = false;
                        b.name = Some(name.clone());
                        continue;
                    }
                    _ => {}
                }
            }
        }

        let bucket = match active {
            Some(TeamSide::B) => &mut b,
            Some(TeamSide::A) => &mut a,
            // Lines before the first marker are the title of the sheet.
            None if has_markers => continue,
            None => &mut a,
        };
        if bucket.name.is_none() && bucket.lines.is_empty() {
            if let ManuscriptLine::TeamName(name) = &kind {
                bucket.name = Some(name.clone());
                continue;
            }
        }
        if matches!(kind, ManuscriptLine::Player(_, _)) {
            bucket.player_lines += 1;
        }
        bucket.lines.push(line);
    }
    (a, b)
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum BucketMode {
    Players,
    Officials,
}

fn parse_bucket(bucket: &Bucket, options: &ParseOptions) -> ParsedTeam {
    let mut team = ParsedTeam {
        name: bucket.name.clone().unwrap_or_default(),
        ..ParsedTeam::default()
    };
    let mut mode = BucketMode::Players;
    for line in bucket.lines.iter() {
        match classify_manuscript_line(line, options) {
            ManuscriptLine::Terminal => {
                debug!("parse_bucket: end marker {:?}", line);
                break;
            }
            ManuscriptLine::OfficialsMarker(rest) => {
                mode = BucketMode::Officials;
                if let Some(name) = rest {
                    if let Some(o) = make_official(None, &name, &team, options) {
                        team.officials.push(o);
                    }
                }
            }
            ManuscriptLine::Official(role, name) => {
                if let Some(o) = make_official(Some(&role), &name, &team, options) {
                    team.officials.push(o);
                }
            }
            ManuscriptLine::Player(num, raw) => {
                let (name, birth_date) = clean_player_name(&raw);
                let parts = parse_player_name(&name);
                if let Some(p) = make_player(Some(num), &name, parts, birth_date) {
                    team.players.push(p);
                }
            }
            ManuscriptLine::TeamName(name) if mode == BucketMode::Officials => {
                if let Some(o) = make_official(None, &name, &team, options) {
                    team.officials.push(o);
                }
            }
            other => {
                debug!("parse_bucket: skipping {:?}: {:?}", line, other);
            }
        }
    }
    team
}

fn parse_sequential(lines: &[&str], options: &ParseOptions) -> ParsedGameSheet {
    let (a, b) = split_into_buckets(lines, options);
    debug!(
        "parse_sequential: team A: {:?} ({} lines), team B: {:?} ({} lines)",
        a.name,
        a.lines.len(),
        b.name,
        b.lines.len()
    );
    ParsedGameSheet {
        team_a: parse_bucket(&a, options),
        team_b: parse_bucket(&b, options),
        warnings: Vec::new(),
    }
}

/// Parses the OCR text of a handwritten scoresheet.
pub fn parse_manuscript(text: &str, options: &ParseOptions) -> ParsedGameSheet {
    if is_blank(text) {
        return empty_input_sheet();
    }
    let mut sheet = if is_swiss_tabular_format(text) {
        info!("parse_manuscript: Swiss tabular layout");
        swiss::parse_swiss_tabular(text, options)
    } else {
        info!("parse_manuscript: sequential layout");
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        parse_sequential(&lines, options)
    };
    for (team, label) in [(&sheet.team_a, "A"), (&sheet.team_b, "B")] {
        if team.name.is_empty() {
            sheet
                .warnings
                .push(format!("Team {} name could not be detected", label));
        }
    }
    add_missing_data_warnings(&mut sheet);
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let sheet = parse_manuscript("", &ParseOptions::default());
        assert_eq!(sheet.warnings, vec!["No OCR text provided".to_string()]);
        assert!(sheet.team_a.players.is_empty());
        assert!(sheet.team_b.players.is_empty());
    }

    fn classify(line: &str) -> ManuscriptLine {
        classify_manuscript_line(line, &ParseOptions::default())
    }

    #[test]
    fn line_classification() {
        assert_eq!(
            classify("Team A: VBC Bern"),
            ManuscriptLine::TeamMarker(TeamSide::A, Some("VBC Bern".to_string()))
        );
        assert_eq!(
            classify("ÉQUIPE B"),
            ManuscriptLine::TeamMarker(TeamSide::B, None)
        );
        assert_eq!(
            classify("Gast"),
            ManuscriptLine::TeamMarker(TeamSide::B, None)
        );
        assert_eq!(
            classify("7. MEIER Anna"),
            ManuscriptLine::Player(7, "MEIER Anna".to_string())
        );
        assert_eq!(
            classify("l2: KELLER Eva"),
            ManuscriptLine::Player(12, "KELLER Eva".to_string())
        );
        assert_eq!(
            classify("AC2 - Hans Muster"),
            ManuscriptLine::Official("AC2".to_string(), "Hans Muster".to_string())
        );
        assert_eq!(
            classify("Captain signature"),
            ManuscriptLine::Terminal
        );
        assert_eq!(
            classify("Officials"),
            ManuscriptLine::OfficialsMarker(None)
        );
        assert_eq!(
            classify("SG Uster"),
            ManuscriptLine::TeamName("SG Uster".to_string())
        );
        assert_eq!(classify("12 / 34"), ManuscriptLine::Other);
        assert_eq!(
            classify("M. Keller"),
            ManuscriptLine::TeamName("M. Keller".to_string())
        );
        let mut options = ParseOptions::default();
        options.official_roles.push(OfficialRole::M);
        assert_eq!(
            classify_manuscript_line("M. Keller", &options),
            ManuscriptLine::Official("M".to_string(), "Keller".to_string())
        );
    }

    #[test]
    fn sequential_with_markers() {
        let text = "\
Spielbericht
Team A: VBC Bern
1 MEIER Anna
l2. KELLER Eva 12.03.98
Coach: Hans Muster
AC Peter Beispiel
Team B
TV Muri
3 HUBER Nina
O7 FREI Mia
C: Ivo Trainer
Signature
5 LATE Row
";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Bern");
        assert_eq!(sheet.team_b.name, "TV Muri");

        let a = &sheet.team_a.players;
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].shirt_number, Some(1));
        assert_eq!(a[0].last_name, "Meier");
        assert_eq!(a[0].first_name, "Anna");
        assert_eq!(a[1].shirt_number, Some(12));
        assert_eq!(a[1].last_name, "Keller");
        assert_eq!(a[1].birth_date, Some("12.03.98".to_string()));

        let oa = &sheet.team_a.officials;
        assert_eq!(oa.len(), 2);
        assert_eq!(oa[0].role, OfficialRole::C);
        assert_eq!(oa[0].display_name, "Hans Muster");
        assert_eq!(oa[1].role, OfficialRole::AC);
        assert_eq!(oa[1].last_name, "Beispiel");

        let b = &sheet.team_b.players;
        assert_eq!(b.len(), 2);
        assert_eq!(b[1].shirt_number, Some(7));
        assert_eq!(b[1].last_name, "Frei");
        assert_eq!(sheet.team_b.officials.len(), 1);
        assert_eq!(sheet.team_b.officials[0].last_name, "Trainer");
        assert!(sheet.warnings.is_empty(), "{:?}", sheet.warnings);
    }

    #[test]
    fn sequential_without_markers() {
        let text = "VBC Bern\n1 MEIER Anna\n2 KELLER Eva\nTV Muri\n3 HUBER Nina\n";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Bern");
        assert_eq!(sheet.team_a.players.len(), 2);
        assert_eq!(sheet.team_b.name, "TV Muri");
        assert_eq!(sheet.team_b.players.len(), 1);
        assert!(sheet
            .warnings
            .contains(&"No officials found for either team".to_string()));
    }

    #[test]
    fn sequential_without_markers_with_officials() {
        let text = "VBC Bern\n1 MEIER Anna\n2 KELLER Eva\nCoach\nHans Muster\nTV Muri\n3 HUBER Nina\n";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.name, "VBC Bern");
        assert_eq!(sheet.team_a.players.len(), 2);
        assert_eq!(sheet.team_a.officials.len(), 1);
        assert_eq!(sheet.team_a.officials[0].role, OfficialRole::C);
        assert_eq!(sheet.team_a.officials[0].display_name, "Hans Muster");
        assert_eq!(sheet.team_b.name, "TV Muri");
        assert_eq!(sheet.team_b.players.len(), 1);
        assert_eq!(sheet.team_b.players[0].last_name, "Huber");
        assert!(sheet.warnings.is_empty(), "{:?}", sheet.warnings);
    }

    #[test]
    fn player_line_ends_the_officials_block() {
        let text = "VBC Bern\n1 MEIER Anna\nTrainer\nHans Muster\n2 KELLER Eva\nSG Uster\n3 HUBER Nina\n";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.players.len(), 2);
        assert_eq!(sheet.team_a.officials.len(), 1);
        assert_eq!(sheet.team_b.name, "SG Uster");
        assert_eq!(sheet.team_b.players.len(), 1);
    }

    #[test]
    fn initial_is_not_a_medical_role_by_default() {
        let text = "Team A: VBC Bern\n1 MEIER Anna\nOfficials\nM. Keller\nTeam B: TV Muri\n2 FREI Mia";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        let officials = &sheet.team_a.officials;
        assert_eq!(officials.len(), 1);
        assert_eq!(officials[0].role, OfficialRole::C);
        assert_eq!(officials[0].first_name, "M.");
        assert_eq!(officials[0].last_name, "Keller");
    }

    #[test]
    fn officials_mode_assigns_bench_roles() {
        let text = "Team A\n1 MEIER Anna\nOfficials\nHans Muster\nPeter Beispiel\nTeam B\n2 FREI Mia";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        let roles: Vec<OfficialRole> = sheet.team_a.officials.iter().map(|o| o.role).collect();
        assert_eq!(roles, vec![OfficialRole::C, OfficialRole::AC]);
        assert!(sheet
            .warnings
            .contains(&"Team A name could not be detected".to_string()));
    }

    #[test]
    fn medical_staff_needs_configuration() {
        let text = "Team A: VBC Bern\n1 MEIER Anna\nM: Dora Arzt\nTeam B: TV Muri\n2 FREI Mia";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert!(sheet.team_a.officials.is_empty());

        let mut options = ParseOptions::new(ScoresheetType::Manuscript);
        options.official_roles.push(OfficialRole::M);
        let sheet = parse_manuscript(text, &options);
        assert_eq!(sheet.team_a.officials[0].role, OfficialRole::M);
    }

    #[test]
    fn names_without_letters_are_dropped() {
        let text = "Team A: VBC Bern\n1 12.03.98\n2 MEIER Anna\nTeam B: TV Muri";
        let sheet = parse_manuscript(text, &ParseOptions::default());
        assert_eq!(sheet.team_a.players.len(), 1);
        assert_eq!(sheet.team_a.players[0].shirt_number, Some(2));
        assert!(sheet
            .warnings
            .contains(&"No players found for team B".to_string()));
    }
}
