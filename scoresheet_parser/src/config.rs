// ********* Input data structures ***********

use std::fmt::Display;
use std::str::FromStr;

/// The rectangle of a recognized word, in pixels of the source image.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A single word as returned by the OCR engine.
#[derive(PartialEq, Debug, Clone)]
pub struct OcrWord {
    pub text: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
}

/// A line recognized by the OCR engine, with the words that compose it.
#[derive(PartialEq, Debug, Clone)]
pub struct OcrLine {
    pub text: String,
    pub words: Vec<OcrWord>,
}

/// The full output of the OCR engine for one image.
///
/// Only the text is required. The recognized lines, when present, are used to
/// resolve the column of rows that do not carry data for both teams.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct OcrPage {
    pub full_text: String,
    pub lines: Vec<OcrLine>,
}

impl OcrPage {
    pub fn from_text(text: &str) -> OcrPage {
        OcrPage {
            full_text: text.to_string(),
            lines: Vec::new(),
        }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedPlayer {
    /// Between 1 and 99 when present.
    pub shirt_number: Option<u8>,
    pub last_name: String,
    pub first_name: String,
    pub display_name: String,
    pub raw_name: String,
    pub license_status: String,
    pub birth_date: Option<String>,
}

/// The role of a team official on the bench.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum OfficialRole {
    /// Coach
    C,
    /// Assistant coaches
    AC,
    AC2,
    AC3,
    AC4,
    /// Medical staff. Only a few manuscript sheets list it.
    M,
}

impl OfficialRole {
    pub const ALL: [OfficialRole; 6] = [
        OfficialRole::C,
        OfficialRole::AC,
        OfficialRole::AC2,
        OfficialRole::AC3,
        OfficialRole::AC4,
        OfficialRole::M,
    ];

    /// The role given to the n-th official of a team when the sheet does not
    /// say which role it is.
    pub fn nth_bench_role(idx: usize) -> Option<OfficialRole> {
        match idx {
            0 => Some(OfficialRole::C),
            1 => Some(OfficialRole::AC),
            2 => Some(OfficialRole::AC2),
            3 => Some(OfficialRole::AC3),
            4 => Some(OfficialRole::AC4),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            OfficialRole::C => "C",
            OfficialRole::AC => "AC",
            OfficialRole::AC2 => "AC2",
            OfficialRole::AC3 => "AC3",
            OfficialRole::AC4 => "AC4",
            OfficialRole::M => "M",
        }
    }
}

impl FromStr for OfficialRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "C" => Ok(OfficialRole::C),
            // Some sheets number the first assistant coach.
            "AC" | "AC1" => Ok(OfficialRole::AC),
            "AC2" => Ok(OfficialRole::AC2),
            "AC3" => Ok(OfficialRole::AC3),
            "AC4" => Ok(OfficialRole::AC4),
            "M" => Ok(OfficialRole::M),
            x => Err(format!("unknown official role {:?}", x)),
        }
    }
}

impl Display for OfficialRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedOfficial {
    pub role: OfficialRole,
    pub last_name: String,
    pub first_name: String,
    pub display_name: String,
    pub raw_name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedTeam {
    /// Empty when the name could not be found.
    pub name: String,
    /// In reading order.
    pub players: Vec<ParsedPlayer>,
    pub officials: Vec<ParsedOfficial>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedGameSheet {
    pub team_a: ParsedTeam,
    pub team_b: ParsedTeam,
    /// Everything that could not be determined, in the order it was noticed.
    pub warnings: Vec<String>,
}

impl ParsedGameSheet {
    pub fn total_players(&self) -> usize {
        self.team_a.players.len() + self.team_b.players.len()
    }

    /// True when no player could be read for either team. Callers usually treat
    /// this as a failed OCR pass.
    pub fn is_empty(&self) -> bool {
        self.total_players() == 0
    }
}

/// Which of the two teams of the sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TeamSide {
    A,
    B,
}

// ********* Configuration **********

/// The two layouts of scoresheets.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum ScoresheetType {
    #[default]
    Electronic,
    Manuscript,
}

impl FromStr for ScoresheetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "electronic" => Ok(ScoresheetType::Electronic),
            "manuscript" => Ok(ScoresheetType::Manuscript),
            x => Err(format!("unknown scoresheet type {:?}", x)),
        }
    }
}

pub const MAX_SHIRT_NUMBER: u8 = 99;
pub const MIN_SHIRT_NUMBER: u8 = 1;
/// Names shorter than this (in letters) are treated as noise.
pub const MIN_NAME_LENGTH: usize = 2;
/// How many lines above the header row are searched for the team names.
pub const HEADER_LOOKBACK_LINES: usize = 3;
pub const MAX_SWISS_PLAYERS_PER_TEAM: usize = 14;
/// Minimal share of letters in a line for it to be considered a team name.
pub const TEAM_NAME_LETTER_RATIO: f64 = 0.6;
/// Minimal share of digits for a field to be considered numeric.
pub const NUMERIC_HEAVY_RATIO: f64 = 0.5;
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.85;

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParseOptions {
    /// When not provided, the electronic layout is assumed.
    pub scoresheet_type: Option<ScoresheetType>,
    /// The roles that are accepted for officials. Lines with other roles are dropped.
    pub official_roles: Vec<OfficialRole>,
}

impl ParseOptions {
    pub fn new(scoresheet_type: ScoresheetType) -> ParseOptions {
        ParseOptions {
            scoresheet_type: Some(scoresheet_type),
            ..ParseOptions::default()
        }
    }

    pub fn accepts_role(&self, role: OfficialRole) -> bool {
        self.official_roles.contains(&role)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            scoresheet_type: None,
            official_roles: vec![
                OfficialRole::C,
                OfficialRole::AC,
                OfficialRole::AC2,
                OfficialRole::AC3,
                OfficialRole::AC4,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes() {
        for role in OfficialRole::ALL {
            assert_eq!(role.code().parse::<OfficialRole>(), Ok(role));
        }
        assert_eq!(" ac2 ".parse::<OfficialRole>(), Ok(OfficialRole::AC2));
        assert_eq!("AC1".parse::<OfficialRole>(), Ok(OfficialRole::AC));
        assert!("AC5".parse::<OfficialRole>().is_err());
        assert_eq!(OfficialRole::AC.to_string(), "AC");
    }
}
