mod config;

pub mod corrections;
pub mod electronic;
pub mod manual;
pub mod manuscript;
pub mod roster;
pub mod splitters;

use log::info;

pub use crate::config::*;
pub use crate::roster::{
    compare_rosters, name_similarity, summarize, CompareOptions, ComparisonResult,
    ComparisonSummary, NamedPerson, RosterEntry,
};

// **** Shared by the parsers ****

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// The sheet returned when there is no text at all.
pub(crate) fn empty_input_sheet() -> ParsedGameSheet {
    ParsedGameSheet {
        warnings: vec!["No OCR text provided".to_string()],
        ..ParsedGameSheet::default()
    }
}

/// Adds a warning for each team without players, and one when neither team
/// has officials.
pub(crate) fn add_missing_data_warnings(sheet: &mut ParsedGameSheet) {
    if sheet.team_a.players.is_empty() {
        sheet
            .warnings
            .push("No players found for team A".to_string());
    }
    if sheet.team_b.players.is_empty() {
        sheet
            .warnings
            .push("No players found for team B".to_string());
    }
    if sheet.team_a.officials.is_empty() && sheet.team_b.officials.is_empty() {
        sheet
            .warnings
            .push("No officials found for either team".to_string());
    }
}

/// Parses the OCR output of a scoresheet.
///
/// The layout is chosen by `options.scoresheet_type`. The electronic layout is
/// used when it is not set: the layout is never guessed from the text.
///
/// This function never fails. Whatever could not be read is reported in the
/// warnings of the returned sheet.
///
/// ```
/// use scoresheet_parser::{parse_game_sheet_with_type, ParseOptions, ScoresheetType};
///
/// let text = "Team A: VBC Bern\n1 MEIER Anna\nC Hans Muster\nTeam B: TV Muri\n7 FREI Mia";
/// let sheet = parse_game_sheet_with_type(text, &ParseOptions::new(ScoresheetType::Manuscript));
///
/// assert_eq!(sheet.team_a.name, "VBC Bern");
/// assert_eq!(sheet.team_a.players[0].last_name, "Meier");
/// assert_eq!(sheet.team_b.players[0].shirt_number, Some(7));
/// assert!(sheet.warnings.is_empty());
/// ```
pub fn parse_game_sheet(page: &OcrPage, options: &ParseOptions) -> ParsedGameSheet {
    let scoresheet_type = options.scoresheet_type.unwrap_or_default();
    info!("parse_game_sheet: {:?} layout", scoresheet_type);
    match scoresheet_type {
        ScoresheetType::Manuscript => manuscript::parse_manuscript(&page.full_text, options),
        ScoresheetType::Electronic => electronic::parse_electronic(page, options),
    }
}

/// Same as [parse_game_sheet], from the text only.
pub fn parse_game_sheet_with_type(text: &str, options: &ParseOptions) -> ParsedGameSheet {
    parse_game_sheet(&OcrPage::from_text(text), options)
}
