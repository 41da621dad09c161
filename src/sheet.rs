use log::{debug, info, warn};

use scoresheet_parser::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

mod config_reader;
mod io_common;
mod io_ocr;
mod io_roster;

use crate::sheet::config_reader::*;
use crate::sheet::io_common::*;
use crate::sheet::io_ocr::*;
use crate::sheet::io_roster::*;

#[derive(Debug, Snafu)]
pub enum SheetError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The roster {path} is empty"))]
    EmptyRoster { path: String },
    #[snafu(display("Worksheet {name:?} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("The roster {path} needs an id column and a name column"))]
    MissingColumn { path: String },
    #[snafu(display("The job file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("No OCR input: use --input or the ocrSource of the job file"))]
    MissingInput {},
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown {what} type {value:?}"))]
    UnknownType { what: String, value: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SheetResult<T> = Result<T, SheetError>;
pub type BSheetResult<T> = Result<T, Box<SheetError>>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RosterKind {
    Players,
    Officials,
}

/// A roster to read, and the team it is compared with.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterSpec {
    pub side: TeamSide,
    pub kind: RosterKind,
    /// json, csv or xlsx
    pub provider: String,
    pub path: String,
    pub worksheet: Option<String>,
}

/// Everything a run needs, once the command line and the job file are merged.
#[derive(PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub input_type: String,
    pub parse_options: ParseOptions,
    pub compare_options: CompareOptions,
    pub rosters: Vec<RosterSpec>,
    /// None for the standard output.
    pub out: Option<String>,
    pub reference: Option<String>,
}

fn validate_options(
    sheet_type: Option<&str>,
    official_roles: Option<&[String]>,
    threshold: Option<f64>,
) -> SheetResult<(ParseOptions, CompareOptions)> {
    let mut parse_options = ParseOptions::default();
    if let Some(st) = sheet_type {
        match st.parse::<ScoresheetType>() {
            Ok(x) => parse_options.scoresheet_type = Some(x),
            Err(e) => whatever!("Invalid sheet type: {}", e),
        }
    }
    if let Some(roles) = official_roles {
        let mut res: Vec<OfficialRole> = Vec::new();
        for r in roles.iter().filter(|r| !r.trim().is_empty()) {
            match r.parse::<OfficialRole>() {
                Ok(x) if !res.contains(&x) => res.push(x),
                Ok(_) => {}
                Err(e) => whatever!("Invalid official role: {}", e),
            }
        }
        if res.is_empty() {
            whatever!("At least one official role must be accepted")
        }
        parse_options.official_roles = res;
    }

    let mut compare_options = CompareOptions::default();
    if let Some(t) = threshold {
        if !(0.0..=1.0).contains(&t) {
            whatever!("The threshold must be between 0 and 1, but it was {}", t)
        }
        compare_options.threshold = t;
    }
    Ok((parse_options, compare_options))
}

fn roster_spec(
    team: &str,
    kind: Option<&str>,
    provider: Option<String>,
    path: String,
    worksheet: Option<String>,
) -> SheetResult<RosterSpec> {
    let side = match team.trim().to_uppercase().as_str() {
        "A" => TeamSide::A,
        "B" => TeamSide::B,
        x => whatever!("Invalid team {:?}: expected A or B", x),
    };
    let kind = match kind.map(|k| k.trim().to_lowercase()).as_deref() {
        None | Some("players") => RosterKind::Players,
        Some("officials") => RosterKind::Officials,
        Some(x) => whatever!("Invalid roster kind {:?}: expected players or officials", x),
    };
    let provider = provider.unwrap_or_else(|| roster_type_from_path(&path));
    Ok(RosterSpec {
        side,
        kind,
        provider,
        path,
        worksheet,
    })
}

/// Merges the command line with the job file, if any. The command line wins.
pub fn build_settings(args: &Args) -> BSheetResult<RunSettings> {
    let job: Option<(JobConfig, PathBuf)> = match &args.config {
        Some(config_path) => {
            let config = read_job_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?;
            Some((config, root_p.to_path_buf()))
        }
        None => None,
    };

    let (input_path, input_type) = match (&args.input, &job) {
        (Some(p), _) => (p.clone(), args.input_type.clone()),
        (None, Some((config, root_p))) => {
            let source = config.ocr_source.as_ref().context(MissingInputSnafu {})?;
            (
                resolve_path(root_p, &source.file_path),
                args.input_type.clone().or_else(|| source.provider.clone()),
            )
        }
        (None, None) => return Err(Box::new(SheetError::MissingInput {})),
    };
    let input_type = input_type.unwrap_or_else(|| input_type_from_path(&input_path));

    let rules = job.as_ref().and_then(|(c, _)| c.rules.clone());
    let sheet_type = args
        .sheet_type
        .clone()
        .or_else(|| job.as_ref().and_then(|(c, _)| c.scoresheet_type.clone()));
    let official_roles = args
        .official_roles
        .clone()
        .or_else(|| rules.as_ref().and_then(|r| r.official_roles.clone()));
    let threshold = args
        .threshold
        .or_else(|| rules.as_ref().and_then(|r| r.match_threshold));
    let (parse_options, compare_options) =
        validate_options(sheet_type.as_deref(), official_roles.as_deref(), threshold)?;

    let mut rosters: Vec<RosterSpec> = Vec::new();
    if let Some((config, root_p)) = &job {
        for source in config.roster_sources.iter() {
            rosters.push(roster_spec(
                &source.team,
                source.kind.as_deref(),
                source.provider.clone(),
                resolve_path(root_p, &source.file_path),
                source
                    .excel_worksheet_name
                    .clone()
                    .or_else(|| args.excel_worksheet_name.clone()),
            )?);
        }
    }
    for (team, roster_p) in [("A", &args.roster_a), ("B", &args.roster_b)] {
        if let Some(p) = roster_p {
            let spec = roster_spec(
                team,
                None,
                args.roster_type.clone(),
                p.clone(),
                args.excel_worksheet_name.clone(),
            )?;
            // Replaces the players roster of the job file for the same team.
            rosters.retain(|r| !(r.side == spec.side && r.kind == spec.kind));
            rosters.push(spec);
        }
    }

    let out = match &args.out {
        Some(p) => Some(p.clone()),
        None => job.as_ref().and_then(|(c, root_p)| {
            c.output_settings
                .as_ref()
                .and_then(|o| o.output_path.as_ref())
                .map(|p| resolve_path(root_p, p))
        }),
    }
    .filter(|p| !p.is_empty() && p != "stdout");

    Ok(RunSettings {
        input_path,
        input_type,
        parse_options,
        compare_options,
        rosters,
        out,
        reference: args.reference.clone(),
    })
}

// ********* Output **********

fn player_to_js(p: &ParsedPlayer) -> JSValue {
    json!({
        "shirtNumber": p.shirt_number,
        "lastName": p.last_name,
        "firstName": p.first_name,
        "displayName": p.display_name,
        "rawName": p.raw_name,
        "licenseStatus": p.license_status,
        "birthDate": p.birth_date,
    })
}

fn official_to_js(o: &ParsedOfficial) -> JSValue {
    json!({
        "role": o.role.to_string(),
        "lastName": o.last_name,
        "firstName": o.first_name,
        "displayName": o.display_name,
        "rawName": o.raw_name,
    })
}

fn team_to_js(team: &ParsedTeam) -> JSValue {
    let players: Vec<JSValue> = team.players.iter().map(player_to_js).collect();
    let officials: Vec<JSValue> = team.officials.iter().map(official_to_js).collect();
    json!({
        "name": team.name,
        "players": players,
        "officials": officials,
    })
}

fn round_confidence(c: f64) -> f64 {
    (c * 1000.0).round() / 1000.0
}

fn comparison_to_js<T>(
    spec: &RosterSpec,
    results: &[ComparisonResult<T>],
    ocr_to_js: fn(&T) -> JSValue,
) -> JSValue {
    let summary = summarize(results);
    let results_js: Vec<JSValue> = results
        .iter()
        .map(|r| {
            json!({
                "status": r.status(),
                "ocr": r.ocr().map(ocr_to_js),
                "rosterId": r.roster_id(),
                "confidence": round_confidence(r.confidence()),
            })
        })
        .collect();
    let team = match spec.side {
        TeamSide::A => "A",
        TeamSide::B => "B",
    };
    let kind = match spec.kind {
        RosterKind::Players => "players",
        RosterKind::Officials => "officials",
    };
    json!({
        "team": team,
        "kind": kind,
        "summary": {
            "matched": summary.matched,
            "ocrOnly": summary.ocr_only,
            "rosterOnly": summary.roster_only,
        },
        "results": results_js,
    })
}

fn compare_with_roster(
    sheet: &ParsedGameSheet,
    spec: &RosterSpec,
    roster: &[RosterEntry],
    options: &CompareOptions,
) -> JSValue {
    let team = match spec.side {
        TeamSide::A => &sheet.team_a,
        TeamSide::B => &sheet.team_b,
    };
    match spec.kind {
        RosterKind::Players => {
            let results = compare_rosters(&team.players, roster, options);
            comparison_to_js(spec, &results, player_to_js)
        }
        RosterKind::Officials => {
            let results = compare_rosters(&team.officials, roster, options);
            comparison_to_js(spec, &results, official_to_js)
        }
    }
}

fn build_output_js(sheet: &ParsedGameSheet, comparisons: Vec<JSValue>) -> JSValue {
    json!({
        "teamA": team_to_js(&sheet.team_a),
        "teamB": team_to_js(&sheet.team_b),
        "warnings": sheet.warnings,
        "comparisons": comparisons,
    })
}

fn write_output(out: Option<&str>, pretty_js: &str) -> BSheetResult<()> {
    match out {
        Some(path) => {
            info!("Writing the result to {:?}", simplify_file_name(path));
            fs::write(path, pretty_js).context(WritingOutputSnafu { path })?;
        }
        None => println!("{}", pretty_js),
    }
    Ok(())
}

fn check_reference(reference_js: &JSValue, pretty_js: &str) -> SheetResult<()> {
    let pretty_js_ref = serde_json::to_string_pretty(reference_js).context(ParsingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference output");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        whatever!("Difference detected between the output and the reference")
    }
    Ok(())
}

pub fn run(args: &Args) -> BSheetResult<()> {
    let settings = build_settings(args)?;
    info!("settings: {:?}", settings);

    let page = read_ocr_input(&settings.input_path, &settings.input_type)?;
    let sheet = parse_game_sheet(&page, &settings.parse_options);
    info!(
        "Read {} players for {:?} and {} players for {:?}",
        sheet.team_a.players.len(),
        sheet.team_a.name,
        sheet.team_b.players.len(),
        sheet.team_b.name
    );
    for w in sheet.warnings.iter() {
        warn!("{}", w);
    }

    let mut comparisons: Vec<JSValue> = Vec::new();
    for spec in settings.rosters.iter() {
        let roster = read_roster(&spec.path, &spec.provider, spec.worksheet.as_deref())?;
        let js = compare_with_roster(&sheet, spec, &roster, &settings.compare_options);
        debug!("run: comparison: {}", js);
        comparisons.push(js);
    }

    let result_js = build_output_js(&sheet, comparisons);
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    write_output(settings.out.as_deref(), &pretty_js)?;

    // The reference output, if provided for comparison
    if let Some(reference_p) = &settings.reference {
        let reference_js = read_reference(reference_p)?;
        check_reference(&reference_js, &pretty_js)?;
    }
    Ok(())
}
