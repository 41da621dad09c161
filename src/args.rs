use clap::Parser;

/// This program reads the OCR output of a volleyball scoresheet and compares the
/// teams with their rosters.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the job: the OCR source, the rosters and the rules.
    /// The paths in this file are relative to its directory.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the expected output in JSON format. If provided, sheetocr will
    /// check that the output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the result will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The OCR output to read. Setting this option overrides the source that may be specified
    /// with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (text or ocr_json) The type of the input. By default, .json files are read as ocr_json
    /// and all other files as text.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default electronic) The layout of the scoresheet: electronic or manuscript.
    #[clap(long, value_parser)]
    pub sheet_type: Option<String>,

    /// (file path) The roster of the players of team A.
    #[clap(long, value_parser)]
    pub roster_a: Option<String>,

    /// (file path) The roster of the players of team B.
    #[clap(long, value_parser)]
    pub roster_b: Option<String>,

    /// (json, csv or xlsx) The type of the roster files. By default, it is guessed from the extension.
    #[clap(long, value_parser)]
    pub roster_type: Option<String>,

    /// When using an Excel roster, indicates the name of the worksheet to use. The first worksheet
    /// is used otherwise.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (list of comma-separated values, default C,AC,AC2,AC3,AC4) The roles accepted for the officials.
    #[clap(long, value_parser, value_delimiter = ',')]
    pub official_roles: Option<Vec<String>>,

    /// (default 0.85) The minimal similarity, between 0 and 1, for a name to match a roster entry.
    #[clap(long, value_parser)]
    pub threshold: Option<f64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
