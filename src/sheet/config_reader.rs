use crate::sheet::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OcrSource {
    /// text or ocr_json
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterSource {
    /// A or B
    pub team: String,
    /// players (default) or officials
    pub kind: Option<String>,
    /// json, csv or xlsx
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JobRules {
    #[serde(rename = "officialRoles")]
    pub official_roles: Option<Vec<String>>,
    #[serde(rename = "matchThreshold")]
    pub match_threshold: Option<f64>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(rename = "ocrSource")]
    pub ocr_source: Option<OcrSource>,
    #[serde(rename = "scoresheetType")]
    pub scoresheet_type: Option<String>,
    #[serde(rename = "rosterSources", default)]
    pub roster_sources: Vec<RosterSource>,
    pub rules: Option<JobRules>,
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
}

pub fn read_job_config(path: &str) -> BSheetResult<JobConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config: JobConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    debug!("read_job_config: {:?}", config);
    Ok(config)
}

pub fn read_reference(path: &str) -> BSheetResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
