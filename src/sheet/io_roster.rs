// Readers for the rosters: JSON, CSV and Excel files.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use scoresheet_parser::RosterEntry;

use crate::sheet::*;

/// The columns of a roster table.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RosterColumns {
    pub id: usize,
    pub display_name: Option<usize>,
    pub first_name: Option<usize>,
    pub last_name: Option<usize>,
}

impl RosterColumns {
    /// Finds the columns from the header row. The names are case-insensitive, and
    /// spaces and underscores are ignored. Returns None without an id column, or
    /// without any name column.
    pub fn from_header(header: &[String]) -> Option<RosterColumns> {
        let mut id = None;
        let mut display_name = None;
        let mut first_name = None;
        let mut last_name = None;
        for (idx, h) in header.iter().enumerate() {
            let key: String = h
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '_')
                .collect::<String>()
                .to_lowercase();
            match key.as_str() {
                "id" if id.is_none() => id = Some(idx),
                "displayname" | "name" if display_name.is_none() => display_name = Some(idx),
                "firstname" if first_name.is_none() => first_name = Some(idx),
                "lastname" if last_name.is_none() => last_name = Some(idx),
                _ => {}
            }
        }
        if display_name.is_none() && first_name.is_none() && last_name.is_none() {
            return None;
        }
        Some(RosterColumns {
            id: id?,
            display_name,
            first_name,
            last_name,
        })
    }

    /// Builds an entry from the cells of a row. Rows without id are skipped.
    fn entry(&self, row: &[String]) -> Option<RosterEntry> {
        let get = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let id = get(Some(self.id))?;
        Some(RosterEntry {
            id,
            display_name: get(self.display_name).unwrap_or_default(),
            first_name: get(self.first_name),
            last_name: get(self.last_name),
        })
    }
}

fn js_string(js: Option<&JSValue>) -> Option<String> {
    match js {
        Some(JSValue::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(JSValue::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a roster from a JSON array of `{ id, displayName, firstName, lastName }`.
/// The ids may be strings or numbers.
pub fn roster_from_json(js: &JSValue) -> SheetResult<Vec<RosterEntry>> {
    let arr = match js.as_array() {
        Some(arr) => arr,
        None => whatever!("A JSON roster must be an array, found {}", js),
    };
    let mut res: Vec<RosterEntry> = Vec::new();
    for (idx, elt) in arr.iter().enumerate() {
        let id = match js_string(elt.get("id")) {
            Some(id) => id,
            None => whatever!("Roster entry {} has no id: {}", idx, elt),
        };
        res.push(RosterEntry {
            id,
            display_name: js_string(elt.get("displayName")).unwrap_or_default(),
            first_name: js_string(elt.get("firstName")),
            last_name: js_string(elt.get("lastName")),
        });
    }
    Ok(res)
}

fn read_json_roster(path: &str) -> BSheetResult<Vec<RosterEntry>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(roster_from_json(&js)?)
}

fn read_table(path: &str, rows: Vec<Vec<String>>) -> BSheetResult<Vec<RosterEntry>> {
    let mut iter = rows.into_iter();
    let header = iter.next().context(EmptyRosterSnafu { path })?;
    debug!("read_table: header: {:?}", header);
    let columns = RosterColumns::from_header(&header).context(MissingColumnSnafu { path })?;
    let mut res: Vec<RosterEntry> = Vec::new();
    for (idx, row) in iter.enumerate() {
        match columns.entry(&row) {
            Some(e) => res.push(e),
            None => debug!("read_table: line {}: no id, skipping {:?}", idx + 2, row),
        }
    }
    Ok(res)
}

fn read_csv_roster(path: &str) -> BSheetResult<Vec<RosterEntry>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu { lineno: idx + 1 })?;
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    read_table(path, rows)
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        // Ids are often stored as floats by the spreadsheets.
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn read_excel_roster(path: &str, worksheet_name: Option<&str>) -> BSheetResult<Vec<RosterEntry>> {
    debug!(
        "read_excel_roster: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet_name {
        // A worksheet name was provided, use it.
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { path, name })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyRosterSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    let rows: Vec<Vec<String>> = wrange
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    read_table(path, rows)
}

pub fn read_roster(
    path: &str,
    provider: &str,
    worksheet_name: Option<&str>,
) -> BSheetResult<Vec<RosterEntry>> {
    info!(
        "Attempting to read roster file {:?} ({})",
        simplify_file_name(path),
        provider
    );
    let roster = match provider {
        "json" => read_json_roster(path),
        "csv" => read_csv_roster(path),
        "xlsx" => read_excel_roster(path, worksheet_name),
        x => Err(Box::new(SheetError::UnknownType {
            what: "roster".to_string(),
            value: x.to_string(),
        })),
    }?;
    debug!("read_roster: {} entries", roster.len());
    Ok(roster)
}
