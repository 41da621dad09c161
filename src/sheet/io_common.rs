use std::path::{Path, PathBuf};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Resolves a path of the job file against the directory of the job file.
/// Absolute paths are kept as they are.
pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = [root, Path::new(file_path)].iter().collect();
    p.as_path().display().to_string()
}

fn extension(path: &str) -> Option<String> {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// The type of an OCR input when it is not given: `.json` files are the full
/// output of the OCR engine, anything else is plain text.
pub fn input_type_from_path(path: &str) -> String {
    match extension(path).as_deref() {
        Some("json") => "ocr_json".to_string(),
        _ => "text".to_string(),
    }
}

/// The type of a roster file when it is not given.
pub fn roster_type_from_path(path: &str) -> String {
    match extension(path).as_deref() {
        Some("csv") => "csv".to_string(),
        Some("xlsx") => "xlsx".to_string(),
        _ => "json".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_from_extensions() {
        assert_eq!(input_type_from_path("scan.JSON"), "ocr_json");
        assert_eq!(input_type_from_path("scan.txt"), "text");
        assert_eq!(input_type_from_path("scan"), "text");
        assert_eq!(roster_type_from_path("a/bern.csv"), "csv");
        assert_eq!(roster_type_from_path("bern.xlsx"), "xlsx");
        assert_eq!(roster_type_from_path("bern.json"), "json");
    }

    #[test]
    fn paths() {
        assert_eq!(simplify_file_name("a/b/bern.csv"), "bern.csv");
        let root = Path::new("jobs");
        assert_eq!(
            resolve_path(root, "bern.csv"),
            Path::new("jobs").join("bern.csv").display().to_string()
        );
        assert_eq!(resolve_path(Path::new(""), "bern.csv"), "bern.csv");
    }
}
