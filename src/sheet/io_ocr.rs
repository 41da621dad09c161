// Readers for the output of the OCR engine.

use scoresheet_parser::{BoundingBox, OcrLine, OcrPage, OcrWord};

use crate::sheet::*;

fn js_f64(js: &JSValue, key: &str) -> f64 {
    js.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn word_from_json(js: &JSValue) -> Option<OcrWord> {
    let text = js.get("text")?.as_str()?.to_string();
    let bbox = match js.get("bbox") {
        Some(b) => BoundingBox {
            x0: js_f64(b, "x0"),
            y0: js_f64(b, "y0"),
            x1: js_f64(b, "x1"),
            y1: js_f64(b, "y1"),
        },
        None => BoundingBox::default(),
    };
    Some(OcrWord {
        text,
        confidence: js_f64(js, "confidence"),
        bbox,
    })
}

fn line_from_json(js: &JSValue) -> Option<OcrLine> {
    let words: Vec<OcrWord> = js
        .get("words")
        .and_then(|w| w.as_array())
        .map(|arr| arr.iter().filter_map(word_from_json).collect())
        .unwrap_or_default();
    let text = match js.get("text").and_then(|t| t.as_str()) {
        Some(t) => t.to_string(),
        None if !words.is_empty() => words
            .iter()
            .map(|w| w.text.clone())
            .collect::<Vec<String>>()
            .join(" "),
        None => return None,
    };
    Some(OcrLine { text, words })
}

/// Reads the JSON output of the OCR engine.
///
/// The text is read from `text`, or `fullText`. A text that is not a string
/// is read as an empty text. The lines and their words are optional.
pub fn page_from_json(js: &JSValue) -> OcrPage {
    let text_js = js
        .get("text")
        .filter(|v| !v.is_null())
        .or_else(|| js.get("fullText"));
    let full_text = match text_js {
        Some(JSValue::String(s)) => s.clone(),
        Some(other) => {
            warn!("page_from_json: the text is not a string: {:?}", other);
            String::new()
        }
        None => String::new(),
    };
    let lines: Vec<OcrLine> = js
        .get("lines")
        .and_then(|l| l.as_array())
        .map(|arr| arr.iter().filter_map(line_from_json).collect())
        .unwrap_or_default();
    debug!(
        "page_from_json: {} characters, {} lines with boxes",
        full_text.len(),
        lines.len()
    );
    OcrPage { full_text, lines }
}

pub fn read_ocr_input(path: &str, input_type: &str) -> BSheetResult<OcrPage> {
    info!(
        "Attempting to read OCR file {:?} ({})",
        simplify_file_name(path),
        input_type
    );
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    match input_type {
        "text" => Ok(OcrPage::from_text(&contents)),
        "ocr_json" => {
            let js: JSValue = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
            Ok(page_from_json(&js))
        }
        x => Err(Box::new(SheetError::UnknownType {
            what: "input".to_string(),
            value: x.to_string(),
        })),
    }
}
