// csv.rs: line-oriented CSV tokenizer producing header-keyed records
use crate::domain::RawRecord;
use tracing::debug;

/// Parses CSV text into records.
///
/// Blank lines are skipped everywhere. The first remaining line is the
/// header, split on plain commas. Data lines whose field count differs from
/// the header count are dropped.
pub fn parse(text: &str) -> Vec<RawRecord> {
    let mut lines = text.split('\n').filter(|line| !line.trim().is_empty());

    let headers: Vec<String> = match lines.next() {
        Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let fields = split_line(line);
        if fields.len() != headers.len() {
            debug!(
                line = idx + 2,
                expected = headers.len(),
                found = fields.len(),
                "Dropping CSV line with mismatched field count"
            );
            continue;
        }
        records.push(RawRecord::from_pairs(&headers, fields));
    }
    records
}

/// Splits one data line into trimmed fields, honoring double-quoted fields.
///
/// An unterminated quote absorbs the rest of the line into the current field.
pub fn split_line(line: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut field = String::with_capacity(16);
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                out.push(field.trim().to_string());
                field.clear();
            }
            other => field.push(other),
        }
    }
    out.push(field.trim().to_string());

    out
}
