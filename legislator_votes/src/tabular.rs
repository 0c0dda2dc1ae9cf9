// Primitives for reading delimited text.

use log::{debug, warn};

use crate::config::RawRow;

/// The result of parsing a delimited text: the header names and one mapping
/// per data record, in input order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Parses comma-separated text with a header row.
///
/// - quoted fields may contain commas, line breaks and doubled quotes
/// - a quote opens a quoted field only at the start of the field; inside an
///   unquoted field it is kept as a literal character (`5" ruler`)
/// - CRLF and LF line endings are both accepted, empty lines are dropped
/// - header names are trimmed, values are kept as they are
/// - missing trailing fields default to the empty string, extra fields are ignored
///
/// This never fails: a record that cannot be read is logged and skipped.
pub fn parse_delimited(text: &str) -> ParsedTable {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows: Vec<RawRow> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let record = match record_r {
            Ok(r) => r,
            Err(e) => {
                warn!("parse_delimited: skipping record {}: {}", idx, e);
                continue;
            }
        };
        if record.iter().all(|f| f.is_empty()) && record.len() <= 1 {
            continue;
        }
        match headers.as_ref() {
            None => {
                let hs: Vec<String> = record.iter().map(|h| h.trim().to_string()).collect();
                debug!("parse_delimited: headers: {:?}", hs);
                headers = Some(hs);
            }
            Some(hs) => {
                let row: RawRow = hs
                    .iter()
                    .enumerate()
                    .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
                    .collect();
                rows.push(row);
            }
        }
    }

    ParsedTable {
        headers: headers.unwrap_or_default(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        let text = "bill,note\r\n\"HB1, 2025\",\"He said \"\"yes\"\"\"\r\n";
        let t = parse_delimited(text);
        assert_eq!(t.headers, vec!["bill", "note"]);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0]["bill"], "HB1, 2025");
        assert_eq!(t.rows[0]["note"], "He said \"yes\"");
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let text = " id , name ,district\np1,Jane\np2,John,D1,extra\n";
        let t = parse_delimited(text);
        assert_eq!(t.headers, vec!["id", "name", "district"]);
        assert_eq!(t.rows[0]["district"], "");
        assert_eq!(t.rows[0]["name"], "Jane");
        assert_eq!(t.rows[1].len(), 3);
        assert_eq!(t.rows[1]["district"], "D1");
    }

    #[test]
    fn empty_lines_are_dropped() {
        let text = "id,name\n\np1,Jane\n\r\n\np2,John";
        let t = parse_delimited(text);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1]["id"], "p2");
    }

    #[test]
    fn quotes_inside_unquoted_fields_are_literal() {
        let t = parse_delimited("id,bill,vote\np1,HB 1 \"final\",Ye\"s\n");
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0]["bill"], "HB 1 \"final\"");
        assert_eq!(t.rows[0]["vote"], "Ye\"s");
    }

    #[test]
    fn empty_input() {
        let t = parse_delimited("");
        assert!(t.headers.is_empty());
        assert!(t.rows.is_empty());
    }

    #[test]
    fn values_are_not_trimmed() {
        let t = parse_delimited("id,HB1\np1, Yes \n");
        assert_eq!(t.rows[0]["HB1"], " Yes ");
    }
}
