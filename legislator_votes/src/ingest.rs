// Converts JSON vote payloads into rows.
//
// This is the only place that looks at the shape of the input. Every value
// becomes text here.

use log::{debug, warn};
use serde_json::Value as JSValue;

use crate::config::{RawRow, ID_FIELDS};

/// The text of a JSON value: strings as they are, numbers and booleans
/// printed, null as the empty string. Nested values are kept as compact JSON.
pub fn cell_text(v: &JSValue) -> String {
    match v {
        JSValue::String(s) => s.clone(),
        JSValue::Null => "".to_string(),
        JSValue::Number(n) => n.to_string(),
        JSValue::Bool(b) => b.to_string(),
        x => x.to_string(),
    }
}

fn object_row(obj: &serde_json::Map<String, JSValue>) -> RawRow {
    obj.iter()
        .map(|(k, v)| (k.trim().to_string(), cell_text(v)))
        .collect()
}

fn has_id(row: &RawRow) -> bool {
    ID_FIELDS
        .iter()
        .any(|k| row.get(*k).map(|v| !v.trim().is_empty()).unwrap_or(false))
}

/// Reads a JSON vote payload.
///
/// Two encodings are accepted:
/// - an array of row objects (long or wide)
/// - an object keyed by identity, whose values are either one row object or
///   an array of `{bill, vote}` records. The key is used as the `id` of the
///   rows that do not carry one.
///
/// Anything else gives no rows.
pub fn rows_from_json(js: &JSValue) -> Vec<RawRow> {
    match js {
        JSValue::Array(elts) => elts
            .iter()
            .enumerate()
            .filter_map(|(idx, elt)| match elt {
                JSValue::Object(obj) => Some(object_row(obj)),
                x => {
                    warn!("rows_from_json: skipping element {}: {}", idx, x);
                    None
                }
            })
            .collect(),
        JSValue::Object(by_identity) => {
            let mut rows: Vec<RawRow> = Vec::new();
            for (key, entry) in by_identity.iter() {
                match entry {
                    JSValue::Object(obj) => rows.push(keyed_row(key, object_row(obj))),
                    JSValue::Array(records) => {
                        for rec in records.iter() {
                            match rec {
                                JSValue::Object(obj) => {
                                    rows.push(keyed_row(key, object_row(obj)))
                                }
                                x => warn!("rows_from_json: skipping record of {}: {}", key, x),
                            }
                        }
                    }
                    x => warn!("rows_from_json: skipping entry {}: {}", key, x),
                }
            }
            debug!("rows_from_json: {} rows from keyed object", rows.len());
            rows
        }
        x => {
            warn!("rows_from_json: unsupported payload {}", x);
            Vec::new()
        }
    }
}

fn keyed_row(key: &str, mut row: RawRow) -> RawRow {
    if !has_id(&row) {
        row.insert("id".to_string(), key.to_string());
    }
    row
}
