use regex::Regex;
use std::sync::LazyLock;

use crate::config::BillColumnKey;

// Legislative prefixes, longest first so that HJR is not read as HB..
static BILL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(HJR|SJR|HCR|SCR|HB|SB|HR|SR)[\s._-]*0*(\d+)\b(?:[\s,_/()-]+((?:19|20)\d{2})\b)?")
        .unwrap()
});

static NON_ALNUM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// The bill type, number and year recognized in a free text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BillRef {
    pub prefix: String,
    pub number: String,
    pub year: Option<String>,
}

impl BillRef {
    pub fn column_key(&self) -> BillColumnKey {
        match &self.year {
            Some(y) => format!("{}{}_{}", self.prefix, self.number, y),
            None => format!("{}{}", self.prefix, self.number),
        }
    }

    pub fn label(&self) -> String {
        match &self.year {
            Some(y) => format!("{} {} ({})", self.prefix, self.number, y),
            None => format!("{} {}", self.prefix, self.number),
        }
    }
}

pub fn find_bill_ref(text: &str) -> Option<BillRef> {
    let caps = BILL_REGEX.captures(text)?;
    Some(BillRef {
        prefix: caps.get(1)?.as_str().to_uppercase(),
        number: caps.get(2)?.as_str().to_string(),
        year: caps.get(3).map(|m| m.as_str().to_string()),
    })
}

/// Collapses every run of non alphanumeric characters to an underscore and
/// upper-cases the rest. Leading and trailing underscores are dropped.
pub fn underscore_key(text: &str) -> String {
    NON_ALNUM_REGEX
        .replace_all(text, "_")
        .trim_matches('_')
        .to_uppercase()
}

/// The canonical column key for the free-text bill field of a long-format row.
///
/// Returns `None` when nothing usable is left.
pub fn bill_column_key(text: &str) -> Option<BillColumnKey> {
    let key = match find_bill_ref(&text.replace('_', " ")) {
        Some(br) => br.column_key(),
        None => underscore_key(text),
    };
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// A human-readable label for a column key: `HB 1 (2025)` for `HB1_2025`.
/// Keys without a recognizable bill are shown in their underscore form
/// (see [`underscore_key`]).
pub fn bill_label(column: &str) -> String {
    match find_bill_ref(&column.replace('_', " ")) {
        Some(br) => br.label(),
        None => underscore_key(column),
    }
}
