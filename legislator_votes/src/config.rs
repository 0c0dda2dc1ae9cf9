// ********* Input data structures ***********

use std::collections::HashMap;
use std::fmt::Display;

/// One record as parsed from the input, column name to text.
///
/// All the values are text at this point: interpretation is deferred to
/// [`crate::normalize_vote`].
pub type RawRow = HashMap<String, String>;

/// The canonical name of one tallied vote, for example `HB1_2025`.
pub type BillColumnKey = String;

/// The votes of one person: bill column to raw cell text.
pub type PersonVotes = HashMap<BillColumnKey, String>;

/// The field names that never describe a bill.
pub const RESERVED_FIELDS: [&str; 8] = [
    "id",
    "person_id",
    "openstates_person_id",
    "name",
    "district",
    "party",
    "bill",
    "vote",
];

/// The id-like fields of a row, in priority order.
pub const ID_FIELDS: [&str; 3] = ["id", "person_id", "openstates_person_id"];

pub fn is_reserved_field(field: &str) -> bool {
    RESERVED_FIELDS.contains(&field)
}

/// An elected representative, as returned by the upstream lookup.
///
/// Multiple representatives may share a name in different districts. When
/// present, the primary id is authoritative.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Representative {
    pub primary_id: Option<String>,
    pub name: String,
    pub district: Option<String>,
    pub party: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub links: Vec<String>,
}

impl Representative {
    pub fn new(name: &str) -> Representative {
        Representative {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(self, id: &str) -> Representative {
        Representative {
            primary_id: Some(id.to_string()),
            ..self
        }
    }

    pub fn with_district(self, district: &str) -> Representative {
        Representative {
            district: Some(district.to_string()),
            ..self
        }
    }
}

/// The two shapes a vote dataset can take.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DataFormat {
    /// One row per (person, bill) vote, with `bill` and `vote` columns.
    Long,
    /// One row per person, one column per bill.
    Wide,
}

/// Declares which raw vote counts as supporting an issue.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Polarity {
    ForMeansSupport,
    AgainstMeansSupport,
}

impl Polarity {
    pub fn parse(s: &str) -> Option<Polarity> {
        match s.trim() {
            "FOR_MEANS_SUPPORT" => Some(Polarity::ForMeansSupport),
            "AGAINST_MEANS_SUPPORT" => Some(Polarity::AgainstMeansSupport),
            _ => None,
        }
    }
}

/// A policy issue: an ordered list of candidate bill columns, the most
/// representative first, with an optional polarity per column.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IssueDefinition {
    pub key: String,
    pub label: String,
    pub columns: Vec<BillColumnKey>,
    pub polarity: HashMap<BillColumnKey, Polarity>,
}

impl IssueDefinition {
    pub fn new(key: &str, label: &str, columns: &[&str]) -> IssueDefinition {
        IssueDefinition {
            key: key.to_string(),
            label: label.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            polarity: HashMap::new(),
        }
    }

    pub fn with_polarity(mut self, column: &str, polarity: Polarity) -> IssueDefinition {
        self.polarity.insert(column.to_string(), polarity);
        self
    }
}

// ******** Output data structures *********

/// How a representative voted.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Decision {
    For,
    Against,
    DidntVote,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::For => "FOR",
            Decision::Against => "AGAINST",
            Decision::DidntVote => "DIDNT_VOTE",
        }
    }
}

impl Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of one (representative, bill or issue) query.
///
/// `evidence_column` is only set when a column was found for this person.
/// `raw_cell` keeps the original text, including when it was not understood.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VerdictResult {
    pub decision: Decision,
    pub evidence_column: Option<BillColumnKey>,
    pub raw_cell: Option<String>,
}

impl VerdictResult {
    pub const UNKNOWN: VerdictResult = VerdictResult {
        decision: Decision::DidntVote,
        evidence_column: None,
        raw_cell: None,
    };
}

/// One entry of the list of votes of a representative.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct KeyVote {
    pub column: BillColumnKey,
    pub label: String,
    pub raw_cell: String,
    pub decision: Decision,
}
