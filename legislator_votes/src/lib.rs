/*!
Finds how elected representatives voted on bills and policy issues.

The vote records may come in many shapes: one row per vote (long format) or
one row per person with a column per bill (wide format), as comma-separated
text or as JSON. They are all turned into a [`VoteTable`], in which each
person can be found by id, by name, or by name and district. Queries on the
table return a [`VerdictResult`]: supported, opposed or did not vote, along
with the column and the raw cell used as evidence.

```
use legislator_votes::*;

let text = "id,name,district,HB1_2025,HB2_2025\np1,Jane Doe,District 5,Yes,No\n";
let table = vote_table_from_text(text);
let rep = Representative::new("Jane Doe").with_id("p1");

let v = resolve_bill(&rep, &table, Some("HB2_2025"));
assert_eq!(v.decision, Decision::Against);
assert_eq!(v.raw_cell.as_deref(), Some("No"));
```

Everything here is synchronous and never fails: missing or unreadable data
degrades to "did not vote" or to empty results.
*/

pub mod builder;
mod config;
pub mod district;
pub mod identity;
pub mod ingest;
pub mod issue;
pub mod label;
pub mod manual;
pub mod normalize;
pub mod table;
pub mod tabular;

use log::info;
use serde_json::Value as JSValue;

pub use crate::builder::{build_vote_table, detect_format};
pub use crate::config::*;
pub use crate::identity::{resolve_person, IdentityKey};
pub use crate::issue::{key_votes, resolve_bill, resolve_issue};
pub use crate::label::bill_label;
pub use crate::normalize::normalize_vote;
pub use crate::table::{bill_columns, VoteTable};

/// What to look up for each representative.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Query {
    /// A single bill column, if one was selected.
    Bill(Option<BillColumnKey>),
    Issue(IssueDefinition),
}

impl Query {
    pub fn verdict(&self, rep: &Representative, table: &VoteTable) -> VerdictResult {
        match self {
            Query::Bill(column) => resolve_bill(rep, table, column.as_deref()),
            Query::Issue(issue) => issue.resolve(rep, table),
        }
    }
}

/// Builds the vote table of a comma-separated text.
pub fn vote_table_from_text(text: &str) -> VoteTable {
    let parsed = tabular::parse_delimited(text);
    info!(
        "vote_table_from_text: {} columns, {} rows",
        parsed.headers.len(),
        parsed.rows.len()
    );
    build_vote_table(&parsed.rows)
}

/// Builds the vote table of a JSON payload (see [`ingest::rows_from_json`]).
pub fn vote_table_from_json(js: &JSValue) -> VoteTable {
    let rows = ingest::rows_from_json(js);
    info!("vote_table_from_json: {} rows", rows.len());
    build_vote_table(&rows)
}

/// Runs a query for every representative, in order.
pub fn run_verdicts(
    reps: &[Representative],
    table: &VoteTable,
    query: &Query,
) -> Vec<VerdictResult> {
    reps.iter().map(|r| query.verdict(r, table)).collect()
}
