use log::debug;
use std::collections::HashMap;

use crate::config::*;
use crate::identity::resolve_person;
use crate::label::bill_label;
use crate::normalize::normalize_vote;
use crate::table::VoteTable;

/// How a representative voted on a single bill column.
///
/// - no column: did not vote, without evidence
/// - column absent for this person: did not vote, with the column as evidence
/// - cell not understood (including empty): did not vote, with the raw cell
pub fn resolve_bill(
    rep: &Representative,
    table: &VoteTable,
    column: Option<&str>,
) -> VerdictResult {
    let column = match column {
        Some(c) => c,
        None => return VerdictResult::UNKNOWN,
    };
    let votes = resolve_person(rep, table);
    match votes.get(column) {
        None => VerdictResult {
            decision: Decision::DidntVote,
            evidence_column: Some(column.to_string()),
            raw_cell: None,
        },
        Some(raw) => VerdictResult {
            decision: normalize_vote(Some(raw.as_str())).unwrap_or(Decision::DidntVote),
            evidence_column: Some(column.to_string()),
            raw_cell: Some(raw.clone()),
        },
    }
}

/// How a representative voted on an issue.
///
/// The first of `columns` present in the votes of this person is used, the
/// others are ignored. When a polarity is declared for that column, the vote
/// is read as supporting or opposing the issue.
pub fn resolve_issue(
    rep: &Representative,
    table: &VoteTable,
    columns: &[BillColumnKey],
    polarity: Option<&HashMap<BillColumnKey, Polarity>>,
) -> VerdictResult {
    let votes = resolve_person(rep, table);
    let (column, raw) = match columns
        .iter()
        .find_map(|c| votes.get(c).map(|raw| (c, raw)))
    {
        Some(x) => x,
        None => {
            debug!("resolve_issue: no column of {:?} for {}", columns, rep.name);
            return VerdictResult::UNKNOWN;
        }
    };

    let decision = match normalize_vote(Some(raw.as_str())) {
        None => Decision::DidntVote,
        Some(d) => match polarity.and_then(|p| p.get(column)) {
            Some(p) => apply_polarity(d, *p),
            None => d,
        },
    };
    VerdictResult {
        decision,
        evidence_column: Some(column.clone()),
        raw_cell: Some(raw.clone()),
    }
}

fn apply_polarity(decision: Decision, polarity: Polarity) -> Decision {
    match (decision, polarity) {
        (Decision::DidntVote, _) => Decision::DidntVote,
        (Decision::Against, Polarity::AgainstMeansSupport) => Decision::For,
        (Decision::For, Polarity::ForMeansSupport) => Decision::For,
        _ => Decision::Against,
    }
}

impl IssueDefinition {
    pub fn resolve(&self, rep: &Representative, table: &VoteTable) -> VerdictResult {
        resolve_issue(rep, table, &self.columns, Some(&self.polarity))
    }
}

/// All the votes on record for a representative, in column order.
pub fn key_votes(rep: &Representative, table: &VoteTable) -> Vec<KeyVote> {
    let votes = resolve_person(rep, table);
    let mut cols: Vec<&BillColumnKey> = votes.keys().filter(|c| !is_reserved_field(c)).collect();
    cols.sort();
    cols.into_iter()
        .map(|c| KeyVote {
            column: c.clone(),
            label: bill_label(c),
            raw_cell: votes[c].clone(),
            decision: normalize_vote(Some(votes[c].as_str())).unwrap_or(Decision::DidntVote),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_vote_table;
    use crate::tabular::parse_delimited;

    fn table(text: &str) -> VoteTable {
        build_vote_table(&parse_delimited(text).rows)
    }

    fn cols(cs: &[&str]) -> Vec<BillColumnKey> {
        cs.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn single_bill_end_to_end() {
        let t = table("id,name,district,HB1_2025,HB2_2025\np1,Jane Doe,District 5,Yes,No\n");
        let rep = Representative::new("").with_id("p1");
        assert_eq!(
            resolve_bill(&rep, &t, Some("HB2_2025")),
            VerdictResult {
                decision: Decision::Against,
                evidence_column: Some("HB2_2025".to_string()),
                raw_cell: Some("No".to_string()),
            }
        );
    }

    #[test]
    fn single_bill_without_column() {
        let t = table("id,HB1\np1,Yes\n");
        let rep = Representative::new("Jane").with_id("p1");
        assert_eq!(resolve_bill(&rep, &t, None), VerdictResult::UNKNOWN);
    }

    #[test]
    fn single_bill_missing_and_empty_cells() {
        let t = table("id,name,HB1,HB2,HB3\np1,Jane,,??,Yes\np2,John\n");
        let jane = Representative::new("Jane").with_id("p1");

        let r = resolve_bill(&jane, &t, Some("HB1"));
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.evidence_column, Some("HB1".to_string()));
        assert_eq!(r.raw_cell, Some("".to_string()));

        let r = resolve_bill(&jane, &t, Some("HB2"));
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.raw_cell, Some("??".to_string()));

        let r = resolve_bill(&jane, &t, Some("HB9"));
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.evidence_column, Some("HB9".to_string()));
        assert_eq!(r.raw_cell, None);
    }

    #[test]
    fn unknown_representative() {
        let t = table("id,name,HB1\np1,Jane,Yes\n");
        let rep = Representative::new("Nobody").with_id("p9");
        let r = resolve_bill(&rep, &t, Some("HB1"));
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.raw_cell, None);
        let r = resolve_issue(&rep, &t, &cols(&["HB1"]), None);
        assert_eq!(r, VerdictResult::UNKNOWN);
    }

    #[test]
    fn issue_takes_first_present_column_with_polarity() {
        let t = table("id,name,HB2_2025\np1,Jane,No\n");
        let rep = Representative::new("Jane").with_id("p1");
        let issue = IssueDefinition::new("privacy", "Privacy", &["HB1_2025", "HB2_2025"])
            .with_polarity("HB2_2025", Polarity::AgainstMeansSupport);
        let r = issue.resolve(&rep, &t);
        assert_eq!(r.decision, Decision::For);
        assert_eq!(r.evidence_column, Some("HB2_2025".to_string()));
        assert_eq!(r.raw_cell, Some("No".to_string()));
    }

    #[test]
    fn issue_order_is_priority() {
        let t = table("id,A,B\np1,No,Yes\n");
        let rep = Representative::new("Jane").with_id("p1");
        let r = resolve_issue(&rep, &t, &cols(&["B", "A"]), None);
        assert_eq!(r.decision, Decision::For);
        assert_eq!(r.evidence_column, Some("B".to_string()));
        // An empty cell still selects its column.
        let t = table("id,A,B\np1,,Yes\n");
        let r = resolve_issue(&rep, &t, &cols(&["A", "B"]), None);
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.evidence_column, Some("A".to_string()));
    }

    #[test]
    fn issue_without_any_column() {
        let t = table("id,A\np1,Yes\n");
        let rep = Representative::new("Jane").with_id("p1");
        let r = resolve_issue(&rep, &t, &cols(&["X", "Y"]), None);
        assert_eq!(r.decision, Decision::DidntVote);
        assert_eq!(r.evidence_column, None);
    }

    #[test]
    fn polarity_table() {
        use Decision::*;
        use Polarity::*;
        assert_eq!(apply_polarity(For, ForMeansSupport), For);
        assert_eq!(apply_polarity(Against, ForMeansSupport), Against);
        assert_eq!(apply_polarity(For, AgainstMeansSupport), Against);
        assert_eq!(apply_polarity(Against, AgainstMeansSupport), For);
        assert_eq!(apply_polarity(DidntVote, AgainstMeansSupport), DidntVote);
    }

    #[test]
    fn identity_fallbacks() {
        let t = table(
            "name,district,HB1\nJohn Smith,D1,Yes\nJohn Smith,D2,No\nJane Roe,D3,Yes\n",
        );
        let jane = Representative::new("Jane Roe");
        assert_eq!(resolve_bill(&jane, &t, Some("HB1")).decision, Decision::For);

        let john2 = Representative::new("John Smith").with_district("D2");
        assert_eq!(
            resolve_bill(&john2, &t, Some("HB1")).decision,
            Decision::Against
        );

        let john9 = Representative::new("John Smith").with_district("D9");
        assert_eq!(resolve_bill(&john9, &t, Some("HB1")).raw_cell, None);
    }

    #[test]
    fn key_votes_listing() {
        let t = table("id,name,SB3,HB1_2025\np1,Jane,Nay,Yes\n");
        let rep = Representative::new("Jane").with_id("p1");
        let kv = key_votes(&rep, &t);
        assert_eq!(kv.len(), 2);
        assert_eq!(kv[0].column, "HB1_2025");
        assert_eq!(kv[0].label, "HB 1 (2025)");
        assert_eq!(kv[0].decision, Decision::For);
        assert_eq!(kv[1].raw_cell, "Nay");
        assert_eq!(kv[1].decision, Decision::Against);
    }
}
