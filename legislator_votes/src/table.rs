use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::config::{is_reserved_field, BillColumnKey, PersonVotes};
use crate::identity::IdentityKey;

/// The normalized votes of a dataset, indexed by all the identity keys of
/// each person.
///
/// Several keys may point to the same set of votes. The table is read-only
/// once built, and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct VoteTable {
    entries: HashMap<IdentityKey, Arc<PersonVotes>>,
    empty: PersonVotes,
}

impl VoteTable {
    pub(crate) fn from_entries(entries: HashMap<IdentityKey, Arc<PersonVotes>>) -> VoteTable {
        VoteTable {
            entries,
            empty: PersonVotes::new(),
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&PersonVotes> {
        self.entries.get(key).map(|pv| pv.as_ref())
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.entries.contains_key(key)
    }

    /// The votes returned for a person that cannot be found.
    pub fn empty_votes(&self) -> &PersonVotes {
        &self.empty
    }

    /// Number of identity keys (not of persons).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &IdentityKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentityKey, &PersonVotes)> {
        self.entries.iter().map(|(k, pv)| (k, pv.as_ref()))
    }

    /// All the bill columns of the table, in sorted order.
    pub fn columns(&self) -> Vec<BillColumnKey> {
        bill_columns(self)
    }
}

/// The union of the vote columns across all the persons in the table,
/// without the identity and metadata fields, sorted.
pub fn bill_columns(table: &VoteTable) -> Vec<BillColumnKey> {
    let cols: BTreeSet<&String> = table
        .entries
        .values()
        .flat_map(|pv| pv.keys())
        .filter(|c| !is_reserved_field(c))
        .collect();
    cols.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn votes(cells: &[(&str, &str)]) -> Arc<PersonVotes> {
        Arc::new(
            cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn columns_are_sorted_and_filtered() {
        let mut entries = HashMap::new();
        entries.insert(
            IdentityKey::Id("p1".to_string()),
            votes(&[("SB2", "Yes"), ("name", "Jane"), ("HB9", "No")]),
        );
        entries.insert(
            IdentityKey::Name("john".to_string()),
            votes(&[("party", "D"), ("district", "D1"), ("id", "p2"), ("HB1_2025", "")]),
        );
        let t = VoteTable::from_entries(entries);
        assert_eq!(t.columns(), vec!["HB1_2025", "HB9", "SB2"]);
    }

    #[test]
    fn empty_table() {
        let t = VoteTable::default();
        assert!(t.is_empty());
        assert!(t.columns().is_empty());
        assert!(t.empty_votes().is_empty());
    }
}
