use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::*;
use crate::identity::{normalize_identity, IdentityKey, RowIdentity};
use crate::label::bill_column_key;
use crate::table::VoteTable;

/// A builder for the vote table.
///
/// Rows are added one at a time; the format of the dataset must be known
/// upfront (see [`detect_format`]). Most users should call
/// [`build_vote_table`] directly.
///
/// ```
/// use legislator_votes::builder::VoteTableBuilder;
/// use legislator_votes::{DataFormat, IdentityKey, RawRow};
///
/// let mut builder = VoteTableBuilder::new(DataFormat::Long);
/// let row: RawRow = [("name", "Jane Doe"), ("bill", "HB 1 (2025)"), ("vote", "Yea")]
///     .iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
/// builder.add_row(&row);
/// let table = builder.build();
///
/// let key = IdentityKey::name("Jane Doe").unwrap();
/// assert_eq!(table.get(&key).unwrap()["HB1_2025"], "Yea");
/// ```
pub struct VoteTableBuilder {
    format: DataFormat,
    slots: Vec<PersonVotes>,
    index: HashMap<IdentityKey, usize>,
    // Normalized districts seen for each name key.
    districts_by_name: HashMap<IdentityKey, HashSet<String>>,
    skipped: usize,
}

impl VoteTableBuilder {
    pub fn new(format: DataFormat) -> VoteTableBuilder {
        VoteTableBuilder {
            format,
            slots: Vec::new(),
            index: HashMap::new(),
            districts_by_name: HashMap::new(),
            skipped: 0,
        }
    }

    pub fn format(&self) -> DataFormat {
        self.format
    }

    /// Adds a row. Returns false if the row did not carry any usable vote.
    pub fn add_row(&mut self, row: &RawRow) -> bool {
        let ident = RowIdentity::from_row(row);
        if ident.is_empty() {
            debug!("add_row: no identity in row {:?}", row);
            self.skipped += 1;
            return false;
        }
        self.track_district(&ident);
        match self.format {
            DataFormat::Long => self.add_long_row(&ident, row),
            DataFormat::Wide => self.add_wide_row(&ident, row),
        }
    }

    pub fn add_rows(&mut self, rows: &[RawRow]) {
        for row in rows.iter() {
            self.add_row(row);
        }
    }

    fn add_long_row(&mut self, ident: &RowIdentity, row: &RawRow) -> bool {
        let bill = match row.get("bill").and_then(|b| bill_column_key(b)) {
            Some(b) => b,
            None => {
                debug!("add_long_row: no bill key in row {:?}", row);
                self.skipped += 1;
                return false;
            }
        };
        let vote = row.get("vote").cloned().unwrap_or_default();

        // Every key gets its own record so that a person can still be found
        // when the id is missing on some rows.
        let keys = [
            ident.id_key(),
            ident.name_key(),
            ident.name_district_key(),
        ];
        for key in keys.into_iter().flatten() {
            let slot = match self.index.get(&key) {
                Some(s) => *s,
                None => self.new_slot(key),
            };
            self.slots[slot].insert(bill.clone(), vote.clone());
        }
        true
    }

    fn add_wide_row(&mut self, ident: &RowIdentity, row: &RawRow) -> bool {
        let id_key = ident.id_key();
        let name_key = ident.name_key();
        let nd_key = ident.name_district_key();

        // The same person seen again. An id is authoritative: a row with an
        // unseen id is a new person, whatever its name and district.
        let existing = match (&id_key, &nd_key) {
            (Some(k), _) => self.index.get(k),
            (None, Some(k)) => self.index.get(k),
            (None, None) => name_key.as_ref().and_then(|k| self.index.get(k)),
        }
        .cloned();
        let slot = match existing {
            Some(s) => s,
            None => {
                self.slots.push(PersonVotes::new());
                self.slots.len() - 1
            }
        };

        for (col, cell) in row.iter() {
            if !is_reserved_field(col) {
                self.slots[slot].insert(col.clone(), cell.clone());
            }
        }
        for key in [id_key, name_key, nd_key].into_iter().flatten() {
            self.index.insert(key, slot);
        }
        true
    }

    fn new_slot(&mut self, key: IdentityKey) -> usize {
        self.slots.push(PersonVotes::new());
        let slot = self.slots.len() - 1;
        self.index.insert(key, slot);
        slot
    }

    fn track_district(&mut self, ident: &RowIdentity) {
        if let Some(name_key) = ident.name_key() {
            let districts = self.districts_by_name.entry(name_key).or_default();
            if let Some(d) = ident.district.as_deref() {
                let nd = normalize_identity(d);
                if !nd.is_empty() {
                    districts.insert(nd);
                }
            }
        }
    }

    pub fn build(mut self) -> VoteTable {
        // A bare name shared by people of different districts cannot identify
        // anyone: those are only reachable by id or by name and district.
        for (name_key, districts) in self.districts_by_name.iter() {
            if districts.len() > 1 {
                debug!(
                    "build: ambiguous name {} in districts {:?}",
                    name_key, districts
                );
                self.index.remove(name_key);
            }
        }

        let shared: Vec<Arc<PersonVotes>> = self.slots.into_iter().map(Arc::new).collect();
        let entries: HashMap<IdentityKey, Arc<PersonVotes>> = self
            .index
            .into_iter()
            .map(|(k, slot)| (k, shared[slot].clone()))
            .collect();
        info!(
            "build: {:?} format, {} persons, {} identity keys, {} rows skipped",
            self.format,
            shared.len(),
            entries.len(),
            self.skipped
        );
        VoteTable::from_entries(entries)
    }
}

/// A dataset is in long format if any row has both a `bill` and a `vote` field.
pub fn detect_format(rows: &[RawRow]) -> DataFormat {
    if rows
        .iter()
        .any(|r| r.contains_key("bill") && r.contains_key("vote"))
    {
        DataFormat::Long
    } else {
        DataFormat::Wide
    }
}

/// Builds the vote table of a dataset, detecting its format.
///
/// An empty dataset gives an empty table.
pub fn build_vote_table(rows: &[RawRow]) -> VoteTable {
    let format = detect_format(rows);
    debug!("build_vote_table: {} rows, format {:?}", rows.len(), format);
    let mut builder = VoteTableBuilder::new(format);
    builder.add_rows(rows);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::parse_delimited;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn rows(text: &str) -> Vec<RawRow> {
        parse_delimited(text).rows
    }

    fn id(s: &str) -> IdentityKey {
        IdentityKey::id(s).unwrap()
    }

    fn name(s: &str) -> IdentityKey {
        IdentityKey::name(s).unwrap()
    }

    fn nd(n: &str, d: &str) -> IdentityKey {
        IdentityKey::name_district(n, d).unwrap()
    }

    #[test]
    fn format_detection() {
        assert_eq!(
            detect_format(&rows("name,bill,vote\nJane,HB1,Yes\n")),
            DataFormat::Long
        );
        assert_eq!(
            detect_format(&rows("name,bill,HB1\nJane,x,Yes\n")),
            DataFormat::Wide
        );
        assert_eq!(detect_format(&[]), DataFormat::Wide);
    }

    #[test]
    fn empty_dataset() {
        let t = build_vote_table(&[]);
        assert!(t.is_empty());
        assert!(t.columns().is_empty());
    }

    #[test]
    fn wide_rows_share_their_votes() {
        init_logger();
        let t = build_vote_table(&rows(
            "id,name,district,party,HB1_2025,HB2_2025\np1,Jane Doe,District 5,D,Yes,No\n",
        ));
        let by_id = t.get(&id("p1")).unwrap();
        assert_eq!(by_id.len(), 2);
        assert_eq!(by_id["HB2_2025"], "No");
        assert!(std::ptr::eq(by_id, t.get(&name("Jane Doe")).unwrap()));
        assert!(std::ptr::eq(
            by_id,
            t.get(&nd("Jane Doe", "District 5")).unwrap()
        ));
        assert_eq!(t.columns(), vec!["HB1_2025", "HB2_2025"]);
    }

    #[test]
    fn wide_duplicates_are_merged_last_write_wins() {
        let t = build_vote_table(&rows(
            "id,name,HB1,HB2\np1,Jane,Yes,No\np1,Jane,No,\n",
        ));
        let v = t.get(&id("p1")).unwrap();
        assert_eq!(v["HB1"], "No");
        assert_eq!(v["HB2"], "");
    }

    #[test]
    fn wide_rows_with_distinct_ids_stay_apart() {
        let t = build_vote_table(&rows(
            "id,name,district,HB1\np1,John Smith,D1,Yes\np2,John Smith,D1,No\n",
        ));
        assert_eq!(t.get(&id("p1")).unwrap()["HB1"], "Yes");
        assert_eq!(t.get(&id("p2")).unwrap()["HB1"], "No");
        let rep = Representative::new("John Smith").with_id("p1");
        assert_eq!(
            crate::issue::resolve_bill(&rep, &t, Some("HB1")).raw_cell,
            Some("Yes".to_string())
        );
    }

    #[test]
    fn long_rows_are_registered_under_all_keys() {
        init_logger();
        let t = build_vote_table(&rows(
            "person_id,name,district,bill,vote\n\
             p1,Jane Doe,D5,HB 1 (2025),Yea\n\
             ,Jane Doe,D5,SB 7,Nay\n\
             p2,,,HB 1 (2025),No\n",
        ));
        let by_id = t.get(&id("p1")).unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id["HB1_2025"], "Yea");

        let by_name = t.get(&name("Jane Doe")).unwrap();
        assert_eq!(by_name["HB1_2025"], "Yea");
        assert_eq!(by_name["SB7"], "Nay");
        assert_eq!(t.get(&nd("Jane Doe", "D5")).unwrap().len(), 2);

        assert_eq!(t.get(&id("p2")).unwrap()["HB1_2025"], "No");
        assert_eq!(t.columns(), vec!["HB1_2025", "SB7"]);
    }

    #[test]
    fn long_rows_without_identity_or_bill_are_skipped() {
        let mut builder = VoteTableBuilder::new(DataFormat::Long);
        let rs = rows("name,bill,vote\n,HB1,Yes\nJane,,Yes\nJane,-,No\nJane,HB2,No\n");
        let used: Vec<bool> = rs.iter().map(|r| builder.add_row(r)).collect();
        assert_eq!(used, vec![false, false, false, true]);
        let t = builder.build();
        assert_eq!(t.len(), 1);
        assert_eq!(t.columns(), vec!["HB2"]);
    }

    #[test]
    fn ambiguous_names_are_only_reachable_with_district() {
        let t = build_vote_table(&rows(
            "name,district,HB1\nJohn Smith,D1,Yes\nJohn Smith,D2,No\nJane,D1,Yes\n",
        ));
        assert!(t.get(&name("John Smith")).is_none());
        assert_eq!(t.get(&nd("John Smith", "D1")).unwrap()["HB1"], "Yes");
        assert_eq!(t.get(&nd("John Smith", "D2")).unwrap()["HB1"], "No");
        assert!(t.get(&name("Jane")).is_some());
    }

    #[test]
    fn long_last_write_wins() {
        let t = build_vote_table(&rows("id,bill,vote\np1,HB1,Yes\np1,HB 1,No\n"));
        assert_eq!(t.get(&id("p1")).unwrap()["HB1"], "No");
    }
}
