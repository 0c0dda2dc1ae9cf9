use std::fmt::Display;

use crate::config::{PersonVotes, RawRow, Representative, ID_FIELDS};
use crate::table::VoteTable;

/// A lookup key for the votes of one person.
///
/// Names and districts are stored normalized (see [`normalize_identity`]).
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum IdentityKey {
    Id(String),
    Name(String),
    NameDistrict(String, String),
}

impl IdentityKey {
    pub fn id(primary_id: &str) -> Option<IdentityKey> {
        let id = primary_id.trim();
        if id.is_empty() {
            None
        } else {
            Some(IdentityKey::Id(id.to_string()))
        }
    }

    pub fn name(name: &str) -> Option<IdentityKey> {
        let n = normalize_identity(name);
        if n.is_empty() {
            None
        } else {
            Some(IdentityKey::Name(n))
        }
    }

    pub fn name_district(name: &str, district: &str) -> Option<IdentityKey> {
        let n = normalize_identity(name);
        let d = normalize_identity(district);
        if n.is_empty() || d.is_empty() {
            None
        } else {
            Some(IdentityKey::NameDistrict(n, d))
        }
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityKey::Id(id) => write!(f, "id:{}", id),
            IdentityKey::Name(n) => write!(f, "name:{}", n),
            IdentityKey::NameDistrict(n, d) => write!(f, "nd:{}|{}", n, d),
        }
    }
}

/// Lowercase, then drop everything outside `[a-z0-9]`.
pub fn normalize_identity(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// The identity signals found in one row of the input.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub(crate) struct RowIdentity {
    pub id: Option<String>,
    pub name: Option<String>,
    pub district: Option<String>,
}

impl RowIdentity {
    pub fn from_row(row: &RawRow) -> RowIdentity {
        let field = |k: &str| {
            row.get(k)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };
        RowIdentity {
            id: ID_FIELDS.iter().find_map(|k| field(*k)),
            name: field("name"),
            district: field("district"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }

    pub fn id_key(&self) -> Option<IdentityKey> {
        self.id.as_deref().and_then(IdentityKey::id)
    }

    pub fn name_key(&self) -> Option<IdentityKey> {
        self.name.as_deref().and_then(IdentityKey::name)
    }

    pub fn name_district_key(&self) -> Option<IdentityKey> {
        match (&self.name, &self.district) {
            (Some(n), Some(d)) => IdentityKey::name_district(n, d),
            _ => None,
        }
    }
}

/// The lookup keys for a representative, in the order they are tried.
pub fn lookup_keys(rep: &Representative) -> Vec<IdentityKey> {
    let mut keys: Vec<IdentityKey> = Vec::new();
    if let Some(k) = rep.primary_id.as_deref().and_then(IdentityKey::id) {
        keys.push(k);
    }
    if let Some(k) = IdentityKey::name(&rep.name) {
        keys.push(k);
    }
    if let Some(k) = rep
        .district
        .as_deref()
        .and_then(|d| IdentityKey::name_district(&rep.name, d))
    {
        keys.push(k);
    }
    keys
}

/// Finds the votes of a representative: by id, then by name, then by name
/// and district. The first hit wins.
///
/// Returns an empty set of votes when nothing matches.
pub fn resolve_person<'a>(rep: &Representative, table: &'a VoteTable) -> &'a PersonVotes {
    lookup_keys(rep)
        .iter()
        .find_map(|k| table.get(k))
        .unwrap_or_else(|| table.empty_votes())
}
