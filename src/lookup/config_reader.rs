use crate::lookup::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct VoteSource {
    /// csv, json or excel. Guessed from the file extension when missing.
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct IssueConfig {
    pub key: String,
    pub label: Option<String>,
    pub columns: Vec<String>,
    pub polarity: Option<HashMap<String, String>>,
}

impl IssueConfig {
    pub fn to_issue(&self) -> LookupResult<IssueDefinition> {
        let mut polarity: HashMap<BillColumnKey, Polarity> = HashMap::new();
        for (column, p) in self.polarity.iter().flatten() {
            let pol = Polarity::parse(p).context(InvalidPolaritySnafu {
                key: self.key.clone(),
                column: column.clone(),
                polarity: p.clone(),
            })?;
            polarity.insert(column.clone(), pol);
        }
        Ok(IssueDefinition {
            key: self.key.clone(),
            label: self.label.clone().unwrap_or_else(|| self.key.clone()),
            columns: self.columns.clone(),
            polarity,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct LookupConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "voteSources", default)]
    pub vote_sources: Vec<VoteSource>,
    #[serde(rename = "representativesPath")]
    pub representatives_path: Option<String>,
    #[serde(default)]
    pub issues: Vec<IssueConfig>,
    #[serde(rename = "baseDistrict")]
    pub base_district: Option<String>,
}

impl LookupConfig {
    pub fn issue_definitions(&self) -> LookupResult<Vec<IssueDefinition>> {
        self.issues.iter().map(|i| i.to_issue()).collect()
    }
}

/// A representative as returned by the legislator lookup.
///
/// The identifier may come under several names (and sometimes as a number).
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RepresentativeRecord {
    pub openstates_person_id: Option<JSValue>,
    pub person_id: Option<JSValue>,
    pub id: Option<JSValue>,
    pub name: String,
    pub party: Option<String>,
    pub district: Option<JSValue>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub links: Option<Vec<JSValue>>,
}

impl RepresentativeRecord {
    /// The first non-empty identifier among `openstates_person_id`,
    /// `person_id` and `id`.
    pub fn primary_id(&self) -> Option<String> {
        [&self.openstates_person_id, &self.person_id, &self.id]
            .iter()
            .find_map(|x| read_js_string(x))
    }

    pub fn to_representative(&self) -> Representative {
        Representative {
            primary_id: self.primary_id(),
            name: self.name.trim().to_string(),
            district: read_js_string(&self.district),
            party: non_empty(&self.party),
            email: non_empty(&self.email),
            phone: non_empty(&self.phone),
            links: self
                .links
                .iter()
                .flatten()
                .filter_map(|l| match l {
                    JSValue::Object(obj) => obj.get("url").and_then(|u| read_js_string(&Some(u.clone()))),
                    x => read_js_string(&Some(x.clone())),
                })
                .collect(),
        }
    }
}

fn non_empty(x: &Option<String>) -> Option<String> {
    x.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_js_string(x: &Option<JSValue>) -> Option<String> {
    match x {
        Some(JSValue::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(JSValue::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

pub fn read_config(path: &str) -> LookupResult<LookupConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

/// Reads the representatives: either a list, or the response of the
/// legislator lookup (`stateRepresentatives`, possibly under `data`).
pub fn read_representatives(path: &str) -> LookupResult<Vec<Representative>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let list = match &js {
        JSValue::Array(_) => js.clone(),
        JSValue::Object(obj) => match obj.get("stateRepresentatives") {
            Some(l) => l.clone(),
            None => js["data"]["stateRepresentatives"].clone(),
        },
        _ => JSValue::Null,
    };
    if !list.is_array() {
        whatever!("Cannot read representatives from {}: expected a list", path);
    }
    let records: Vec<RepresentativeRecord> =
        serde_json::from_value(list).context(ParsingJsonSnafu { path })?;
    debug!("read_representatives: {:?}", records);
    Ok(records.iter().map(|r| r.to_representative()).collect())
}

pub fn read_summary(path: &str) -> LookupResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}
