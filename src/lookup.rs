pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_json;

use log::{debug, info, warn};

use legislator_votes::district::{census_to_openstates, is_floterial};
use legislator_votes::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::lookup::config_reader::*;
use crate::lookup::io_common::{infer_provider, resolve_path};

#[derive(Debug, Snafu)]
pub enum LookupError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet found in Excel file {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Unknown input type {input_type:?} for {path}"))]
    UnknownInputType { input_type: String, path: String },
    #[snafu(display("No vote records: use --input or voteSources in the configuration"))]
    MissingVoteSource {},
    #[snafu(display("No representatives: use --reps or representativesPath in the configuration"))]
    MissingRepresentatives {},
    #[snafu(display("Issue {key:?} is not defined in the configuration"))]
    UnknownIssue { key: String },
    #[snafu(display("Unknown polarity {polarity:?} for column {column} of issue {key}"))]
    InvalidPolarity {
        key: String,
        column: String,
        polarity: String,
    },
    #[snafu(display("Missing parent directory for {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type LookupResult<T> = Result<T, LookupError>;

fn read_vote_rows(root: &Path, source: &VoteSource) -> LookupResult<Vec<RawRow>> {
    let p: PathBuf = resolve_path(root, &source.file_path);
    let path = p.as_path().display().to_string();
    info!("Attempting to read vote file {:?}", path);
    let provider = match source.provider.as_deref() {
        Some(x) => x.to_string(),
        None => infer_provider(&path)
            .context(UnknownInputTypeSnafu {
                input_type: "",
                path: path.clone(),
            })?
            .to_string(),
    };
    match provider.as_str() {
        "csv" => io_csv::read_csv_rows(&path),
        "json" => io_json::read_json_rows(&path),
        "excel" | "xlsx" => {
            io_excel::read_excel_rows(&path, source.excel_worksheet_name.as_deref())
        }
        x => UnknownInputTypeSnafu {
            input_type: x,
            path,
        }
        .fail(),
    }
}

fn select_query(args: &Args, issues: &[IssueDefinition]) -> LookupResult<Query> {
    if let Some(key) = args.issue.as_ref() {
        let issue = issues
            .iter()
            .find(|i| &i.key == key)
            .context(UnknownIssueSnafu { key: key.clone() })?;
        return Ok(Query::Issue(issue.clone()));
    }
    Ok(Query::Bill(args.bill.clone()))
}

fn query_to_json(query: &Query) -> JSValue {
    match query {
        Query::Bill(column) => json!({
            "kind": "bill",
            "column": column,
            "label": column.as_deref().map(bill_label),
        }),
        Query::Issue(issue) => json!({
            "kind": "issue",
            "key": issue.key,
            "label": issue.label,
            "columns": issue.columns,
        }),
    }
}

fn key_votes_to_json(kvs: &[KeyVote]) -> Vec<JSValue> {
    kvs.iter()
        .map(|kv| {
            json!({
                "bill": kv.column,
                "label": kv.label,
                "vote": kv.raw_cell,
                "decision": kv.decision.as_str(),
            })
        })
        .collect()
}

pub(crate) struct SummaryInput<'a> {
    pub title: Option<String>,
    pub base_district: Option<String>,
    pub query: &'a Query,
    pub reps: &'a [Representative],
    pub table: &'a VoteTable,
    pub with_key_votes: bool,
}

pub(crate) fn build_summary_js(input: &SummaryInput) -> JSValue {
    let base = input.base_district.clone().unwrap_or_default();
    let verdicts = run_verdicts(input.reps, input.table, input.query);
    let results: Vec<JSValue> = input
        .reps
        .iter()
        .zip(verdicts.iter())
        .map(|(rep, v)| {
            let mut js = json!({
                "primaryId": rep.primary_id,
                "name": rep.name,
                "district": rep.district,
                "party": rep.party,
                "email": rep.email,
                "phone": rep.phone,
                "floterial": is_floterial(&base, rep.district.as_deref().unwrap_or("")),
                "decision": v.decision.as_str(),
                "evidenceColumn": v.evidence_column,
                "evidenceLabel": v.evidence_column.as_deref().map(bill_label),
                "rawCell": v.raw_cell,
            });
            if input.with_key_votes {
                js["keyVotes"] = JSValue::Array(key_votes_to_json(&key_votes(rep, input.table)));
            }
            js
        })
        .collect();
    json!({
        "config": {
            "title": input.title,
            "baseDistrict": input.base_district,
        },
        "query": query_to_json(input.query),
        "results": results,
    })
}

fn columns_js(table: &VoteTable) -> JSValue {
    let cols: Vec<JSValue> = table
        .columns()
        .iter()
        .map(|c| json!({"column": c, "label": bill_label(c)}))
        .collect();
    json!({ "columns": cols })
}

fn write_output(out: Option<&str>, pretty_js: &str) -> LookupResult<()> {
    match out {
        None | Some("stdout") => {
            println!("{}", pretty_js);
            Ok(())
        }
        Some(path) => {
            info!("Writing summary to {:?}", path);
            fs::write(path, pretty_js).context(WritingFileSnafu { path })
        }
    }
}

fn check_reference(reference_path: &str, pretty_js: &str) -> LookupResult<()> {
    let summary_ref = read_summary(reference_path)?;
    debug!("reference summary: {:?}", summary_ref);
    let pretty_js_ref = serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_ref != pretty_js {
        warn!("Found differences with the reference summary");
        print_diff(pretty_js_ref.as_str(), pretty_js, "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    Ok(())
}

/// Runs a lookup from the command line options and the optional configuration file.
pub fn run_lookup(args: &Args) -> LookupResult<()> {
    let (config, config_root) = match args.config.as_ref() {
        Some(path) => {
            let config = read_config(path)?;
            info!("config: {:?}", config);
            let root = Path::new(path)
                .parent()
                .context(MissingParentDirSnafu { path: path.clone() })?
                .to_path_buf();
            (config, root)
        }
        None => (LookupConfig::default(), PathBuf::new()),
    };

    // Vote records: the command line wins over the configuration.
    let (sources, sources_root) = match args.input.as_ref() {
        Some(input) => (
            vec![VoteSource {
                provider: args.input_type.clone(),
                file_path: input.clone(),
                excel_worksheet_name: args.excel_worksheet_name.clone(),
            }],
            PathBuf::new(),
        ),
        None => (config.vote_sources.clone(), config_root.clone()),
    };
    ensure!(!sources.is_empty(), MissingVoteSourceSnafu {});

    let mut rows: Vec<RawRow> = Vec::new();
    for source in sources.iter() {
        let mut source_rows = read_vote_rows(&sources_root, source)?;
        rows.append(&mut source_rows);
    }
    info!("Read {} vote rows from {} sources", rows.len(), sources.len());
    let table = build_vote_table(&rows);

    let out_path: Option<String> = args.out.clone().or_else(|| {
        config
            .output_settings
            .as_ref()
            .and_then(|os| os.output_path.clone())
            .map(|p| resolve_path(&config_root, &p).display().to_string())
    });

    let result_js = if args.list_columns {
        columns_js(&table)
    } else {
        let reps_path: String = match args.reps.as_ref() {
            Some(p) => p.clone(),
            None => config
                .representatives_path
                .as_ref()
                .map(|p| resolve_path(&config_root, p).display().to_string())
                .context(MissingRepresentativesSnafu {})?,
        };
        let reps = read_representatives(&reps_path)?;
        info!("Read {} representatives from {:?}", reps.len(), reps_path);

        let issues = config.issue_definitions()?;
        let query = select_query(args, &issues)?;
        info!("query: {:?}", query);

        let base_district = args
            .base_district
            .clone()
            .or_else(|| config.base_district.clone())
            .map(|d| census_to_openstates(&d));

        build_summary_js(&SummaryInput {
            title: config.output_settings.as_ref().and_then(|os| os.title.clone()),
            base_district,
            query: &query,
            reps: &reps,
            table: &table,
            // Without a bill or an issue, the list of votes is the only useful output.
            with_key_votes: args.key_votes || query == Query::Bill(None),
        })
    };

    let pretty_js = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;
    write_output(out_path.as_deref(), &pretty_js)?;

    // The reference summary, if provided for comparison
    if let Some(reference_path) = args.reference.as_ref() {
        check_reference(reference_path, &pretty_js)?;
    }
    Ok(())
}

#[cfg(test)]
fn run_lookup_test(test_name: &str, extra: Args) {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = format!("{}/tests/data/{}", env!("CARGO_MANIFEST_DIR"), test_name);
    info!("Running test {}", test_name);
    let args = Args {
        config: Some(format!("{}/{}_config.json", test_dir, test_name)),
        reference: Some(format!("{}/{}_expected_summary.json", test_dir, test_name)),
        out: Some("stdout".to_string()),
        ..extra
    };
    let res = run_lookup(&args);
    if let Err(e) = res.as_ref() {
        eprintln!("An error occured {}", e);
    }
    assert!(res.is_ok());
}
