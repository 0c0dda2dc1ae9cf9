use legislator_votes::ingest::rows_from_json;

use crate::lookup::*;

pub fn read_json_rows(path: &str) -> LookupResult<Vec<RawRow>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    let rows = rows_from_json(&js);
    debug!("read_json_rows: {:?}: {} rows", path, rows.len());
    Ok(rows)
}
