// Primitives for reading CSV files.

use legislator_votes::tabular::parse_delimited;

use crate::lookup::*;

pub fn read_csv_rows(path: &str) -> LookupResult<Vec<RawRow>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let parsed = parse_delimited(&contents);
    debug!(
        "read_csv_rows: {:?}: headers: {:?}, {} rows",
        path,
        parsed.headers,
        parsed.rows.len()
    );
    Ok(parsed.rows)
}
