use regex::Regex;
use std::sync::LazyLock;

static CENSUS_DISTRICT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]+)\s+0*(\d+)$").unwrap());

/// Converts a census district name (`Grafton 012`) into the form used by the
/// legislature (`Grafton 12`). Other texts are returned trimmed.
pub fn census_to_openstates(s: &str) -> String {
    let s = s.trim();
    match CENSUS_DISTRICT_REGEX.captures(s) {
        Some(caps) => format!("{} {}", &caps[1], &caps[2]),
        None => s.to_string(),
    }
}

/// A floterial representative is elected for a district that overlaps the
/// base district of the address.
pub fn is_floterial(base_district: &str, rep_district: &str) -> bool {
    let base = base_district.trim();
    let rep = rep_district.trim();
    !base.is_empty() && !rep.is_empty() && base != rep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn census_names() {
        assert_eq!(census_to_openstates("Grafton 012"), "Grafton 12");
        assert_eq!(
            census_to_openstates("State House District Sullivan 01 "),
            "Sullivan 1"
        );
        assert_eq!(census_to_openstates("Coos 0"), "Coos 0");
        assert_eq!(census_to_openstates("At large"), "At large");
        assert_eq!(census_to_openstates(""), "");
    }

    #[test]
    fn floterial() {
        assert!(is_floterial("Sullivan 1", "Sullivan 9"));
        assert!(!is_floterial("Sullivan 1", " Sullivan 1 "));
        assert!(!is_floterial("", "Sullivan 9"));
        assert!(!is_floterial("Sullivan 1", ""));
    }
}
