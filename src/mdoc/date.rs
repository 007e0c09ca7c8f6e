//! Date normalization for the `Dd` macro
//!
//! Accepted inputs:
//!
//!     $Mdocdate: May 1 2014 $      (CVS keyword form)
//!     May 1, 2014                  (canonical mdoc form)
//!     2014-05-01                   (ISO 8601)
//!
//! Everything is rendered as `Month D, YYYY`.

use chrono::{Local, NaiveDate};

const OUTPUT_FORMAT: &str = "%B %-d, %Y";

/// Result of normalizing a date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// Parsed and reformatted.
    Parsed(String),
    /// Could not be parsed; kept verbatim.
    Verbatim(String),
    /// No date was given; today's date is used.
    Today(String),
}

impl NormalizedDate {
    pub fn into_string(self) -> String {
        match self {
            NormalizedDate::Parsed(s) | NormalizedDate::Verbatim(s) | NormalizedDate::Today(s) => s,
        }
    }
}

/// Parse a date in any of the accepted forms.
pub fn parse(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Some(rest) = input.strip_prefix("$Mdocdate:") {
        let rest = rest.trim_end().strip_suffix('$').unwrap_or(rest).trim();
        return NaiveDate::parse_from_str(rest, "%B %d %Y").ok();
    }
    NaiveDate::parse_from_str(input, "%B %d, %Y")
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
        .ok()
}

pub fn format(date: NaiveDate) -> String {
    date.format(OUTPUT_FORMAT).to_string()
}

/// Normalize `input`, falling back to `today` when it is missing or empty.
pub fn normalize_with(input: Option<&str>, today: NaiveDate) -> NormalizedDate {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        None => NormalizedDate::Today(format(today)),
        Some(raw) => match parse(raw) {
            Some(date) => NormalizedDate::Parsed(format(date)),
            None => NormalizedDate::Verbatim(raw.to_string()),
        },
    }
}

pub fn normalize(input: Option<&str>) -> NormalizedDate {
    normalize_with(input, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("$Mdocdate: May 1 2014 $", "May 1, 2014")]
    #[case("$Mdocdate: December 31 1999 $", "December 31, 1999")]
    #[case("May 1, 2014", "May 1, 2014")]
    #[case("January 09, 2001", "January 9, 2001")]
    #[case("2014-05-01", "May 1, 2014")]
    fn test_parsed_forms(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            normalize(Some(input)),
            NormalizedDate::Parsed(expected.to_string())
        );
    }

    #[test]
    fn test_unparseable_kept_verbatim() {
        assert_eq!(
            normalize(Some("sometime in spring")),
            NormalizedDate::Verbatim("sometime in spring".to_string())
        );
    }

    #[test]
    fn test_missing_uses_today() {
        let today = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(
            normalize_with(None, today),
            NormalizedDate::Today("February 29, 2020".to_string())
        );
        assert_eq!(
            normalize_with(Some("  "), today),
            NormalizedDate::Today("February 29, 2020".to_string())
        );
    }
}
