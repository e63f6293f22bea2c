//! Document numbering and display dates.
//!
//! # Responsibility
//! - Derive the `YYYY.MM.DD` document number from the agreement date.
//! - Render the long `DD Month YYYY` date printed on documents.
//!
//! # Invariants
//! - Input strings use the HTML date-input shape `YYYY-MM-DD`; a trailing
//!   `T...` time component is ignored.
//! - Empty or unparseable input yields an empty string, never an error.
//! - Month names are always English, independent of the host locale.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use log::warn;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const LONG_DATE_FORMAT: &str = "%d %B %Y";

/// Returns the dotted document number for an ISO date string.
///
/// `"2024-03-05"` becomes `"2024.03.05"`; blank input returns `""`.
pub fn generate_document_number(date: &str) -> String {
    parse_input_date(date, "document_number")
        .map(document_number_for)
        .unwrap_or_default()
}

/// Returns the dotted document number for `date`.
pub fn document_number_for(date: NaiveDate) -> String {
    format!("{:04}.{:02}.{:02}", date.year(), date.month(), date.day())
}

/// Returns the long display date for an ISO date string.
///
/// `"2024-03-05"` becomes `"05 March 2024"`; blank input returns `""`.
pub fn format_long_date(date: &str) -> String {
    parse_input_date(date, "long_date")
        .map(long_date_for)
        .unwrap_or_default()
}

/// Returns the long display date for `date`.
pub fn long_date_for(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

/// Returns today's UTC date as `YYYY-MM-DD`, the date-input value shape.
pub fn today_iso_date() -> String {
    iso_date_at(Utc::now())
}

/// Returns the UTC calendar date of `now` as `YYYY-MM-DD`.
pub fn iso_date_at(now: DateTime<Utc>) -> String {
    now.date_naive().format(INPUT_DATE_FORMAT).to_string()
}

/// Parses a date-input value. Returns `None` for blank or invalid input.
pub fn parse_input_date(value: &str, event: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    match NaiveDate::parse_from_str(date_part, INPUT_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!(
                "event={event} module=format status=skip reason=invalid_date input_len={} error={}",
                trimmed.len(),
                err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        document_number_for, format_long_date, generate_document_number, iso_date_at,
        parse_input_date, today_iso_date,
    };
    use chrono::{DateTime, NaiveDate, Utc};

    #[test]
    fn document_number_is_zero_padded_and_dotted() {
        assert_eq!(generate_document_number("2024-03-05"), "2024.03.05");
        assert_eq!(generate_document_number("2023-12-31"), "2023.12.31");
        assert_eq!(generate_document_number("2024-03-05").len(), 10);
    }

    #[test]
    fn document_number_is_empty_for_missing_date() {
        assert_eq!(generate_document_number(""), "");
        assert_eq!(generate_document_number("   "), "");
    }

    #[test]
    fn document_number_is_empty_for_invalid_date() {
        assert_eq!(generate_document_number("2024-13-40"), "");
        assert_eq!(generate_document_number("not a date"), "");
    }

    #[test]
    fn time_component_is_ignored() {
        assert_eq!(generate_document_number("2024-03-05T23:59"), "2024.03.05");
    }

    #[test]
    fn long_date_uses_english_month_and_padded_day() {
        assert_eq!(format_long_date("2024-03-05"), "05 March 2024");
        assert_eq!(format_long_date("2025-11-21"), "21 November 2025");
        assert_eq!(format_long_date(""), "");
    }

    #[test]
    fn typed_variant_matches_string_variant() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 9).expect("valid date");
        assert_eq!(document_number_for(date), generate_document_number("2024-01-09"));
    }

    #[test]
    fn iso_date_uses_utc_calendar_day() {
        let late_evening_utc = DateTime::parse_from_rfc3339("2024-03-05T23:30:00Z")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        assert_eq!(iso_date_at(late_evening_utc), "2024-03-05");

        let ahead_of_utc = DateTime::parse_from_rfc3339("2024-03-06T01:30:00+03:00")
            .expect("valid timestamp")
            .with_timezone(&Utc);
        assert_eq!(iso_date_at(ahead_of_utc), "2024-03-05");
        assert_eq!(
            generate_document_number(&iso_date_at(ahead_of_utc)),
            "2024.03.05"
        );
    }

    #[test]
    fn today_roundtrips_through_parser() {
        let today = today_iso_date();
        assert!(parse_input_date(&today, "test").is_some());
    }
}
