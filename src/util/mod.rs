use chrono::{Local, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref YYYYMMDD: Regex = Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap();
    static ref YYYYMMDD_HHMMSS: Regex = Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}[ T]\d{2}:\d{2}:\d{2}").unwrap();
    static ref DDMMYYYY: Regex = Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap();
}

/// Parse a stored date. Accepts plain dates as well as the timestamps written by older versions,
/// in which case only the date part is kept. Returns `None` for anything else.
pub(crate) fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if YYYYMMDD.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else if YYYYMMDD_HHMMSS.is_match(s) {
        let normalised = s.replacen('T', " ", 1);
        // Drop fractional seconds and zone suffix if any
        let end = normalised.find(':').map(|i| i + 6).unwrap_or(normalised.len()).min(normalised.len());
        NaiveDateTime::parse_from_str(&normalised[..end], "%Y-%m-%d %H:%M:%S").ok().map(|dt| dt.date())
    } else if DDMMYYYY.is_match(s) {
        NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
    } else {
        None
    }
}

pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}
