use csv::StringRecord;
use log::debug;
use crate::expense::{parse_amount, HEADER};
use crate::util::parse_date;

/// Header name older files used for the description column
const OLDER_DESCRIPTION_HEADER: &str = "Note";

/// Contains column index of an expense file.
/// Columns are always read in canonical order. A header whose names differ is remapped by position.
/// The column number uses 0-based index.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ColumnInfo {
    /// Does this file have a header row
    pub(crate) has_header: bool,
    /// Number of fields a well formed row has
    pub(crate) width: usize,
    pub(crate) date_column: usize,
    pub(crate) category_column: usize,
    pub(crate) amount_column: usize,
    pub(crate) description_column: usize,
}

impl ColumnInfo {
    fn positional(has_header: bool) -> ColumnInfo {
        ColumnInfo {
            has_header,
            width: HEADER.len(),
            date_column: 0,
            category_column: 1,
            amount_column: 2,
            description_column: 3,
        }
    }

    /// Work out the column layout from the first row of a file.
    /// Only a first row of the expected width is taken as a header, a row of any other width is
    /// malformed and gets skipped along with the other malformed rows.
    pub(crate) fn detect(first_row: &StringRecord) -> ColumnInfo {
        if first_row.len() != HEADER.len() {
            debug!("First row has {} fields, reading without header", first_row.len());
            return ColumnInfo::positional(false);
        }

        if looks_like_data(first_row) {
            debug!("No header row detected");
            return ColumnInfo::positional(false);
        }

        if !is_known_header(first_row) {
            debug!("Unrecognised header {:?}, mapping columns by position", first_row);
        }
        ColumnInfo::positional(true)
    }
}

fn looks_like_data(row: &StringRecord) -> bool {
    let date = row.get(0).and_then(parse_date);
    let amount = row.get(2).and_then(parse_amount);
    date.is_some() && amount.is_some()
}

/// The current header, or the older one naming the description column `Note`
fn is_known_header(row: &StringRecord) -> bool {
    row.iter().zip(HEADER.iter()).enumerate().all(|(i, (s, h))| {
        let s = s.trim();
        s.eq_ignore_ascii_case(h) || (i == 3 && s.eq_ignore_ascii_case(OLDER_DESCRIPTION_HEADER))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_canonical_header() {
        let first_row = row(&["Date", "Category", "Amount", "Description"]);
        assert!(is_known_header(&first_row));
        assert_eq!(ColumnInfo::detect(&first_row), ColumnInfo::positional(true));
    }

    #[test]
    fn test_older_note_header() {
        let first_row = row(&["Date", " Category", " Amount", " Note"]);
        assert!(is_known_header(&first_row));
        assert_eq!(ColumnInfo::detect(&first_row), ColumnInfo::positional(true));
    }

    #[test]
    fn test_renamed_header_is_positional() {
        let first_row = row(&["Amount", "Memo", "Date", "Label"]);
        assert!(!is_known_header(&first_row));
        assert_eq!(ColumnInfo::detect(&first_row), ColumnInfo::positional(true));

        let info = ColumnInfo::detect(&row(&["a", "b", "c", "d"]));
        assert_eq!(info, ColumnInfo::positional(true));
    }

    #[test]
    fn test_no_header() {
        let info = ColumnInfo::detect(&row(&["2024-01-15", "Food", "250", "lunch"]));
        assert_eq!(info, ColumnInfo::positional(false));
    }

    #[test]
    fn test_wrong_width_first_row() {
        let header_with_trailing_comma = row(&["Date", "Category", "Amount", "Description", ""]);
        assert_eq!(ColumnInfo::detect(&header_with_trailing_comma), ColumnInfo::positional(false));
        assert_eq!(ColumnInfo::detect(&row(&["Date", "Amount"])), ColumnInfo::positional(false));
        assert_eq!(ColumnInfo::detect(&StringRecord::new()).width, 4);
    }
}
