use chrono::NaiveDate;
use crate::util::parse_date;

/// Date format used when writing new expenses
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical column names, in the order they are written to disk
pub(crate) const HEADER: [&str; 4] = ["Date", "Category", "Amount", "Description"];

/// Hold one expense row, either freshly entered or loaded from the data file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expense {
    /// Date as stored. Usually `YYYY-MM-DD`, older files carry a full timestamp.
    pub(crate) date: String,
    pub(crate) category: String,
    /// `None` when the stored amount is not a number
    pub(crate) amount: Option<f64>,
    pub(crate) description: String,
}

impl Expense {
    pub(crate) fn new(date: NaiveDate, category: &str, amount: f64, description: &str) -> Expense {
        // A newline would split the row in two
        let description = description.replace('\n', " ");
        Expense {
            date: date.format(DATE_FORMAT).to_string(),
            category: category.trim().to_string(),
            amount: Some(amount),
            description: description.trim().to_string(),
        }
    }

    pub(crate) fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Amount usable for totals, i.e. present and finite
    pub(crate) fn valid_amount(&self) -> Option<f64> {
        self.amount.filter(|a| a.is_finite())
    }

    pub(crate) fn amount_display(&self) -> String {
        match self.amount {
            Some(amount) => format!("{:.2}", amount),
            None => "NaN".to_string(),
        }
    }
}

/// Parse user or file supplied amount. Currency symbols and thousand separators are tolerated.
pub(crate) fn parse_amount(s: &str) -> Option<f64> {
    let cleaned = s.trim().replace(['$', '₹', ','], "");
    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Some(amount),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let e = Expense::new(date, " Food ", 250.0, "lunch\nwith team ");
        assert_eq!(e.date, "2024-01-15");
        assert_eq!(e.category, "Food");
        assert_eq!(e.description, "lunch with team");
        assert_eq!(e.parsed_date(), Some(date));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250"), Some(250.0));
        assert_eq!(parse_amount(" 1,200.50 "), Some(1200.5));
        assert_eq!(parse_amount("$12"), Some(12.0));
        assert_eq!(parse_amount("-5"), Some(-5.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_missing_amount_display() {
        let e = Expense {
            date: "2024-01-01".to_string(),
            category: "Food".to_string(),
            amount: None,
            description: String::new(),
        };
        assert_eq!(e.amount_display(), "NaN");
        assert_eq!(e.valid_amount(), None);
    }
}
