use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, TableComponent};
use crate::aggregate::{CategoryTotals, MonthKey};
use crate::expense::Expense;
use crate::store::MalformedRow;

/// Table with only vertical separators
fn new_table() -> Table {
    let mut table = Table::new();
    table.remove_style(TableComponent::HorizontalLines);
    table.remove_style(TableComponent::MiddleIntersections);
    table.remove_style(TableComponent::LeftBorderIntersections);
    table.remove_style(TableComponent::RightBorderIntersections);
    table
}

pub(crate) fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Every loaded expense, in file order
pub(crate) fn expenses_table(expenses: &[Expense]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Date", "Category", "Amount", "Description"]);

    for (i, e) in expenses.iter().enumerate() {
        let amount = Cell::new(e.amount_display()).set_alignment(CellAlignment::Right);
        // Rows that won't count towards any total
        let amount = if e.valid_amount().is_none() { amount.fg(Color::Red) } else { amount };
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(e.date.as_str()),
            Cell::new(e.category.as_str()),
            amount,
            Cell::new(e.description.as_str()),
        ]);
    }

    table
}

pub(crate) fn category_table(totals: &CategoryTotals, currency: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Category", "Amount"]);

    for (category, amount) in totals.sorted() {
        table.add_row(vec![
            Cell::new(category),
            Cell::new(format!("{}{}", currency, format_amount(amount))).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total Spent").add_attribute(Attribute::Bold),
        Cell::new(format!("{}{}", currency, format_amount(totals.grand_total)))
            .add_attribute(Attribute::Bold)
            .set_alignment(CellAlignment::Right),
    ]);

    table
}

pub(crate) fn monthly_table(months: &[(MonthKey, f64)], currency: &str) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Month", "Amount"]);

    for (month, amount) in months {
        table.add_row(vec![
            Cell::new(month.to_string()),
            Cell::new(format!("{}{}", currency, format_amount(*amount))).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

pub(crate) fn malformed_table(rows: &[MalformedRow]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Line", "Commas"]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.line).set_alignment(CellAlignment::Right),
            Cell::new(row.delimiters).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}
