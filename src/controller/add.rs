use std::io::Write;
use chrono::NaiveDate;
use log::warn;
use crate::controller::{Context, LineSource};
use crate::expense::{parse_amount, Expense};
use crate::util::{parse_date, today};

/// Prompt for a new expense and append it. Returns `None` if the user quit half way or
/// the expense couldn't be saved.
pub(crate) fn add_expense<W: Write>(ctx: &Context, input: &mut dyn LineSource, out: &mut W) -> anyhow::Result<Option<Expense>> {
    let Some(date) = ask_date(input, out)? else { return Ok(None) };
    let Some(amount) = ask_amount(input, out)? else { return Ok(None) };
    let Some(description) = input.read_line("Enter a short description: ")? else { return Ok(None) };

    let predicted = ctx.classifier.predict(&description);
    let Some(category) = input.read_line(&format!("Category [{predicted}] (Enter to accept): "))? else { return Ok(None) };
    let category = if category.trim().is_empty() { predicted } else { category.trim().to_string() };

    let expense = Expense::new(date, &category, amount, &description);
    match ctx.store.append(&expense) {
        Ok(()) => {
            writeln!(out, "Expense added successfully under '{}'!", expense.category)?;
            Ok(Some(expense))
        }
        Err(e) => {
            warn!("Failed to append to {}: {}", ctx.store.path().display(), e);
            writeln!(out, "Unable to save expense: {e}")?;
            Ok(None)
        }
    }
}

fn ask_date<W: Write>(input: &mut dyn LineSource, out: &mut W) -> anyhow::Result<Option<NaiveDate>> {
    loop {
        let Some(line) = input.read_line("Enter date (YYYY-MM-DD, Enter for today): ")? else { return Ok(None) };
        if line.trim().is_empty() {
            return Ok(Some(today()));
        }
        match parse_date(&line) {
            Some(date) => return Ok(Some(date)),
            None => writeln!(out, "Invalid date '{}', please use YYYY-MM-DD.", line.trim())?,
        }
    }
}

fn ask_amount<W: Write>(input: &mut dyn LineSource, out: &mut W) -> anyhow::Result<Option<f64>> {
    loop {
        let Some(line) = input.read_line("Enter amount: ")? else { return Ok(None) };
        match parse_amount(&line) {
            Some(amount) => return Ok(Some(amount)),
            None => writeln!(out, "Invalid amount '{}', please enter a number.", line.trim())?,
        }
    }
}
