//! Plain-text rendering of the view model.

use std::io::{self, Write};

use expense_core::{Category, Connectivity, FilteredView, Mode, ViewModel};
use rust_decimal::Decimal;

pub const CURRENCY: &str = "₹";

pub fn fmt_money(amount: Decimal) -> String {
    format!("{CURRENCY}{:.2}", amount.round_dp(2))
}

/// Category tag: the named categories get an upper-case badge, anything
/// else the fallback look.
pub fn badge(category: &Category) -> String {
    if category.is_known() {
        format!("[{}]", category.as_str().to_uppercase())
    } else {
        format!("({})", category.as_str())
    }
}

/// Banner, form, table, and totals.
pub fn screen(view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
    banner(view, out)?;
    form(view, out)?;
    table(view, out)?;
    totals(view, out)
}

pub fn banner(view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
    if let Connectivity::Offline(reason) = view.connectivity() {
        writeln!(out, "!! Backend connection failed. ({reason})")?;
    }
    Ok(())
}

pub fn form(view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
    let heading = match view.mode() {
        Mode::Idle => "Add Transaction".to_string(),
        Mode::Editing(id) => format!("Edit Transaction #{id}"),
        Mode::Submitting(_) => "Saving...".to_string(),
    };
    let draft = view.form();
    writeln!(out, "== {heading} ==")?;
    writeln!(out, "  title   : {}", draft.title)?;
    writeln!(out, "  amount  : {}", draft.amount)?;
    writeln!(out, "  category: {}", draft.category)?;
    Ok(())
}

pub fn table(view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
    if !view.search().is_empty() {
        writeln!(out, "search: {:?}", view.search())?;
    }
    match view.filtered() {
        FilteredView::NoMatches { query } => {
            writeln!(out, "No matches found for \"{query}\"")?;
        }
        FilteredView::Matches(records) => {
            writeln!(out, "{:>5}  {:<24} {:<12} {:>12}", "ID", "ITEM", "CATEGORY", "AMOUNT")?;
            for record in records {
                writeln!(
                    out,
                    "{:>5}  {:<24} {:<12} {:>12}",
                    record.id,
                    record.title,
                    badge(&record.category),
                    fmt_money(record.amount)
                )?;
            }
        }
    }
    Ok(())
}

pub fn totals(view: &ViewModel, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Total Outflow: {}", fmt_money(view.total()))?;
    let by_category = view.category_totals();
    if !by_category.is_empty() {
        writeln!(out, "By Category:")?;
        for (category, amount) in by_category {
            writeln!(out, "  {:<12} {:>12}", badge(&category), fmt_money(amount))?;
        }
    }
    Ok(())
}
