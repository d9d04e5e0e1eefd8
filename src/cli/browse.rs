use std::path::Path;

use crate::browser::CardBrowser;
use crate::error::Result;
use crate::models::{load_expenses, Expense};
use crate::settings::load_settings;
use crate::tui;

pub fn run(file: &Path) -> Result<()> {
    let expenses = load_expenses(file)?;
    open(expenses)
}

/// Open the interactive browser over `expenses`.
pub(crate) fn open(expenses: Vec<Expense>) -> Result<()> {
    if expenses.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }
    let settings = load_settings();
    let mut browser = CardBrowser::new(expenses, settings.show_category, settings.theme());
    tui::run_view(&mut browser)?;
    let left = browser.expenses().len();
    println!("{left} expense(s) remaining.");
    Ok(())
}
