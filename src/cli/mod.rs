pub mod browse;
pub mod config;
pub mod demo;
pub mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::ExpenseCategory;

#[derive(Parser)]
#[command(name = "expense-card", about = "Render expense records as terminal cards.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a single expense card.
    Show {
        /// Expense id
        #[arg(long)]
        id: i64,
        /// What the expense was for
        #[arg(long)]
        description: String,
        /// Amount in US dollars (negative for refunds)
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
        /// Food, Transportation, Entertainment or Other
        #[arg(long)]
        category: ExpenseCategory,
        /// Date of the expense (e.g. 2024-03-05)
        #[arg(long)]
        date: String,
        /// Use the highlight background
        #[arg(long)]
        highlight: bool,
        /// Leave out the category badge
        #[arg(long = "hide-category")]
        hide_category: bool,
        /// Render the delete control
        #[arg(long)]
        deletable: bool,
        /// Render the delete control and activate it once
        #[arg(long = "click-delete")]
        click_delete: bool,
        /// Card width in columns (widened to fit the badge and date)
        #[arg(long, default_value_t = 40)]
        width: u16,
    },
    /// Browse expenses from a JSON file.
    Browse {
        /// JSON array of {id, description, amount, category, date}
        file: PathBuf,
    },
    /// Browse a set of sample expenses.
    Demo,
    /// Show the settings file location and effective settings.
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        init: bool,
    },
}
