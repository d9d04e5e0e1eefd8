//! Terminal expense cards.
//!
//! [`card::ExpenseCard`] renders one [`models::Expense`] into a
//! [`card::CardView`] that draws itself with ratatui; [`browser::CardBrowser`]
//! stacks cards into an interactive list.

pub mod browser;
pub mod card;
pub mod cli;
pub mod error;
pub mod fmt;
pub mod models;
pub mod settings;
pub mod tui;
