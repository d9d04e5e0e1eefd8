use clap::Parser;
use colored::Colorize;

use expense_card::card::CardOptions;
use expense_card::cli::{self, show::ShowArgs, Cli, Commands};
use expense_card::models::Expense;
use expense_card::settings::{load_settings, log_filter};

fn init_logging(settings_level: &str) {
    let expense_card_log = std::env::var("EXPENSE_CARD_LOG").ok();
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(filter) = log_filter(expense_card_log.as_deref(), rust_log_set, settings_level) {
        builder.filter_level(filter);
    }
    builder.format_timestamp_secs().format_target(false).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&load_settings().log_level);

    let result = match cli.command {
        Commands::Show {
            id,
            description,
            amount,
            category,
            date,
            highlight,
            hide_category,
            deletable,
            click_delete,
            width,
        } => cli::show::run(ShowArgs {
            expense: Expense {
                id,
                description,
                amount,
                category,
                date,
            },
            options: CardOptions {
                highlight,
                show_category: !hide_category,
            },
            deletable,
            click_delete,
            width,
        }),
        Commands::Browse { file } => cli::browse::run(&file),
        Commands::Demo => cli::demo::run(),
        Commands::Config { init } => cli::config::run(init),
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}
