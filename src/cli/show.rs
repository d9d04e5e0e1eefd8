use crate::card::{CardOptions, ClickEvent, ExpenseCard};
use crate::error::Result;
use crate::models::Expense;
use crate::settings::load_settings;

pub struct ShowArgs {
    pub expense: Expense,
    pub options: CardOptions,
    pub deletable: bool,
    pub click_delete: bool,
    pub width: u16,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let theme = load_settings().theme();
    let mut deleted = Vec::new();
    {
        let mut card = ExpenseCard::new(&args.expense).options(args.options);
        if args.deletable || args.click_delete {
            card = card.on_delete(|id| deleted.push(id));
        }

        let view = card.render()?.with_theme(theme);
        for line in view.to_plain_text(args.width.max(view.min_width())) {
            println!("{line}");
        }

        if args.click_delete {
            card.handle_delete(&mut ClickEvent::new());
        }
    }
    for id in deleted {
        println!("Delete requested for expense #{id}");
    }
    Ok(())
}
