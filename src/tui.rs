use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use crossterm::execute;
use ratatui::style::{Color, Modifier, Style};
use ratatui::Frame;

use crate::error::Result;

pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

pub const FOOTER_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const ERROR_STYLE: Style = Style::new().fg(Color::Red);

// Card palette (drawn on a light background).
pub const CARD_TEXT_STYLE: Style = Style::new().fg(Color::Black);
pub const AMOUNT_POS_STYLE: Style = Style::new().fg(Color::Rgb(20, 120, 40));
pub const AMOUNT_NEG_STYLE: Style = Style::new().fg(Color::Rgb(190, 30, 30));

pub const BADGE_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(60, 60, 80))
    .add_modifier(Modifier::BOLD);

pub const BUTTON_STYLE: Style = Style::new()
    .fg(Color::White)
    .bg(Color::Rgb(68, 68, 68));

/// Style for a formatted amount: red when negative, green otherwise.
pub fn amount_style(negative: bool) -> Style {
    if negative {
        AMOUNT_NEG_STYLE
    } else {
        AMOUNT_POS_STYLE
    }
}

/// Wrap text to a given width. Returns (wrapped_string, line_count).
pub fn wrap_text(text: &str, width: usize) -> (String, u16) {
    if width == 0 {
        return (text.to_string(), 1);
    }
    let wrapped = textwrap::fill(text, width);
    let lines = wrapped.lines().count().max(1) as u16;
    (wrapped, lines)
}

pub enum ViewAction {
    Continue,
    Close,
}

pub trait InteractiveView {
    fn draw(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, code: KeyCode) -> ViewAction;
    fn handle_mouse(&mut self, _event: MouseEvent) -> ViewAction {
        ViewAction::Continue
    }
}

/// Run an interactive ratatui view with mouse capture. Sets up the terminal,
/// event loop, and panic hook, then restores the terminal on exit.
pub fn run_view(view: &mut dyn InteractiveView) -> Result<()> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        hook(info);
    }));

    let mut terminal = ratatui::init();
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| view.draw(frame)) {
            break Err(e.into());
        }

        let action = match event::read() {
            Err(e) => break Err(e.into()),
            Ok(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break Ok(());
                }
                view.handle_key(key.code)
            }
            Ok(Event::Mouse(mouse)) => view.handle_mouse(mouse),
            _ => ViewAction::Continue,
        };
        if let ViewAction::Close = action {
            break Ok(());
        }
    };

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    drop(terminal);
    ratatui::restore();
    result
}
