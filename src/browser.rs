use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Layout, Position, Rect},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::card::{CardOptions, CardTheme, CardView, ClickEvent, ExpenseCard};
use crate::error::Result;
use crate::fmt::money;
use crate::models::Expense;
use crate::tui::{InteractiveView, ViewAction, ERROR_STYLE, FOOTER_STYLE, HEADER_STYLE};

const MAX_CARD_WIDTH: u16 = 60;
const ERROR_CARD_HEIGHT: u16 = 3;

/// Where a card was drawn on the last frame.
struct CardSlot {
    index: usize,
    area: Rect,
    delete_area: Option<Rect>,
}

/// Scrollable stack of expense cards. Owns the records and performs the
/// removal when a card reports a delete.
pub struct CardBrowser {
    expenses: Vec<Expense>,
    selected: usize,
    offset: usize,
    show_category: bool,
    theme: CardTheme,
    status_message: Option<String>,
    slots: Vec<CardSlot>,
}

impl CardBrowser {
    pub fn new(expenses: Vec<Expense>, show_category: bool, theme: CardTheme) -> Self {
        Self {
            expenses,
            selected: 0,
            offset: 0,
            show_category,
            theme,
            status_message: None,
            slots: Vec::new(),
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn card_options(&self, index: usize) -> CardOptions {
        CardOptions {
            highlight: index == self.selected,
            show_category: self.show_category,
        }
    }

    /// Render the card at `index`. Deletes are routed through
    /// `dispatch_delete`, so the handler here is inert.
    fn view_for(&self, index: usize) -> Result<CardView> {
        ExpenseCard::new(&self.expenses[index])
            .options(self.card_options(index))
            .on_delete(|_| {})
            .render()
            .map(|view| view.with_theme(self.theme))
    }

    /// Route a delete activation to the card at `index`. Returns the event so
    /// the caller can honor `stop_propagation`.
    fn dispatch_delete(&mut self, index: usize) -> ClickEvent {
        let mut event = ClickEvent::new();
        let mut requested = None;
        {
            let mut card = ExpenseCard::new(&self.expenses[index])
                .options(self.card_options(index))
                .on_delete(|id| requested = Some(id));
            card.handle_delete(&mut event);
        }
        if let Some(id) = requested {
            self.remove(id);
        }
        event
    }

    fn remove(&mut self, id: i64) {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return;
        }
        log::info!("removed expense {id}");
        self.selected = self.selected.min(self.expenses.len().saturating_sub(1));
        self.offset = self.offset.min(self.selected);
        self.status_message = Some(format!("Deleted expense #{id}"));
    }

    fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    fn card_width(area: Rect) -> u16 {
        area.width.min(MAX_CARD_WIDTH)
    }

    fn card_height(&self, index: usize, width: u16) -> u16 {
        match self.view_for(index) {
            Ok(view) => view.height(width),
            Err(_) => ERROR_CARD_HEIGHT,
        }
    }

    /// Move `offset` forward until the selected card fits in `height` rows.
    fn scroll_to_selected(&mut self, width: u16, height: u16) {
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        loop {
            let used: u16 = (self.offset..=self.selected)
                .map(|i| self.card_height(i, width))
                .sum();
            if used <= height || self.offset >= self.selected {
                break;
            }
            self.offset += 1;
        }
    }

    fn select_next(&mut self) {
        if self.selected + 1 < self.expenses.len() {
            self.selected += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Draw the browser into the given frame. Callable from an external event loop.
    pub fn draw_frame(&mut self, frame: &mut Frame) {
        let [title_area, cards_area, status_area, keys_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(Paragraph::new("Expenses").style(HEADER_STYLE), title_area);
        self.slots.clear();

        if self.expenses.is_empty() {
            frame.render_widget(
                Paragraph::new("No expenses.").style(FOOTER_STYLE),
                cards_area,
            );
        } else {
            let width = Self::card_width(cards_area);
            self.scroll_to_selected(width, cards_area.height);

            let mut y = cards_area.y;
            for index in self.offset..self.expenses.len() {
                let remaining = cards_area.bottom().saturating_sub(y);
                if remaining == 0 {
                    break;
                }
                match self.view_for(index) {
                    Ok(view) => {
                        let height = view.height(width);
                        if height > remaining && index != self.selected {
                            break;
                        }
                        let area = Rect::new(cards_area.x, y, width, height.min(remaining));
                        frame.render_widget(&view, area);
                        let delete_area = view
                            .delete_button_area(area)
                            .filter(|b| b.bottom() <= area.bottom());
                        self.slots.push(CardSlot {
                            index,
                            area,
                            delete_area,
                        });
                        y += area.height;
                    }
                    Err(e) => {
                        let area = Rect::new(
                            cards_area.x,
                            y,
                            width,
                            ERROR_CARD_HEIGHT.min(remaining),
                        );
                        let id = self.expenses[index].id;
                        frame.render_widget(
                            Paragraph::new(Line::from(format!("#{id}: {e}")))
                                .style(ERROR_STYLE)
                                .block(Block::bordered()),
                            area,
                        );
                        self.slots.push(CardSlot {
                            index,
                            area,
                            delete_area: None,
                        });
                        y += area.height;
                    }
                }
            }
        }

        let count = self.expenses.len();
        let status = match &self.status_message {
            Some(msg) => format!("{count} expenses | Total: {} | {msg}", money(self.total())),
            None => format!("{count} expenses | Total: {}", money(self.total())),
        };
        frame.render_widget(Paragraph::new(status).style(FOOTER_STYLE), status_area);
        frame.render_widget(
            Paragraph::new("\u{2191}/\u{2193}:select  x:delete  c:categories  click:select  q:quit")
                .style(FOOTER_STYLE),
            keys_area,
        );
    }

    /// Handle a key event. Returns a ViewAction indicating what the caller should do.
    pub fn handle_key_event(&mut self, code: KeyCode) -> ViewAction {
        self.status_message = None;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.expenses.len().saturating_sub(1),
            KeyCode::Char('c') => self.show_category = !self.show_category,
            KeyCode::Char('x') | KeyCode::Delete => {
                if !self.expenses.is_empty() {
                    self.dispatch_delete(self.selected);
                }
            }
            _ => {}
        }
        ViewAction::Continue
    }

    /// Left click: the delete button wins; anywhere else on a card selects it.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> ViewAction {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return ViewAction::Continue;
        }
        let pos = Position::new(event.column, event.row);
        let Some(slot) = self.slots.iter().find(|s| s.area.contains(pos)) else {
            return ViewAction::Continue;
        };
        let index = slot.index;
        let on_button = slot.delete_area.is_some_and(|b| b.contains(pos));

        self.status_message = None;
        let stopped = on_button && self.dispatch_delete(index).is_propagation_stopped();
        if !stopped {
            self.selected = index;
        }
        ViewAction::Continue
    }
}

impl InteractiveView for CardBrowser {
    fn draw(&mut self, frame: &mut Frame) {
        self.draw_frame(frame);
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.handle_key_event(code)
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> ViewAction {
        self.handle_mouse_event(event)
    }
}
