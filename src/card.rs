//! The expense card: a stateless view of one [`Expense`].
//!
//! [`ExpenseCard::render`] turns a record plus display flags into a
//! [`CardView`], which paints itself as a ratatui widget. The only outbound
//! path is the optional delete handler, fired through
//! [`ExpenseCard::handle_delete`].

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::error::Result;
use crate::fmt::{money, short_date};
use crate::models::Expense;
use crate::tui::{self, BADGE_STYLE, BUTTON_STYLE, CARD_TEXT_STYLE};

pub const HIGHLIGHT_BG: Color = Color::Rgb(129, 203, 54);
pub const NEUTRAL_BG: Color = Color::Rgb(255, 255, 255);

const DELETE_LABEL: &str = "Delete";
const DELETE_ARIA_LABEL: &str = "Delete expense";

/// Display flags. `Default` gives `highlight = false, show_category = true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOptions {
    pub highlight: bool,
    pub show_category: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            highlight: false,
            show_category: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Highlight,
    Neutral,
}

/// Concrete colors for the two backgrounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTheme {
    pub highlight: Color,
    pub neutral: Color,
}

impl Default for CardTheme {
    fn default() -> Self {
        Self {
            highlight: HIGHLIGHT_BG,
            neutral: NEUTRAL_BG,
        }
    }
}

impl CardTheme {
    pub fn color(&self, background: Background) -> Color {
        match background {
            Background::Highlight => self.highlight,
            Background::Neutral => self.neutral,
        }
    }
}

/// A pointer/key interaction routed to a card control.
#[derive(Debug, Default)]
pub struct ClickEvent {
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep ancestor handlers from seeing this event.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabel {
    /// The date string as supplied by the caller.
    pub datetime: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub label: &'static str,
    pub aria_label: &'static str,
}

impl DeleteControl {
    fn button_text(&self) -> String {
        format!("[ {} ]", self.label)
    }
}

/// The rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: i64,
    pub background: Background,
    pub category_badge: Option<String>,
    pub date: DateLabel,
    pub description: String,
    pub amount: String,
    pub negative: bool,
    pub delete_control: Option<DeleteControl>,
    pub theme: CardTheme,
}

pub type DeleteHandler<'a> = Box<dyn FnMut(i64) + 'a>;

pub struct ExpenseCard<'a> {
    expense: &'a Expense,
    options: CardOptions,
    on_delete: Option<DeleteHandler<'a>>,
}

impl<'a> ExpenseCard<'a> {
    pub fn new(expense: &'a Expense) -> Self {
        Self {
            expense,
            options: CardOptions::default(),
            on_delete: None,
        }
    }

    pub fn options(mut self, options: CardOptions) -> Self {
        self.options = options;
        self
    }

    pub fn highlight(mut self, highlight: bool) -> Self {
        self.options.highlight = highlight;
        self
    }

    pub fn show_category(mut self, show_category: bool) -> Self {
        self.options.show_category = show_category;
        self
    }

    /// Supplying a handler is what makes the delete control appear.
    pub fn on_delete(mut self, handler: impl FnMut(i64) + 'a) -> Self {
        self.on_delete = Some(Box::new(handler));
        self
    }

    /// Build the view. Fails with `InvalidDate` when the date can't be parsed;
    /// no placeholder date is ever produced.
    pub fn render(&self) -> Result<CardView> {
        let e = self.expense;
        let date_text = short_date(&e.date).inspect_err(|err| {
            log::debug!("expense {} not rendered: {err}", e.id);
        })?;

        let background = if self.options.highlight {
            Background::Highlight
        } else {
            Background::Neutral
        };

        let delete_control = self.on_delete.as_ref().map(|_| DeleteControl {
            label: DELETE_LABEL,
            aria_label: DELETE_ARIA_LABEL,
        });

        log::debug!(
            "render expense {} (highlight={}, show_category={}, deletable={})",
            e.id,
            self.options.highlight,
            self.options.show_category,
            delete_control.is_some()
        );

        Ok(CardView {
            id: e.id,
            background,
            category_badge: self
                .options
                .show_category
                .then(|| e.category.to_string()),
            date: DateLabel {
                datetime: e.date.clone(),
                text: date_text,
            },
            description: e.description.clone(),
            amount: money(e.amount),
            negative: e.amount < 0.0,
            delete_control,
            theme: CardTheme::default(),
        })
    }

    /// Delete control activation: stops the event, then calls the handler
    /// once with this record's id.
    pub fn handle_delete(&mut self, event: &mut ClickEvent) {
        event.stop_propagation();
        let id = self.expense.id;
        if let Some(handler) = self.on_delete.as_mut() {
            log::debug!("delete requested for expense {id}");
            handler(id);
        }
    }
}

fn badge_text(badge: &str) -> String {
    format!(" {badge} ")
}

struct Sections {
    header: Rect,
    description: Rect,
    amount: Rect,
    button: Rect,
}

impl CardView {
    pub fn with_theme(mut self, theme: CardTheme) -> Self {
        self.theme = theme;
        self
    }

    fn description_lines(&self, inner_width: u16) -> (String, u16) {
        tui::wrap_text(&self.description, inner_width as usize)
    }

    /// Narrowest width, borders included, at which the badge and the date
    /// both fit on the header line.
    pub fn min_width(&self) -> u16 {
        let date = self.date.text.chars().count();
        let badge = self
            .category_badge
            .as_deref()
            .map_or(0, |b| badge_text(b).chars().count() + 1);
        (2 + badge + date) as u16
    }

    /// Rows needed to draw the card at `width` columns, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let (_, desc_lines) = self.description_lines(width.saturating_sub(2));
        let button = u16::from(self.delete_control.is_some());
        2 + 1 + desc_lines + 1 + button
    }

    fn sections(&self, area: Rect) -> (Sections, String) {
        let inner = Block::bordered().inner(area);
        let (wrapped, desc_lines) = self.description_lines(inner.width);
        let button = u16::from(self.delete_control.is_some());
        let [header, description, amount, button] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(desc_lines),
            Constraint::Length(1),
            Constraint::Length(button),
        ])
        .areas(inner);
        (
            Sections {
                header,
                description,
                amount,
                button,
            },
            wrapped,
        )
    }

    /// Where the delete button lands when the card is drawn into `area`.
    pub fn delete_button_area(&self, area: Rect) -> Option<Rect> {
        let control = self.delete_control.as_ref()?;
        let (sections, _) = self.sections(area);
        let b = sections.button;
        if b.height == 0 || b.width == 0 {
            return None;
        }
        let width = (control.button_text().chars().count() as u16).min(b.width);
        Some(Rect::new(b.x, b.y, width, 1))
    }

    /// Paint into an off-screen buffer and return the lines, right-trimmed.
    pub fn to_plain_text(&self, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, self.height(width));
        let mut buf = Buffer::empty(area);
        Widget::render(self, area, &mut buf);
        (area.top()..area.bottom())
            .map(|y| {
                let line: String = (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }
}

impl Widget for &CardView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = self.theme.color(self.background);
        let block = Block::bordered().style(CARD_TEXT_STYLE.bg(bg));
        let (sections, wrapped) = self.sections(area);
        block.render(area, buf);

        // The date keeps its full width; the badge is clipped first.
        let date_width = self.date.text.chars().count() as u16;
        let [badge_area, date_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(date_width)])
                .spacing(1)
                .areas(sections.header);
        if let Some(badge) = &self.category_badge {
            Paragraph::new(Line::from(Span::styled(badge_text(badge), BADGE_STYLE)))
                .render(badge_area, buf);
        }
        Paragraph::new(self.date.text.as_str())
            .alignment(Alignment::Right)
            .render(date_area, buf);

        Paragraph::new(wrapped)
            .style(Style::new().add_modifier(Modifier::BOLD))
            .render(sections.description, buf);

        Paragraph::new(Span::styled(
            self.amount.as_str(),
            tui::amount_style(self.negative),
        ))
        .render(sections.amount, buf);

        if let Some(control) = &self.delete_control {
            Paragraph::new(Span::styled(control.button_text(), BUTTON_STYLE))
                .render(sections.button, buf);
        }
    }
}
