use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};

use crate::util::colors;

/// One editable line of a form.
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: true,
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let shown = if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        let widget = Paragraph::new(shown).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.label)
                .border_style(border),
        );
        f.render_widget(widget, area);
    }
}
