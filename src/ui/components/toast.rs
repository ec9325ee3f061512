use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::event::events::NoticeKind;
use crate::ui::state::Toast;
use crate::util::colors;

pub struct ToastLine<'a> {
    toast: &'a Toast,
}

impl<'a> ToastLine<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }
}

impl<'a> Widget for ToastLine<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = match self.toast.kind {
            NoticeKind::Success => colors::PRIMARY,
            NoticeKind::Error => colors::ERROR,
        };
        Line::from(Span::styled(
            format!(" {}", self.toast.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .render(area, buf);
    }
}
