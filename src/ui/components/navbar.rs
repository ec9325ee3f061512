use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::session::{Role, Session};
use crate::ui::state::Section;
use crate::util::colors;

/// Top navigation strip: section tabs on the left, profile on the right.
/// Which tabs show depends on the session: admins manage songs instead of
/// playlists, guests get login/register.
pub struct Navbar<'a> {
    session: &'a Session,
    active: Section,
}

impl<'a> Navbar<'a> {
    pub fn new(session: &'a Session, active: Section) -> Self {
        Self { session, active }
    }

    fn tabs(&self) -> Vec<(Section, &'static str)> {
        let mut tabs = vec![(Section::Home, "[1] Home"), (Section::Songs, "[2] Songs")];
        match self.session.role() {
            Role::Admin => tabs.push((Section::AdminPanel, "[4] Admin")),
            Role::User => tabs.push((Section::Playlists, "[3] Playlists")),
            Role::None => {
                tabs.push((Section::Playlists, "[3] Playlists"));
                tabs.push((Section::Login, "[5] Login"));
                tabs.push((Section::Register, "[6] Register"));
            }
        }
        tabs
    }
}

impl<'a> Widget for Navbar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (section, label) in self.tabs() {
            let style = if section == self.active {
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::NEUTRAL)
            };
            spans.push(Span::styled(format!(" {label} "), style));
        }
        Line::from(spans).render(area, buf);

        let profile = match self.session.display_name() {
            Some(name) => format!("{} ({})", name, self.session.role().label()),
            None => "not logged in".to_string(),
        };
        let width = profile.len() as u16;
        if area.width > width {
            buf.set_string(
                area.x + area.width - width - 1,
                area.y,
                profile,
                Style::default().fg(colors::ACCENT),
            );
        }
    }
}
