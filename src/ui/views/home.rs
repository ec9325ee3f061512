use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::session::Role;
use crate::ui::{
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

#[derive(Default)]
pub struct Home;

#[async_trait]
impl View for Home {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        let (title, subtitle, cta) = match state.session.role() {
            Role::Admin => (
                format!(
                    "Welcome back, {}!",
                    state.session.display_name().unwrap_or_else(|| "Admin".into())
                ),
                "Manage the music library and curate content".to_string(),
                "[4] Manage Songs   [2] Explore Songs".to_string(),
            ),
            Role::User => (
                format!(
                    "Welcome back, {}!",
                    state.session.display_name().unwrap_or_else(|| "User".into())
                ),
                "Discover and save your favorite songs".to_string(),
                "[2] Explore Songs   [3] My Playlists".to_string(),
            ),
            Role::None => (
                "Welcome to Music Library".to_string(),
                "Discover, organize, and enjoy your favorite music".to_string(),
                "[5] Login   [6] Register".to_string(),
            ),
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);

        let title_line = Paragraph::new(Line::from(Span::styled(
            title,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title_line, chunks[1]);

        let subtitle_line = Paragraph::new(subtitle).alignment(Alignment::Center);
        f.render_widget(subtitle_line, chunks[2]);

        let cta_line = Paragraph::new(Line::from(Span::styled(
            cta,
            Style::default().fg(colors::ACCENT),
        )))
        .alignment(Alignment::Center);
        f.render_widget(cta_line, chunks[3]);
    }

    async fn handle_input(
        &mut self,
        _key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        None
    }
}
