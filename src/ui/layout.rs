use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
};

use crate::{
    ui::{
        app::App,
        components::{navbar::Navbar, player_bar::PlayerBar, toast::ToastLine},
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame) {
        let area = f.area();
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let navbar_area = chunks[0];
        let toast_area = chunks[1];
        let content_area = chunks[2];
        let player_area = chunks[3];

        let App {
            router,
            state,
            ctx,
            ..
        } = self.app;

        f.render_widget(Navbar::new(&state.session, router.section()), navbar_area);

        if let Some(toast) = state.ui.toast() {
            f.render_widget(ToastLine::new(toast), toast_area);
        }

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title(router.section().title())
            .title_alignment(Alignment::Center);
        let inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);
        router.render(f, inner, state, ctx);

        f.render_widget(PlayerBar::new(&ctx.player), player_area);
    }
}
