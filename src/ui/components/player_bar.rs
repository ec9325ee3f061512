use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{LineGauge, Widget},
};

use crate::player::Player;
use crate::ui::util::{format_time, get_active_track_icon, truncate_to_width};
use crate::util::colors;

pub struct PlayerBar<'a> {
    player: &'a Player,
}

impl<'a> PlayerBar<'a> {
    pub fn new(player: &'a Player) -> Self {
        Self { player }
    }
}

impl<'a> Widget for PlayerBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40),
                Constraint::Length(16),
                Constraint::Min(20),
            ])
            .split(area);

        let title = match self.player.current_track() {
            Some(track) => format!(
                "{} {}",
                get_active_track_icon(self.player.is_playing()),
                track.display_name()
            ),
            None => "No song selected".to_string(),
        };
        let title = truncate_to_width(&title, chunks[0].width.saturating_sub(2) as usize);
        Line::from(Span::styled(
            format!(" {title}"),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))
        .render(chunks[0], buf);

        let flag = |on: bool| {
            if on {
                Style::default().fg(colors::PRIMARY)
            } else {
                Style::default().fg(colors::NEUTRAL)
            }
        };
        Line::from(vec![
            Span::styled("[shuf]", flag(self.player.shuffle())),
            Span::raw(" "),
            Span::styled("[rep]", flag(self.player.repeat())),
        ])
        .render(chunks[1], buf);

        let (position, duration) = self.player.progress();
        let ratio = if duration == 0 {
            0.0
        } else {
            (position as f64 / duration as f64).clamp(0.0, 1.0)
        };
        let gauge = LineGauge::default()
            .filled_style(Style::default().fg(colors::SECONDARY))
            .unfilled_style(Style::default().fg(colors::NEUTRAL))
            .label(format!(
                "{} / {}",
                format_time(position),
                format_time(duration)
            ))
            .ratio(ratio);
        gauge.render(chunks[2], buf);
    }
}
