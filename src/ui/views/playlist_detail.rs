use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tokio::task::JoinHandle;

use crate::event::events::Event;
use crate::http::model::PlaylistSong;
use crate::ui::util::get_active_track_icon;
use crate::ui::{
    components::spinner::Spinner,
    context::AppContext,
    state::{AppState, Section},
    traits::{Action, View},
};
use crate::util::colors;

pub struct PlaylistDetail {
    playlist_id: Option<i64>,
    songs: Vec<PlaylistSong>,
    list_state: ListState,
    is_loading: bool,
    filter: String,
    is_filtering: bool,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Default for PlaylistDetail {
    fn default() -> Self {
        Self {
            playlist_id: None,
            songs: Vec::new(),
            list_state: ListState::default(),
            is_loading: true,
            filter: String::new(),
            is_filtering: false,
            fetch_handle: None,
        }
    }
}

impl Drop for PlaylistDetail {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl PlaylistDetail {
    /// Songs surviving the client-side filter, with their positions in the
    /// unfiltered list.
    fn visible(&self) -> Vec<(usize, &PlaylistSong)> {
        let needle = self.filter.to_lowercase();
        self.songs
            .iter()
            .enumerate()
            .filter(|(_, song)| {
                needle.is_empty() || song.display_name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn selected_song(&self) -> Option<&PlaylistSong> {
        let visible = self.visible();
        self.list_state
            .selected()
            .and_then(|i| visible.get(i).map(|(_, song)| *song))
    }
}

#[async_trait]
impl View for PlaylistDetail {
    async fn on_mount(&mut self, ctx: &AppContext, state: &AppState) {
        let Some(playlist) = &state.data.selected_playlist else {
            self.is_loading = false;
            return;
        };
        self.playlist_id = Some(playlist.id);
        self.is_loading = true;

        let playlist_id = playlist.id;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            match api.fetch_playlist_songs(playlist_id).await {
                Ok(songs) => {
                    let _ = tx.send(Event::PlaylistSongsFetched { playlist_id, songs });
                }
                Err(e) => {
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        });
        self.fetch_handle = Some(handle);
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        let Some(playlist) = &state.data.selected_playlist else {
            f.render_widget(Paragraph::new("No playlist selected"), area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                playlist.name.clone(),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(colors::PRIMARY),
            )),
            Line::from(Span::styled(
                format!("{} songs", self.songs.len()),
                Style::default().fg(colors::NEUTRAL),
            )),
        ]);
        f.render_widget(header, chunks[0]);

        let filter_style = if self.is_filtering {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let filter_box = Paragraph::new(self.filter.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter")
                .border_style(filter_style),
        );
        f.render_widget(filter_box, chunks[1]);

        if self.is_loading && self.songs.is_empty() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading songs...".to_string());
            f.render_widget(spinner, chunks[2]);
            return;
        }

        let visible = self.visible();
        if visible.is_empty() {
            let label = if self.songs.is_empty() {
                "This playlist has no songs yet"
            } else {
                "No songs match the filter"
            };
            f.render_widget(Paragraph::new(label), chunks[2]);
            return;
        }

        let current_id = ctx.player.current_track().map(|t| t.song_id);
        let is_playing = ctx.player.is_playing();
        let items: Vec<ListItem> = visible
            .iter()
            .map(|(_, song)| {
                let is_current = current_id == Some(song.song_id);
                let prefix = if is_current {
                    format!("{} ", get_active_track_icon(is_playing))
                } else {
                    "  ".to_string()
                };
                let mut item = ListItem::new(format!("{}{}", prefix, song.display_name()));
                if is_current {
                    item = item.style(
                        Style::default()
                            .fg(colors::SECONDARY)
                            .add_modifier(Modifier::BOLD),
                    );
                }
                item
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        if self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }

        f.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if self.is_filtering {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
                KeyCode::Enter | KeyCode::Esc => self.is_filtering = false,
                KeyCode::Char(c) => {
                    self.filter.push(c);
                    self.list_state.select(Some(0));
                }
                KeyCode::Backspace => {
                    self.filter.pop();
                    self.list_state.select(Some(0));
                }
                _ => {}
            }
            return Some(Action::None);
        }

        let len = self.visible().len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 {
                    let i = self
                        .list_state
                        .selected()
                        .map_or(0, |i| if i >= len - 1 { i } else { i + 1 });
                    self.list_state.select(Some(i));
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if len > 0 {
                    let i = self
                        .list_state
                        .selected()
                        .map_or(0, |i| if i == 0 { 0 } else { i - 1 });
                    self.list_state.select(Some(i));
                }
                Some(Action::None)
            }
            KeyCode::Char('/') => {
                self.is_filtering = true;
                Some(Action::None)
            }
            KeyCode::Enter => self
                .selected_song()
                .map(|song| Action::PlaySong(song.song_id)),
            KeyCode::Char('a') => Some(Action::PlayAll),
            KeyCode::Char('x') => {
                if let (Some(playlist_id), Some(song)) = (self.playlist_id, self.selected_song()) {
                    let _ = ctx.event_tx.send(Event::RemoveSongFromPlaylist {
                        playlist_id,
                        song_id: song.song_id,
                    });
                }
                Some(Action::None)
            }
            KeyCode::Esc => Some(Action::Navigate(Section::Playlists)),
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::PlaylistSongsFetched { playlist_id, songs } => {
                // a late response for another playlist must not clobber
                // this one
                if self.playlist_id == Some(*playlist_id) {
                    self.songs = songs.clone();
                    self.is_loading = false;
                    if self.list_state.selected().is_none() && !self.songs.is_empty() {
                        self.list_state.select(Some(0));
                    }
                }
            }
            Event::FetchError(_) => {
                self.is_loading = false;
            }
            _ => {}
        }
    }
}
