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

use crate::event::events::{Event, NoticeKind};
use crate::http::model::{PlaylistSong, Song};
use crate::ui::{
    components::spinner::Spinner,
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

#[derive(Default, PartialEq)]
enum InputMode {
    #[default]
    List,
    Search,
    /// Asking for the playlist id to add the selected song to.
    AddToPlaylist,
}

pub struct Songs {
    list_state: ListState,
    songs: Vec<Song>,
    is_loading: bool,
    mode: InputMode,
    search_input: String,
    playlist_input: String,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Default for Songs {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            songs: Vec::new(),
            is_loading: true,
            mode: InputMode::List,
            search_input: String::new(),
            playlist_input: String::new(),
            fetch_handle: None,
        }
    }
}

impl Drop for Songs {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl Songs {
    fn spawn_load(&mut self, ctx: &AppContext) {
        self.is_loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            match api.fetch_visible_songs().await {
                Ok(songs) => {
                    let _ = tx.send(Event::SongsFetched(songs));
                }
                Err(e) => {
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        });
        self.fetch_handle = Some(handle);
    }

    fn spawn_search(&mut self, ctx: &AppContext, query: String) {
        self.is_loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            match api.search_songs(&query).await {
                Ok(songs) => {
                    let _ = tx.send(Event::SongsFetched(songs));
                }
                Err(e) => {
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        });
        self.fetch_handle = Some(handle);
    }

    fn selected_song(&self) -> Option<&Song> {
        self.list_state.selected().and_then(|i| self.songs.get(i))
    }

    fn submit_add(&mut self, ctx: &AppContext, state: &AppState) {
        if !state.session.is_logged_in() {
            let _ = ctx.event_tx.send(Event::Notice(
                "Please login to add songs to playlists".into(),
                NoticeKind::Error,
            ));
            return;
        }
        let Ok(playlist_id) = self.playlist_input.trim().parse::<i64>() else {
            let _ = ctx.event_tx.send(Event::Notice(
                "Enter a numeric playlist id".into(),
                NoticeKind::Error,
            ));
            return;
        };
        if let Some(song) = self.selected_song() {
            let _ = ctx.event_tx.send(Event::AddSongToPlaylist {
                playlist_id,
                song_id: song.id,
                song_name: song.name.clone(),
            });
        }
    }
}

#[async_trait]
impl View for Songs {
    async fn on_mount(&mut self, ctx: &AppContext, _state: &AppState) {
        self.spawn_load(ctx);
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let (input, title) = match self.mode {
            InputMode::AddToPlaylist => (&self.playlist_input, "Add to playlist (id)"),
            _ => (&self.search_input, "Search songs"),
        };
        let input_style = if self.mode != InputMode::List {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let search_box = Paragraph::new(input.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(input_style),
        );
        f.render_widget(search_box, chunks[0]);

        if self.is_loading && self.songs.is_empty() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading songs...".to_string());
            f.render_widget(spinner, chunks[1]);
            return;
        }

        if self.songs.is_empty() {
            f.render_widget(Paragraph::new("No songs available"), chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .songs
            .iter()
            .map(|song| {
                let singer = song.singer.as_deref().unwrap_or("Unknown Singer");
                let album = song.album_name.as_deref().unwrap_or("Unknown Album");
                let mut spans = vec![
                    Span::raw(song.name.clone()),
                    Span::raw(" - "),
                    Span::raw(singer.to_string()),
                    Span::styled(
                        format!("  [{album}]"),
                        Style::default().fg(colors::NEUTRAL),
                    ),
                ];
                if let Some(minutes) = song.duration_minutes {
                    spans.push(Span::styled(
                        format!(" {minutes}min"),
                        Style::default().fg(colors::NEUTRAL),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        if !self.songs.is_empty() && self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match self.mode {
            InputMode::Search => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    let query = self.search_input.trim().to_string();
                    if query.is_empty() {
                        // clearing the search goes back to the full listing
                        self.spawn_load(ctx);
                    } else {
                        self.spawn_search(ctx, query);
                    }
                    self.mode = InputMode::List;
                    Some(Action::None)
                }
                KeyCode::Esc => {
                    self.mode = InputMode::List;
                    Some(Action::None)
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    Some(Action::None)
                }
                _ => Some(Action::None),
            },
            InputMode::AddToPlaylist => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
                KeyCode::Enter => {
                    self.submit_add(ctx, state);
                    self.playlist_input.clear();
                    self.mode = InputMode::List;
                    Some(Action::None)
                }
                KeyCode::Esc => {
                    self.playlist_input.clear();
                    self.mode = InputMode::List;
                    Some(Action::None)
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    self.playlist_input.push(c);
                    Some(Action::None)
                }
                KeyCode::Backspace => {
                    self.playlist_input.pop();
                    Some(Action::None)
                }
                _ => Some(Action::None),
            },
            InputMode::List => {
                let len = self.songs.len();
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
                        self.mode = InputMode::Search;
                        Some(Action::None)
                    }
                    KeyCode::Char('a') => {
                        if self.selected_song().is_some() {
                            self.mode = InputMode::AddToPlaylist;
                        }
                        Some(Action::None)
                    }
                    KeyCode::Enter => self.selected_song().map(|song| {
                        Action::PlaySingle(PlaylistSong {
                            song_id: song.id,
                            song_name: Some(song.name.clone()),
                        })
                    }),
                    _ => None,
                }
            }
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::SongsFetched(songs) => {
                self.songs = songs.clone();
                self.is_loading = false;
                self.list_state.select(if self.songs.is_empty() {
                    None
                } else {
                    Some(0)
                });
            }
            Event::FetchError(_) => {
                self.is_loading = false;
            }
            _ => {}
        }
    }
}
