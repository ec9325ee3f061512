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
use crate::http::model::Playlist;
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
    Create,
    Rename,
}

pub struct Playlists {
    list_state: ListState,
    playlists: Vec<Playlist>,
    is_loading: bool,
    mode: InputMode,
    name_input: String,
    /// Armed by the first delete press; any other key disarms it.
    confirm_delete: Option<i64>,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Default for Playlists {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            playlists: Vec::new(),
            is_loading: true,
            mode: InputMode::List,
            name_input: String::new(),
            confirm_delete: None,
            fetch_handle: None,
        }
    }
}

impl Drop for Playlists {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl Playlists {
    fn spawn_load(&mut self, ctx: &AppContext, email: String) {
        self.is_loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            let user = match api.fetch_user_by_email(&email).await {
                Ok(user) => user,
                Err(e) => {
                    let _ = tx.send(Event::FetchError(e.to_string()));
                    return;
                }
            };
            match api.fetch_playlists(user.id).await {
                Ok(playlists) => {
                    let _ = tx.send(Event::PlaylistsFetched(playlists));
                }
                Err(e) => {
                    let _ = tx.send(Event::FetchError(e.to_string()));
                }
            }
        });
        self.fetch_handle = Some(handle);
    }

    fn selected_playlist(&self) -> Option<&Playlist> {
        self.list_state
            .selected()
            .and_then(|i| self.playlists.get(i))
    }
}

#[async_trait]
impl View for Playlists {
    async fn on_mount(&mut self, ctx: &AppContext, state: &AppState) {
        match state.session.email() {
            Some(email) => self.spawn_load(ctx, email.to_string()),
            None => self.is_loading = false,
        }
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, _ctx: &AppContext) {
        if !state.session.is_logged_in() {
            f.render_widget(Paragraph::new("Please login to view playlists"), area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let title = match self.mode {
            InputMode::Rename => "Rename playlist",
            _ => "New playlist name",
        };
        let input_style = if self.mode != InputMode::List {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let input_box = Paragraph::new(self.name_input.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(input_style),
        );
        f.render_widget(input_box, chunks[0]);

        if self.is_loading && self.playlists.is_empty() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading playlists...".to_string());
            f.render_widget(spinner, chunks[1]);
            return;
        }

        if self.playlists.is_empty() {
            f.render_widget(
                Paragraph::new("No playlists created yet ('c' to create one)"),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = self
            .playlists
            .iter()
            .map(|playlist| {
                let description = playlist
                    .description
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .unwrap_or("No description");
                let mut spans = vec![
                    Span::raw(format!("#{} {}", playlist.id, playlist.name)),
                    Span::styled(
                        format!("  {description}"),
                        Style::default().fg(colors::NEUTRAL),
                    ),
                ];
                if self.confirm_delete == Some(playlist.id) {
                    spans.push(Span::styled(
                        "  press d again to delete",
                        Style::default().fg(colors::ERROR),
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

        if !self.playlists.is_empty() && self.list_state.selected().is_none() {
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
        if !state.session.is_logged_in() {
            return None;
        }

        if self.mode != InputMode::List {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
                KeyCode::Enter => {
                    let name = self.name_input.trim().to_string();
                    if !name.is_empty() {
                        match self.mode {
                            InputMode::Create => {
                                let _ = ctx.event_tx.send(Event::CreatePlaylist(name));
                            }
                            InputMode::Rename => {
                                if let Some(playlist) = self.selected_playlist() {
                                    let _ = ctx
                                        .event_tx
                                        .send(Event::RenamePlaylist(playlist.id, name));
                                }
                            }
                            InputMode::List => {}
                        }
                    }
                    self.name_input.clear();
                    self.mode = InputMode::List;
                    return Some(Action::None);
                }
                KeyCode::Esc => {
                    self.name_input.clear();
                    self.mode = InputMode::List;
                    return Some(Action::None);
                }
                KeyCode::Char(c) => {
                    self.name_input.push(c);
                    return Some(Action::None);
                }
                KeyCode::Backspace => {
                    self.name_input.pop();
                    return Some(Action::None);
                }
                _ => return Some(Action::None),
            }
        }

        let len = self.playlists.len();
        let armed = self.confirm_delete.take();
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
            KeyCode::Char('c') => {
                self.mode = InputMode::Create;
                Some(Action::None)
            }
            KeyCode::Char('e') => {
                if let Some(playlist) = self.selected_playlist() {
                    self.name_input = playlist.name.clone();
                    self.mode = InputMode::Rename;
                }
                Some(Action::None)
            }
            KeyCode::Char('d') => {
                if let Some(playlist) = self.selected_playlist() {
                    if armed == Some(playlist.id) {
                        let _ = ctx.event_tx.send(Event::DeletePlaylist(playlist.id));
                    } else {
                        self.confirm_delete = Some(playlist.id);
                    }
                }
                Some(Action::None)
            }
            KeyCode::Enter => {
                if let Some(playlist) = self.selected_playlist() {
                    let _ = ctx.event_tx.send(Event::PlaylistSelected(playlist.clone()));
                }
                Some(Action::None)
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::PlaylistsFetched(playlists) => {
                self.playlists = playlists.clone();
                self.is_loading = false;
                if self.list_state.selected().is_none() && !self.playlists.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            Event::FetchError(_) => {
                self.is_loading = false;
            }
            _ => {}
        }
    }
}
