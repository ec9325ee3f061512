use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use tokio::task::JoinHandle;

use crate::event::events::{Event, NoticeKind};
use crate::http::model::{Song, SongUpsert};
use crate::ui::{
    components::{form::TextField, spinner::Spinner},
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

const FIELD_NAME: usize = 0;
const FIELD_SINGER: usize = 1;
const FIELD_DIRECTOR: usize = 2;
const FIELD_ALBUM: usize = 3;
const FIELD_RELEASE: usize = 4;
const FIELD_DURATION: usize = 5;

struct SongForm {
    editing_id: Option<i64>,
    fields: Vec<TextField>,
    focus: usize,
}

impl SongForm {
    fn blank() -> Self {
        Self {
            editing_id: None,
            fields: vec![
                TextField::new("Name"),
                TextField::new("Singer"),
                TextField::new("Music director"),
                TextField::new("Album"),
                TextField::new("Release date (YYYY-MM-DD)"),
                TextField::new("Duration (minutes)"),
            ],
            focus: FIELD_NAME,
        }
    }

    fn prefilled(song: &Song) -> Self {
        let mut form = Self::blank();
        form.editing_id = Some(song.id);
        form.fields[FIELD_NAME].value = song.name.clone();
        form.fields[FIELD_SINGER].value = song.singer.clone().unwrap_or_default();
        form.fields[FIELD_DIRECTOR].value = song.music_director.clone().unwrap_or_default();
        form.fields[FIELD_ALBUM].value = song.album_name.clone().unwrap_or_default();
        form.fields[FIELD_RELEASE].value = song
            .release_date
            .as_deref()
            .map(|d| d.chars().take(10).collect())
            .unwrap_or_default();
        form.fields[FIELD_DURATION].value = song
            .duration_minutes
            .map(|m| m.to_string())
            .unwrap_or_default();
        form
    }

    fn to_upsert(&self) -> Option<SongUpsert> {
        let name = self.fields[FIELD_NAME].value.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let release = self.fields[FIELD_RELEASE].value.trim();
        Some(SongUpsert {
            name,
            singer: self.fields[FIELD_SINGER].value.trim().to_string(),
            music_director: self.fields[FIELD_DIRECTOR].value.trim().to_string(),
            album_name: self.fields[FIELD_ALBUM].value.trim().to_string(),
            release_date: if release.is_empty() {
                None
            } else {
                Some(release.to_string())
            },
            duration_minutes: self.fields[FIELD_DURATION]
                .value
                .trim()
                .parse()
                .unwrap_or(0),
            is_visible: true,
        })
    }
}

pub struct AdminPanel {
    list_state: ListState,
    songs: Vec<Song>,
    is_loading: bool,
    form: Option<SongForm>,
    confirm_delete: Option<i64>,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self {
            list_state: ListState::default(),
            songs: Vec::new(),
            is_loading: true,
            form: None,
            confirm_delete: None,
            fetch_handle: None,
        }
    }
}

impl Drop for AdminPanel {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl AdminPanel {
    fn spawn_load(&mut self, ctx: &AppContext) {
        self.is_loading = true;
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            match api.fetch_all_songs().await {
                Ok(songs) => {
                    let _ = tx.send(Event::AdminSongsFetched(songs));
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

    fn render_form(&mut self, f: &mut Frame, area: Rect) {
        let Some(form) = &self.form else { return };

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(std::iter::repeat_n(Constraint::Length(3), form.fields.len()));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let title = match form.editing_id {
            Some(id) => format!("Edit song #{id}"),
            None => "New song".to_string(),
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ))),
            chunks[0],
        );

        for (i, field) in form.fields.iter().enumerate() {
            field.render(f, chunks[i + 1], form.focus == i);
        }

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Enter: save   Tab: next field   Esc: cancel",
                Style::default().fg(colors::NEUTRAL),
            ))),
            chunks[1 + form.fields.len()],
        );
    }
}

#[async_trait]
impl View for AdminPanel {
    async fn on_mount(&mut self, ctx: &AppContext, _state: &AppState) {
        self.spawn_load(ctx);
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        if self.form.is_some() {
            self.render_form(f, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " n: new   e: edit   d: delete   v: toggle visibility",
                Style::default().fg(colors::NEUTRAL),
            ))),
            chunks[0],
        );

        if self.is_loading && self.songs.is_empty() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading songs...".to_string());
            f.render_widget(spinner, chunks[1]);
            return;
        }

        if self.songs.is_empty() {
            f.render_widget(Paragraph::new("No songs in the library"), chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .songs
            .iter()
            .map(|song| {
                let visible = song.is_visible.unwrap_or(true);
                let marker = if visible { "●" } else { "○" };
                let mut spans = vec![
                    Span::styled(
                        format!("{marker} "),
                        Style::default().fg(if visible {
                            colors::PRIMARY
                        } else {
                            colors::NEUTRAL
                        }),
                    ),
                    Span::raw(format!("#{} {}", song.id, song.name)),
                    Span::styled(
                        format!(
                            "  {}",
                            song.singer.as_deref().unwrap_or("Unknown Singer")
                        ),
                        Style::default().fg(colors::NEUTRAL),
                    ),
                ];
                if self.confirm_delete == Some(song.id) {
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

        if !self.songs.is_empty() && self.list_state.selected().is_none() {
            self.list_state.select(Some(0));
        }

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(form) = &mut self.form {
            let slots = form.fields.len();
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return None,
                KeyCode::Esc => {
                    self.form = None;
                }
                KeyCode::Enter => match form.to_upsert() {
                    Some(song) => {
                        let _ = ctx.event_tx.send(Event::SaveSong {
                            id: form.editing_id,
                            song,
                        });
                        self.form = None;
                    }
                    None => {
                        let _ = ctx.event_tx.send(Event::Notice(
                            "Song name is required".into(),
                            NoticeKind::Error,
                        ));
                    }
                },
                KeyCode::Tab | KeyCode::Down => {
                    form.focus = (form.focus + 1) % slots;
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus = (form.focus + slots - 1) % slots;
                }
                KeyCode::Char(c) => {
                    form.fields[form.focus].push(c);
                }
                KeyCode::Backspace => {
                    form.fields[form.focus].pop();
                }
                _ => {}
            }
            return Some(Action::None);
        }

        let len = self.songs.len();
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
            KeyCode::Char('n') => {
                self.form = Some(SongForm::blank());
                Some(Action::None)
            }
            KeyCode::Char('e') => {
                if let Some(song) = self.selected_song() {
                    self.form = Some(SongForm::prefilled(song));
                }
                Some(Action::None)
            }
            KeyCode::Char('d') => {
                if let Some(song) = self.selected_song() {
                    if armed == Some(song.id) {
                        let _ = ctx.event_tx.send(Event::DeleteSong(song.id));
                    } else {
                        self.confirm_delete = Some(song.id);
                    }
                }
                Some(Action::None)
            }
            KeyCode::Char('v') => {
                if let Some(song) = self.selected_song() {
                    let _ = ctx.event_tx.send(Event::ToggleSongVisibility(song.id));
                }
                Some(Action::None)
            }
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        match event {
            Event::AdminSongsFetched(songs) => {
                self.songs = songs.clone();
                self.is_loading = false;
                if self.list_state.selected().is_none() && !self.songs.is_empty() {
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
