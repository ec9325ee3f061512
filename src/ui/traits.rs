use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Section};
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePlayback,
    NextTrack,
    PreviousTrack,
    ToggleShuffle,
    ToggleRepeat,
    /// Jump to a track that is already in the queue.
    PlaySong(i64),
    /// Replace the queue with a single track and play it.
    PlaySingle(crate::http::model::PlaylistSong),
    PlayAll,
    Navigate(Section),
    Logout,
    None,
}

#[async_trait::async_trait]
pub trait View: Send {
    /// Called once right after the view becomes active; data loads start
    /// here.
    async fn on_mount(&mut self, _ctx: &AppContext, _state: &AppState) {}

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}
}
