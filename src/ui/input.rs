use crate::ui::state::Section;
use crate::ui::traits::Action;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    /// Global key map, consulted only when the active view did not take
    /// the key.
    pub fn handle_key(key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Char(' '), _) => Some(Action::TogglePlayback),
            (KeyCode::Char('n'), _) => Some(Action::NextTrack),
            (KeyCode::Char('p'), _) => Some(Action::PreviousTrack),
            (KeyCode::Char('s'), _) => Some(Action::ToggleShuffle),
            (KeyCode::Char('r'), _) => Some(Action::ToggleRepeat),
            (KeyCode::Char('1'), _) => Some(Action::Navigate(Section::Home)),
            (KeyCode::Char('2'), _) => Some(Action::Navigate(Section::Songs)),
            (KeyCode::Char('3'), _) => Some(Action::Navigate(Section::Playlists)),
            (KeyCode::Char('4'), _) => Some(Action::Navigate(Section::AdminPanel)),
            (KeyCode::Char('5'), _) => Some(Action::Navigate(Section::Login)),
            (KeyCode::Char('6'), _) => Some(Action::Navigate(Section::Register)),
            (KeyCode::Char('q'), _) => Some(Action::Logout),
            _ => None,
        }
    }
}
