use std::time::{Duration, Instant};

use crate::event::events::NoticeKind;
use crate::http::model::Playlist;
use crate::session::Session;

/// Exactly one section is visible at any time; the router keeps the
/// recorded nav key in step with this value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    Home,
    Login,
    Register,
    Songs,
    Playlists,
    PlaylistDetail,
    AdminPanel,
}

impl Section {
    pub fn nav_key(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Login => "login",
            Section::Register => "register",
            Section::Songs => "songs",
            Section::Playlists => "playlists",
            Section::PlaylistDetail => "playlistDetail",
            Section::AdminPanel => "adminPanel",
        }
    }

    /// Maps an externally supplied nav key. Only the five link targets are
    /// routable; everything else (including the empty key) lands on Home.
    pub fn from_nav_key(key: &str) -> Self {
        match key {
            "songs" => Section::Songs,
            "playlists" => Section::Playlists,
            "adminPanel" => Section::AdminPanel,
            "login" => Section::Login,
            "register" => Section::Register,
            _ => Section::Home,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Login => "Login",
            Section::Register => "Register",
            Section::Songs => "Songs",
            Section::Playlists => "Playlists",
            Section::PlaylistDetail => "Playlist",
            Section::AdminPanel => "Admin",
        }
    }
}

const TOAST_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: NoticeKind,
    shown_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    toast: Option<Toast>,
}

impl UiState {
    /// A new toast replaces whatever was showing.
    pub fn set_toast(&mut self, message: String, kind: NoticeKind) {
        self.toast = Some(Toast {
            message,
            kind,
            shown_at: Instant::now(),
        });
    }

    pub fn toast(&mut self) -> Option<&Toast> {
        if let Some(toast) = &self.toast {
            if toast.shown_at.elapsed() > TOAST_LIFETIME {
                self.toast = None;
            }
        }
        self.toast.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppData {
    /// The playlist whose detail section is (or was last) open.
    pub selected_playlist: Option<Playlist>,
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub session: Session,
    pub ui: UiState,
    pub data: AppData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_nav_keys_land_on_home() {
        assert_eq!(Section::from_nav_key(""), Section::Home);
        assert_eq!(Section::from_nav_key("nonsense"), Section::Home);
        assert_eq!(Section::from_nav_key("playlistDetail"), Section::Home);
    }

    #[test]
    fn known_nav_keys_round_trip() {
        for key in ["songs", "playlists", "adminPanel", "login", "register"] {
            assert_eq!(Section::from_nav_key(key).nav_key(), key);
        }
    }
}
