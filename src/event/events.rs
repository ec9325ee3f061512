use crate::http::model::{Playlist, PlaylistSong, Registration, Song, SongUpsert};
use crate::session::Role;
use crate::ui::state::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub enum Event {
    // Events
    LoginSucceeded {
        role: Role,
        email: String,
        token: String,
    },
    DisplayNameResolved(String),
    RegisterSucceeded(Role),
    SongsFetched(Vec<Song>),
    AdminSongsFetched(Vec<Song>),
    PlaylistsFetched(Vec<Playlist>),
    PlaylistSongsFetched {
        playlist_id: i64,
        songs: Vec<PlaylistSong>,
    },
    PlaylistSelected(Playlist),
    PlaylistsChanged,
    PlaylistSongsChanged(i64),
    AdminSongsChanged,
    TrackEnded,
    FetchError(String),
    Notice(String, NoticeKind),

    // Commands
    NavigateTo(Section),
    Logout,
    LoginSubmitted {
        role: Role,
        email: String,
        password: String,
    },
    RegisterSubmitted {
        role: Role,
        registration: Registration,
    },
    CreatePlaylist(String),
    RenamePlaylist(i64, String),
    DeletePlaylist(i64),
    AddSongToPlaylist {
        playlist_id: i64,
        song_id: i64,
        song_name: String,
    },
    RemoveSongFromPlaylist {
        playlist_id: i64,
        song_id: i64,
    },
    SaveSong {
        id: Option<i64>,
        song: SongUpsert,
    },
    DeleteSong(i64),
    ToggleSongVisibility(i64),
}
