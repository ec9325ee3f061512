use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
}

/// Account record returned by both the user and admin lookup endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub singer: Option<String>,
    #[serde(default)]
    pub music_director: Option<String>,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub is_visible: Option<bool>,
}

/// Payload for creating or updating a song through the admin panel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpsert {
    pub name: String,
    pub singer: String,
    pub music_director: String,
    pub album_name: String,
    pub release_date: Option<String>,
    pub duration_minutes: u32,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A song entry inside a playlist; the queue is built from these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSong {
    pub song_id: i64,
    #[serde(default)]
    pub song_name: Option<String>,
}

impl PlaylistSong {
    pub fn display_name(&self) -> String {
        self.song_name
            .clone()
            .unwrap_or_else(|| format!("Song {}", self.song_id))
    }
}
