pub mod error;
pub mod model;

use std::sync::RwLock;

use reqwest::{Client, RequestBuilder, Response};

use crate::config::ServiceConfig;

use self::error::ApiError;
use self::model::{
    Account, LoginResponse, Playlist, PlaylistSong, Registration, Song, SongUpsert,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin REST client over the user, admin and search services. One instance
/// is shared by every background fetch; the bearer token is swapped in on
/// login and cleared on logout.
pub struct ApiService {
    client: Client,
    config: ServiceConfig,
    token: RwLock<Option<String>>,
}

impl ApiService {
    pub fn new(config: ServiceConfig) -> ApiResult<Self> {
        let client = Client::builder().gzip(true).build()?;
        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().expect("token lock poisoned");
        match token.as_deref() {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    async fn expect_ok(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::status(status.as_u16(), body))
    }

    // --- auth ---

    pub async fn login_user(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.login(&self.config.user_base, email, password).await
    }

    pub async fn login_admin(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.login(&self.config.admin_base, email, password).await
    }

    async fn login(&self, base: &str, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let response = self
            .client
            .post(format!("{base}/auth/login"))
            .query(&[("email", email), ("password", password)])
            .send()
            .await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn register_user(&self, registration: &Registration) -> ApiResult<()> {
        self.register(&self.config.user_base, "users", registration)
            .await
    }

    pub async fn register_admin(&self, registration: &Registration) -> ApiResult<()> {
        self.register(&self.config.admin_base, "admins", registration)
            .await
    }

    async fn register(
        &self,
        base: &str,
        kind: &str,
        registration: &Registration,
    ) -> ApiResult<()> {
        let response = self
            .client
            .post(format!("{base}/api/{kind}"))
            .json(registration)
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn fetch_user_by_email(&self, email: &str) -> ApiResult<Account> {
        let url = format!("{}/api/users/email/{email}", self.config.user_base);
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn fetch_admin_by_email(&self, email: &str) -> ApiResult<Account> {
        let url = format!("{}/api/admins/email/{email}", self.config.admin_base);
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    // --- songs ---

    pub async fn fetch_visible_songs(&self) -> ApiResult<Vec<Song>> {
        let url = format!("{}/api/songs/visible", self.config.admin_base);
        let response = self.client.get(url).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn search_songs(&self, query: &str) -> ApiResult<Vec<Song>> {
        let url = format!("{}/api/search/songs/visible", self.config.search_base);
        let response = self
            .authorized(self.client.get(url).query(&[("query", query)]))
            .send()
            .await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    // --- admin songs ---

    pub async fn fetch_all_songs(&self) -> ApiResult<Vec<Song>> {
        let url = format!("{}/api/songs", self.config.admin_base);
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn create_song(&self, song: &SongUpsert) -> ApiResult<()> {
        let url = format!("{}/api/songs", self.config.admin_base);
        let response = self.authorized(self.client.post(url).json(song)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn update_song(&self, id: i64, song: &SongUpsert) -> ApiResult<()> {
        let url = format!("{}/api/songs/{id}", self.config.admin_base);
        let response = self.authorized(self.client.put(url).json(song)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn delete_song(&self, id: i64) -> ApiResult<()> {
        let url = format!("{}/api/songs/{id}", self.config.admin_base);
        let response = self.authorized(self.client.delete(url)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn toggle_song_visibility(&self, id: i64) -> ApiResult<()> {
        let url = format!(
            "{}/api/songs/{id}/toggle-visibility",
            self.config.admin_base
        );
        let response = self.authorized(self.client.put(url)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    // --- playlists ---

    pub async fn fetch_playlists(&self, user_id: i64) -> ApiResult<Vec<Playlist>> {
        let url = format!("{}/api/playlists/user/{user_id}", self.config.user_base);
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn create_playlist(&self, user_id: i64, name: &str) -> ApiResult<()> {
        let url = format!("{}/api/playlists/user/{user_id}", self.config.user_base);
        let body = serde_json::json!({ "name": name, "description": "" });
        let response = self.authorized(self.client.post(url).json(&body)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn rename_playlist(&self, id: i64, name: &str) -> ApiResult<()> {
        let url = format!("{}/api/playlists/{id}", self.config.user_base);
        let body = serde_json::json!({ "name": name });
        let response = self.authorized(self.client.put(url).json(&body)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn delete_playlist(&self, id: i64) -> ApiResult<()> {
        let url = format!("{}/api/playlists/{id}", self.config.user_base);
        let response = self.authorized(self.client.delete(url)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    // --- playlist songs ---

    pub async fn fetch_playlist_songs(&self, playlist_id: i64) -> ApiResult<Vec<PlaylistSong>> {
        let url = format!(
            "{}/api/playlist-songs/playlist/{playlist_id}",
            self.config.user_base
        );
        let response = self.authorized(self.client.get(url)).send().await?;
        Ok(Self::expect_ok(response).await?.json().await?)
    }

    pub async fn add_song_to_playlist(
        &self,
        playlist_id: i64,
        song_id: i64,
        song_name: &str,
    ) -> ApiResult<()> {
        let url = format!(
            "{}/api/playlist-songs/playlist/{playlist_id}",
            self.config.user_base
        );
        let response = self
            .authorized(
                self.client
                    .post(url)
                    .query(&[("songId", song_id.to_string().as_str()), ("songName", song_name)]),
            )
            .send()
            .await?;
        Self::expect_ok(response).await?;
        Ok(())
    }

    pub async fn remove_song_from_playlist(
        &self,
        playlist_id: i64,
        song_id: i64,
    ) -> ApiResult<()> {
        let url = format!(
            "{}/api/playlist-songs/playlist/{playlist_id}/song/{song_id}",
            self.config.user_base
        );
        let response = self.authorized(self.client.delete(url)).send().await?;
        Self::expect_ok(response).await?;
        Ok(())
    }
}
