use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info};

use crate::{
    event::events::{Event, NoticeKind},
    http::error::ApiError,
    session::Role,
    ui::{
        app::App,
        input::InputHandler,
        router::Navigation,
        state::Section,
        traits::Action,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_event(app, evt, tui).await?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
        }

        Ok(())
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::Quit => app.should_quit = true,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            _ => {}
        }

        Ok(())
    }

    async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        let action = app.router.handle_input(evt, &app.state, &app.ctx).await;
        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(action) = InputHandler::handle_key(evt) {
            Self::dispatch_action(app, action).await;
        }
    }

    async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::TogglePlayback => app.ctx.player.toggle_playback(),
            Action::NextTrack => app.ctx.player.next(),
            Action::PreviousTrack => app.ctx.player.previous(),
            Action::ToggleShuffle => app.ctx.player.toggle_shuffle(),
            Action::ToggleRepeat => app.ctx.player.toggle_repeat(),
            Action::PlaySong(song_id) => app.ctx.player.play_specific(song_id),
            Action::PlaySingle(track) => {
                app.ctx.player.load_queue(vec![track]);
                app.ctx.player.play();
            }
            Action::PlayAll => app.ctx.player.play(),
            Action::Navigate(section) => Self::navigate(app, section).await,
            Action::Logout => Self::logout(app).await,
            Action::None => {}
        }
    }

    pub async fn navigate(app: &mut App, section: Section) {
        match app.router.navigate(section, &app.state.session) {
            Navigation::Entered(section) => {
                debug!("navigated to {}", section.nav_key());
                app.router.mount_active(&app.ctx, &app.state).await;
            }
            Navigation::Denied(message) => {
                app.state.ui.set_toast(message.into(), NoticeKind::Error);
            }
        }
    }

    async fn logout(app: &mut App) {
        if let Some(email) = app.state.session.email() {
            app.token_store.clear(email);
        }
        app.state.session.clear();
        app.ctx.api.set_token(None);
        Self::navigate(app, Section::Home).await;
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::LoginSubmitted {
                role,
                email,
                password,
            } => {
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    "login",
                    tokio::spawn(async move {
                        let result = match role {
                            Role::Admin => api.login_admin(&email, &password).await,
                            _ => api.login_user(&email, &password).await,
                        };
                        match result {
                            Ok(response) => {
                                match response.token.filter(|t| !t.is_empty()) {
                                    Some(token) => {
                                        let _ = tx.send(Event::LoginSucceeded {
                                            role,
                                            email,
                                            token,
                                        });
                                    }
                                    None => {
                                        let _ = tx.send(Event::Notice(
                                            "Invalid credentials!".into(),
                                            NoticeKind::Error,
                                        ));
                                    }
                                }
                            }
                            Err(ApiError::Status { .. }) => {
                                let _ = tx.send(Event::Notice(
                                    "Invalid credentials!".into(),
                                    NoticeKind::Error,
                                ));
                            }
                            Err(e) => {
                                let _ = tx.send(Event::Notice(
                                    format!("Login failed! {e}"),
                                    NoticeKind::Error,
                                ));
                            }
                        }
                    }),
                );
            }
            Event::LoginSucceeded { role, email, token } => {
                info!("logged in as {email}");
                app.state
                    .session
                    .establish(role, email.clone(), token.clone());
                app.ctx.api.set_token(Some(token.clone()));
                app.token_store.save(&email, &token);
                app.state
                    .ui
                    .set_toast("Login successful!".into(), NoticeKind::Success);

                let landing = match role {
                    Role::Admin => Section::AdminPanel,
                    _ => Section::Songs,
                };
                Self::navigate(app, landing).await;

                // best-effort display name resolution; the email local
                // part stays in place if this fails
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                tokio::spawn(async move {
                    let lookup = match role {
                        Role::Admin => api.fetch_admin_by_email(&email).await,
                        _ => api.fetch_user_by_email(&email).await,
                    };
                    match lookup {
                        Ok(account) => {
                            if let Some(username) = account.username {
                                let _ = tx.send(Event::DisplayNameResolved(username));
                            }
                        }
                        Err(e) => debug!("display name lookup failed: {e}"),
                    }
                });
            }
            Event::DisplayNameResolved(name) => {
                app.state.session.set_display_name(name);
            }
            Event::RegisterSubmitted { role, registration } => {
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                app.task_manager.spawn(
                    "register",
                    tokio::spawn(async move {
                        let result = match role {
                            Role::Admin => api.register_admin(&registration).await,
                            _ => api.register_user(&registration).await,
                        };
                        match result {
                            Ok(()) => {
                                let _ = tx.send(Event::RegisterSucceeded(role));
                            }
                            Err(e) => {
                                let _ = tx.send(Event::Notice(
                                    format!("Registration failed: {e}"),
                                    NoticeKind::Error,
                                ));
                            }
                        }
                    }),
                );
            }
            Event::RegisterSucceeded(_) => {
                app.state.ui.set_toast(
                    "Registration successful! Please login.".into(),
                    NoticeKind::Success,
                );
                Self::navigate(app, Section::Login).await;
            }
            Event::PlaylistSelected(playlist) => {
                app.state.data.selected_playlist = Some(playlist);
                Self::navigate(app, Section::PlaylistDetail).await;
            }
            Event::PlaylistSongsFetched { songs, .. } => {
                // the queue always mirrors the last-fetched song list
                app.ctx.player.load_queue(songs);
            }
            Event::TrackEnded => {
                app.ctx.player.on_track_ended();
            }
            Event::Notice(message, kind) => {
                app.state.ui.set_toast(message, kind);
            }
            Event::FetchError(message) => {
                app.state.ui.set_toast(message, NoticeKind::Error);
            }
            Event::NavigateTo(section) => {
                Self::navigate(app, section).await;
            }
            Event::Logout => {
                Self::logout(app).await;
            }
            Event::CreatePlaylist(name) => {
                let Some(email) = app.state.session.email().map(String::from) else {
                    app.state
                        .ui
                        .set_toast("Please login to create playlists".into(), NoticeKind::Error);
                    return;
                };
                let api = app.ctx.api.clone();
                let tx = app.ctx.event_tx.clone();
                tokio::spawn(async move {
                    let result = async {
                        let user = api.fetch_user_by_email(&email).await?;
                        api.create_playlist(user.id, &name).await
                    }
                    .await;
                    match result {
                        Ok(()) => {
                            let _ = tx.send(Event::Notice(
                                "Playlist created successfully!".into(),
                                NoticeKind::Success,
                            ));
                            let _ = tx.send(Event::PlaylistsChanged);
                        }
                        Err(e) => {
                            debug!("create playlist failed: {e}");
                            let _ = tx.send(Event::Notice(
                                "Failed to create playlist".into(),
                                NoticeKind::Error,
                            ));
                        }
                    }
                });
            }
            Event::RenamePlaylist(id, name) => {
                Self::spawn_mutation(
                    app,
                    "Playlist renamed",
                    "Rename failed",
                    Some(Event::PlaylistsChanged),
                    move |api| async move { api.rename_playlist(id, &name).await },
                );
            }
            Event::DeletePlaylist(id) => {
                Self::spawn_mutation(
                    app,
                    "Playlist deleted",
                    "Delete failed",
                    Some(Event::PlaylistsChanged),
                    move |api| async move { api.delete_playlist(id).await },
                );
            }
            Event::AddSongToPlaylist {
                playlist_id,
                song_id,
                song_name,
            } => {
                Self::spawn_mutation(
                    app,
                    "Song added to playlist!",
                    "Failed to add song to playlist",
                    None,
                    move |api| async move {
                        api.add_song_to_playlist(playlist_id, song_id, &song_name)
                            .await
                    },
                );
            }
            Event::RemoveSongFromPlaylist {
                playlist_id,
                song_id,
            } => {
                Self::spawn_mutation(
                    app,
                    "Removed from playlist",
                    "Remove failed",
                    Some(Event::PlaylistSongsChanged(playlist_id)),
                    move |api| async move {
                        api.remove_song_from_playlist(playlist_id, song_id).await
                    },
                );
            }
            Event::SaveSong { id, song } => {
                Self::spawn_mutation(
                    app,
                    "Song saved",
                    "Save failed",
                    Some(Event::AdminSongsChanged),
                    move |api| async move {
                        match id {
                            Some(id) => api.update_song(id, &song).await,
                            None => api.create_song(&song).await,
                        }
                    },
                );
            }
            Event::DeleteSong(id) => {
                Self::spawn_mutation(
                    app,
                    "Song deleted",
                    "Delete failed",
                    Some(Event::AdminSongsChanged),
                    move |api| async move { api.delete_song(id).await },
                );
            }
            Event::ToggleSongVisibility(id) => {
                Self::spawn_mutation(
                    app,
                    "Visibility toggled",
                    "Toggle failed",
                    Some(Event::AdminSongsChanged),
                    move |api| async move { api.toggle_song_visibility(id).await },
                );
            }
            Event::PlaylistsChanged => {
                if app.router.section() == Section::Playlists {
                    app.router.mount_active(&app.ctx, &app.state).await;
                }
            }
            Event::PlaylistSongsChanged(_) => {
                if app.router.section() == Section::PlaylistDetail {
                    app.router.mount_active(&app.ctx, &app.state).await;
                }
            }
            Event::AdminSongsChanged => {
                if app.router.section() == Section::AdminPanel {
                    app.router.mount_active(&app.ctx, &app.state).await;
                }
            }
            // already routed to the active view above
            Event::SongsFetched(_)
            | Event::AdminSongsFetched(_)
            | Event::PlaylistsFetched(_) => {}
        }
    }

    /// Fire-and-forget write call: toast on both outcomes, optional
    /// follow-up event so the owning section reloads.
    fn spawn_mutation<F, Fut>(
        app: &App,
        success: &'static str,
        failure: &'static str,
        follow_up: Option<Event>,
        call: F,
    ) where
        F: FnOnce(std::sync::Arc<crate::http::ApiService>) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = Result<(), ApiError>> + Send,
    {
        let api = app.ctx.api.clone();
        let tx = app.ctx.event_tx.clone();
        tokio::spawn(async move {
            match call(api).await {
                Ok(()) => {
                    let _ = tx.send(Event::Notice(success.into(), NoticeKind::Success));
                    if let Some(event) = follow_up {
                        let _ = tx.send(event);
                    }
                }
                Err(e) => {
                    debug!("mutation failed: {e}");
                    let _ = tx.send(Event::Notice(failure.into(), NoticeKind::Error));
                }
            }
        });
    }
}
