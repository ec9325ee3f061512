use mltui::event::events::Event;
use mltui::http::model::{Playlist, PlaylistSong};
use mltui::session::Role;
use mltui::session::store::TokenStore;
use mltui::ui::app::App;
use mltui::ui::state::Section;
use mltui::ui::util::handler::EventHandler;

fn test_app() -> App {
    let mut app = App::new().expect("app construction is offline");
    // keep the OS keyring out of tests
    app.token_store = TokenStore::new(false);
    app
}

#[tokio::test]
async fn admin_login_lands_on_the_admin_panel() {
    let mut app = test_app();

    EventHandler::handle_action(
        &mut app,
        Event::LoginSucceeded {
            role: Role::Admin,
            email: "root@example.com".into(),
            token: "tok".into(),
        },
    )
    .await;

    assert!(app.state.session.is_admin());
    assert_eq!(app.state.session.token(), Some("tok"));
    assert_eq!(app.router.section(), Section::AdminPanel);
    assert_eq!(app.router.nav_key(), "adminPanel");
}

#[tokio::test]
async fn user_login_lands_on_songs() {
    let mut app = test_app();

    EventHandler::handle_action(
        &mut app,
        Event::LoginSucceeded {
            role: Role::User,
            email: "ada@example.com".into(),
            token: "tok".into(),
        },
    )
    .await;

    assert_eq!(app.state.session.role(), Role::User);
    assert_eq!(app.router.section(), Section::Songs);
    assert_eq!(app.state.session.display_name().as_deref(), Some("ada"));
}

#[tokio::test]
async fn admin_panel_is_refused_without_an_admin_session() {
    let mut app = test_app();

    EventHandler::handle_action(&mut app, Event::NavigateTo(Section::AdminPanel)).await;

    assert_eq!(app.router.section(), Section::Home);
    let toast = app.state.ui.toast().expect("an unauthorized message shows");
    assert!(toast.message.contains("Unauthorized"));
}

#[tokio::test]
async fn logout_clears_the_session_and_returns_home() {
    let mut app = test_app();
    EventHandler::handle_action(
        &mut app,
        Event::LoginSucceeded {
            role: Role::User,
            email: "ada@example.com".into(),
            token: "tok".into(),
        },
    )
    .await;

    EventHandler::handle_action(&mut app, Event::Logout).await;

    assert!(!app.state.session.is_logged_in());
    assert_eq!(app.state.session.token(), None);
    assert_eq!(app.router.section(), Section::Home);
}

#[tokio::test]
async fn fetched_playlist_songs_become_the_queue() {
    let mut app = test_app();

    let songs = vec![
        PlaylistSong {
            song_id: 1,
            song_name: Some("A".into()),
        },
        PlaylistSong {
            song_id: 2,
            song_name: Some("B".into()),
        },
    ];
    EventHandler::handle_action(
        &mut app,
        Event::PlaylistSongsFetched {
            playlist_id: 7,
            songs,
        },
    )
    .await;

    assert_eq!(app.ctx.player.queue_len(), 2);
    app.ctx.player.play();
    assert!(app.ctx.player.is_playing());
    assert_eq!(
        app.ctx.player.current_track().map(|t| t.song_id),
        Some(1)
    );
}

#[tokio::test]
async fn selecting_a_playlist_opens_its_detail_section() {
    let mut app = test_app();
    EventHandler::handle_action(
        &mut app,
        Event::LoginSucceeded {
            role: Role::User,
            email: "ada@example.com".into(),
            token: "tok".into(),
        },
    )
    .await;

    let playlist = Playlist {
        id: 3,
        name: "Road trip".into(),
        description: None,
        created_at: None,
    };
    EventHandler::handle_action(&mut app, Event::PlaylistSelected(playlist)).await;

    assert_eq!(app.router.section(), Section::PlaylistDetail);
    assert_eq!(
        app.state.data.selected_playlist.as_ref().map(|p| p.id),
        Some(3)
    );
}
