use crate::event::events::Event;
use crate::session::Session;
use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Section};
use crate::ui::traits::{Action, View};
use crate::ui::views;
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Entered(Section),
    Denied(&'static str),
}

/// Keeps exactly one section active and its nav key in sync. Re-entering
/// the active section rebuilds the view, which re-runs its data load;
/// there is no history stack to pollute.
pub struct Router {
    section: Section,
    active: Box<dyn View>,
}

impl Router {
    pub fn new() -> Self {
        Self {
            section: Section::Home,
            active: views::build(Section::Home),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn nav_key(&self) -> &'static str {
        self.section.nav_key()
    }

    pub fn navigate(&mut self, section: Section, session: &Session) -> Navigation {
        if section == Section::AdminPanel && !session.is_admin() {
            return Navigation::Denied("Unauthorized: admin access only");
        }
        self.section = section;
        self.active = views::build(section);
        Navigation::Entered(section)
    }

    pub fn route_from_key(&mut self, key: &str, session: &Session) -> Navigation {
        self.navigate(Section::from_nav_key(key), session)
    }

    pub async fn mount_active(&mut self, ctx: &AppContext, state: &AppState) {
        self.active.on_mount(ctx, state).await;
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        self.active.render(f, area, state, ctx);
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        self.active.handle_input(key, state, ctx).await
    }

    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) {
        self.active.on_event(event, ctx).await;
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;

    fn admin_session() -> Session {
        let mut session = Session::new();
        session.establish(Role::Admin, "root@example.com".into(), "tok".into());
        session
    }

    #[test]
    fn navigation_updates_section_and_key() {
        let mut router = Router::new();
        let session = Session::new();

        assert_eq!(
            router.navigate(Section::Songs, &session),
            Navigation::Entered(Section::Songs)
        );
        assert_eq!(router.section(), Section::Songs);
        assert_eq!(router.nav_key(), "songs");
    }

    #[test]
    fn admin_panel_is_gated_on_role() {
        let mut router = Router::new();
        let session = Session::new();

        let outcome = router.navigate(Section::AdminPanel, &session);
        assert!(matches!(outcome, Navigation::Denied(_)));
        // denied navigation leaves the active section untouched
        assert_eq!(router.section(), Section::Home);
        assert_eq!(router.nav_key(), "home");

        let outcome = router.navigate(Section::AdminPanel, &admin_session());
        assert_eq!(outcome, Navigation::Entered(Section::AdminPanel));
        assert_eq!(router.nav_key(), "adminPanel");
    }

    #[test]
    fn unknown_keys_route_home() {
        let mut router = Router::new();
        let session = Session::new();
        router.navigate(Section::Songs, &session);

        router.route_from_key("", &session);
        assert_eq!(router.section(), Section::Home);

        router.navigate(Section::Songs, &session);
        router.route_from_key("bogus", &session);
        assert_eq!(router.section(), Section::Home);
    }

    #[test]
    fn known_keys_route_to_their_section() {
        let mut router = Router::new();
        let session = admin_session();
        for (key, section) in [
            ("songs", Section::Songs),
            ("playlists", Section::Playlists),
            ("adminPanel", Section::AdminPanel),
            ("login", Section::Login),
            ("register", Section::Register),
        ] {
            assert_eq!(
                router.route_from_key(key, &session),
                Navigation::Entered(section)
            );
            assert_eq!(router.nav_key(), key);
        }
    }

    #[test]
    fn renavigation_to_active_section_is_idempotent() {
        let mut router = Router::new();
        let session = Session::new();

        router.navigate(Section::Songs, &session);
        router.navigate(Section::Songs, &session);
        assert_eq!(router.section(), Section::Songs);
        assert_eq!(router.nav_key(), "songs");
    }
}
