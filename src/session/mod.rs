pub mod store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    None,
    User,
    Admin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::None => "",
            Role::User => "User",
            Role::Admin => "Admin",
        }
    }
}

/// In-memory record of the authenticated identity for this run.
///
/// Invariant: a token is held exactly when a role is held. `establish` and
/// `clear` are the only ways in or out of the authenticated state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    email: Option<String>,
    display_name: Option<String>,
    role: Role,
    token: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&mut self, role: Role, email: String, token: String) {
        debug_assert!(role != Role::None);
        self.email = Some(email);
        self.role = role;
        self.token = Some(token);
        self.display_name = None;
    }

    pub fn clear(&mut self) {
        self.email = None;
        self.display_name = None;
        self.role = Role::None;
        self.token = None;
    }

    /// Name resolution is best-effort; a failed lookup leaves the fallback
    /// in place.
    pub fn set_display_name(&mut self, name: String) {
        if !name.is_empty() {
            self.display_name = Some(name);
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.role != Role::None
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The resolved name, or the local part of the email while resolution
    /// is pending or has failed.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = &self.display_name {
            return Some(name.clone());
        }
        self.email
            .as_deref()
            .map(|email| email.split('@').next().unwrap_or(email).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_present_iff_logged_in() {
        let mut session = Session::new();
        assert!(session.token().is_none());
        assert!(!session.is_logged_in());

        session.establish(Role::User, "ada@example.com".into(), "tok".into());
        assert!(session.token().is_some());
        assert!(session.is_logged_in());

        session.clear();
        assert!(session.token().is_none());
        assert!(!session.is_logged_in());
        assert_eq!(session.role(), Role::None);
        assert!(session.display_name().is_none());
    }

    #[test]
    fn display_name_falls_back_to_email_local_part() {
        let mut session = Session::new();
        session.establish(Role::User, "ada@example.com".into(), "tok".into());
        assert_eq!(session.display_name().as_deref(), Some("ada"));

        session.set_display_name("Ada Lovelace".into());
        assert_eq!(session.display_name().as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn empty_resolved_name_keeps_fallback() {
        let mut session = Session::new();
        session.establish(Role::Admin, "root@example.com".into(), "tok".into());
        session.set_display_name(String::new());
        assert_eq!(session.display_name().as_deref(), Some("root"));
    }

    #[test]
    fn establish_resets_stale_display_name() {
        let mut session = Session::new();
        session.establish(Role::User, "ada@example.com".into(), "tok".into());
        session.set_display_name("Ada".into());

        session.establish(Role::User, "grace@example.com".into(), "tok2".into());
        assert_eq!(session.display_name().as_deref(), Some("grace"));
    }
}
