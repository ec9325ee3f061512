use tracing::warn;

const SERVICE: &str = "mltui";

/// Optional persistence of the bearer token in the OS keyring. Every
/// failure here is non-fatal; the session works the same without it.
pub struct TokenStore {
    enabled: bool,
}

impl TokenStore {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn save(&self, email: &str, token: &str) {
        if !self.enabled {
            return;
        }
        match keyring::Entry::new(SERVICE, email) {
            Ok(entry) => {
                if let Err(e) = entry.set_password(token) {
                    warn!("failed to cache token: {e}");
                }
            }
            Err(e) => warn!("keyring unavailable: {e}"),
        }
    }

    pub fn clear(&self, email: &str) {
        if !self.enabled {
            return;
        }
        if let Ok(entry) = keyring::Entry::new(SERVICE, email) {
            let _ = entry.delete_credential();
        }
    }
}
