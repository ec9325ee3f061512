use std::env;

/// Base URLs of the three backend services. Read once at startup from the
/// environment (`.env` is loaded before this runs); defaults match the
/// standard local deployment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub user_base: String,
    pub admin_base: String,
    pub search_base: String,
    /// When false, the keyring token cache is skipped entirely.
    pub cache_token: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            user_base: base_url("MLTUI_USER_API", "http://localhost:8081"),
            admin_base: base_url("MLTUI_ADMIN_API", "http://localhost:8083"),
            search_base: base_url("MLTUI_SEARCH_API", "http://localhost:9002"),
            cache_token: env::var("MLTUI_CACHE_TOKEN")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

fn base_url(var: &str, default: &str) -> String {
    let url = env::var(var).unwrap_or_else(|_| default.to_string());
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(base_url("MLTUI_TEST_UNSET", "http://localhost:8081/"), "http://localhost:8081");
    }
}
