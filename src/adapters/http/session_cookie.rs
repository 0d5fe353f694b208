//! Session cookie handling.
//!
//! The cookie carries only the opaque session id. It is HTTP-only and
//! `SameSite=None` so the provider's cross-site approval redirect can bring
//! it back to the verify endpoint.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::domain::foundation::SessionId;
use crate::ports::Session;

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "session_id";

/// How the session cookie is named and flagged.
#[derive(Debug, Clone)]
pub struct SessionCookieConfig {
    pub name: String,
    /// Off only for plain-HTTP local development.
    pub secure: bool,
}

impl Default for SessionCookieConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.to_string(),
            secure: true,
        }
    }
}

/// Session id named by the request cookie. Unparseable values count as absent.
pub fn session_id_from(jar: &CookieJar, config: &SessionCookieConfig) -> Option<SessionId> {
    jar.get(&config.name)
        .and_then(|c| c.value().parse::<SessionId>().ok())
}

/// Cookie naming a saved session, expiring with it.
pub fn session_cookie(config: &SessionCookieConfig, session: &Session) -> Cookie<'static> {
    let max_age = i64::try_from(session.remaining_secs()).unwrap_or(i64::MAX);
    Cookie::build((config.name.clone(), session.id().to_string()))
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::None)
        .path("/")
        .max_age(Duration::seconds(max_age))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_is_http_only_secure_cross_site() {
        let session = Session::fresh(86_400);
        let cookie = session_cookie(&SessionCookieConfig::default(), &session);

        assert_eq!(cookie.name(), "session_id");
        assert_eq!(cookie.value(), session.id().to_string());
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
        let max_age = cookie.max_age().unwrap().whole_seconds();
        assert!((86_398..=86_400).contains(&max_age));
    }

    #[test]
    fn secure_flag_follows_config() {
        let config = SessionCookieConfig {
            name: "sid".to_string(),
            secure: false,
        };
        let cookie = session_cookie(&config, &Session::fresh(60));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.name(), "sid");
    }

    #[test]
    fn reads_session_id_from_jar() {
        let config = SessionCookieConfig::default();
        let id = SessionId::new();
        let jar = CookieJar::new().add(Cookie::new("session_id", id.to_string()));
        assert_eq!(session_id_from(&jar, &config), Some(id));
    }

    #[test]
    fn garbage_cookie_counts_as_absent() {
        let config = SessionCookieConfig::default();
        let jar = CookieJar::new().add(Cookie::new("session_id", "not-a-uuid"));
        assert_eq!(session_id_from(&jar, &config), None);
        assert_eq!(session_id_from(&CookieJar::new(), &config), None);
    }
}
