//! Cookie-backed session and request guards
//!
//! The browser's durable slot is a single cookie holding the serialized
//! identity, base64url encoded. Every request opens its own
//! [`SessionStore`] over the jar it arrived with; nothing about the session
//! lives in [`AppState`].

use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use bliss_core::{Identity, SessionConfig};
use bliss_portal::{
    paths, Guard, Outcome, PortalError, PortalResult, RolePolicy, SessionSlot, SessionStore,
};
use std::convert::Infallible;

/// Session slot stored in the request's cookie jar
///
/// Writes and clears produce a new jar; hand it back to axum with
/// [`CookieSlot::into_jar`] so the `Set-Cookie` headers reach the browser.
#[derive(Debug, Clone)]
pub struct CookieSlot {
    jar: CookieJar,
    secure: bool,
    max_age_days: i64,
}

impl CookieSlot {
    pub fn new(jar: CookieJar, settings: &SessionConfig) -> Self {
        Self {
            jar,
            secure: settings.cookie_secure,
            max_age_days: settings.cookie_max_age_days,
        }
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl SessionSlot for CookieSlot {
    fn read(&self, key: &str) -> PortalResult<Option<String>> {
        let Some(cookie) = self.jar.get(key) else {
            return Ok(None);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(cookie.value())
            .map_err(|e| PortalError::session(format!("Undecodable session cookie: {}", e)))?;
        let json = String::from_utf8(bytes)
            .map_err(|e| PortalError::session(format!("Session cookie is not UTF-8: {}", e)))?;

        Ok(Some(json))
    }

    fn write(&mut self, key: &str, value: &str) -> PortalResult<()> {
        let cookie = Cookie::build((key.to_string(), URL_SAFE_NO_PAD.encode(value)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::days(self.max_age_days));

        self.jar = std::mem::take(&mut self.jar).add(cookie);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> PortalResult<()> {
        self.jar = std::mem::take(&mut self.jar).remove(Cookie::build(key.to_string()).path("/"));
        Ok(())
    }
}

/// Open the session carried by `jar`
pub fn open_session(jar: CookieJar, settings: &SessionConfig) -> SessionStore<CookieSlot> {
    SessionStore::open_with_key(CookieSlot::new(jar, settings), &settings.slot_key)
}

/// Identity of the caller, if the session cookie holds a valid one
#[derive(Debug, Clone)]
pub struct Session(pub Option<Identity>);

impl Session {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// Let the caller through only if the guard would render `path` for them
    ///
    /// Routine redirects (`/` or `/login` while signed in) are not denials
    /// and answer `303 See Other` towards the landing route.
    pub fn require(self, policy: &RolePolicy, path: &str) -> ApiResult<Identity> {
        let decision = Guard::new(policy).decide(self.0.as_ref(), path);
        let redirect = decision.outcome.path().to_string();
        match (decision.outcome, decision.denial, self.0) {
            (Outcome::Render(_), _, Some(identity)) => Ok(identity),
            (_, _, None) => Err(ApiError::Unauthenticated { redirect }),
            (Outcome::Redirect(_), None, Some(_)) => Err(ApiError::Redirect { redirect }),
            (_, _, Some(_)) => Err(ApiError::Forbidden { redirect }),
        }
    }

    /// Any signed-in identity will do
    pub fn require_signed_in(self) -> ApiResult<Identity> {
        self.0.ok_or_else(|| ApiError::Unauthenticated {
            redirect: paths::LOGIN.to_string(),
        })
    }
}

impl<S> FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let store = open_session(CookieJar::from_headers(&parts.headers), &state.config.session);
        Ok(Session(store.current().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bliss_core::Role;
    use bliss_portal::{sign_in, MockCredentials};

    fn settings() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn test_login_sets_encoded_cookie() {
        let mut store = open_session(CookieJar::new(), &settings());
        let admin = sign_in(&MockCredentials::new(Role::Admin));
        store.login(admin.clone()).unwrap();

        let jar = store.into_slot().into_jar();
        let cookie = jar.get("village_user").unwrap();
        assert!(!cookie.value().contains('{'));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));

        // the next request arrives with the same jar
        let reopened = open_session(jar, &settings());
        assert_eq!(reopened.current(), Some(&admin));
    }

    #[test]
    fn test_logout_removes_cookie() {
        let mut store = open_session(CookieJar::new(), &settings());
        store
            .login(sign_in(&MockCredentials::new(Role::Resident)))
            .unwrap();
        store.logout().unwrap();

        let jar = store.into_slot().into_jar();
        assert!(jar.get("village_user").is_none());
    }

    #[test]
    fn test_garbage_cookie_means_signed_out() {
        for value in ["%%%not-base64", "e30", "bm90IGpzb24"] {
            let jar = CookieJar::new().add(Cookie::new("village_user", value));
            let store = open_session(jar, &settings());
            assert!(store.current().is_none(), "cookie value {:?}", value);
        }
    }

    #[test]
    fn test_require_maps_denials() {
        let policy = RolePolicy::standard();
        let resident = sign_in(&MockCredentials::new(Role::Resident));

        let err = Session(None).require(&policy, paths::ANNOUNCEMENTS).unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated { ref redirect } if redirect == "/login"));

        let err = Session(Some(resident.clone()))
            .require(&policy, paths::ADMIN_PAYMENTS)
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { ref redirect } if redirect == "/welcome"));

        let admin = sign_in(&MockCredentials::new(Role::Admin));
        for path in [paths::ROOT, paths::LOGIN] {
            let err = Session(Some(admin.clone())).require(&policy, path).unwrap_err();
            assert!(
                matches!(err, ApiError::Redirect { ref redirect } if redirect == "/admin/dashboard"),
                "{}",
                path
            );
        }

        let granted = Session(Some(resident.clone()))
            .require(&policy, paths::RESIDENT_HISTORY)
            .unwrap();
        assert_eq!(granted, resident);
    }
}
