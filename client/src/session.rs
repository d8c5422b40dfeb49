//! Session token holder and navigation guard
//!
//! The token is opaque to the console: its presence decides whether a page can
//! be shown. The payload is decoded only to display who is logged in.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use jsonwebtoken::{decode, DecodingKey, Validation};
use shared::{guard_route, TokenClaims};
pub use shared::{RouteDecision, SessionState};

use crate::config::SessionConfig;

/// Decide whether `path` can be shown with the configured login and home pages
pub fn route_guard(state: &SessionState, path: &str, config: &SessionConfig) -> RouteDecision {
    guard_route(state, path, &config.login_path, &config.home_path)
}

/// Decode the token payload without verifying its signature
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .ok()
}

/// Shared, injectable session context.
///
/// Cloning is cheap and every clone sees the same token.
#[derive(Debug, Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    config: Arc<SessionConfig>,
}

impl SessionContext {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::anonymous())),
            config: Arc::new(config),
        }
    }

    /// Restore the session from a `Cookie` request header
    pub fn from_cookie_header(config: SessionConfig, header: &str) -> Self {
        let context = Self::new(config);
        if let Some(token) = parse_cookie(header, &context.config.cookie_name) {
            context.open(token);
        }
        context
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionState {
        self.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated()
    }

    /// Store a freshly issued token
    pub fn open(&self, token: impl Into<String>) {
        *self.write() = SessionState::with_token(token);
    }

    /// Forget the token
    pub fn logout(&self) {
        *self.write() = SessionState::anonymous();
        tracing::info!("Session closed");
    }

    pub fn guard(&self, path: &str) -> RouteDecision {
        route_guard(&self.read(), path, &self.config)
    }

    /// Who is logged in, if the token payload can be read
    pub fn current_user(&self) -> Option<TokenClaims> {
        self.read().token().and_then(decode_claims)
    }

    /// `Set-Cookie` value persisting the current token
    pub fn to_set_cookie(&self) -> Option<String> {
        self.read().token().map(|token| {
            format!(
                "{}={}; path=/; max-age={}",
                self.config.cookie_name, token, self.config.max_age_secs
            )
        })
    }

    /// `Set-Cookie` value removing the token
    pub fn clear_cookie(&self) -> String {
        format!("{}=; path=/; max-age=0", self.config.cookie_name)
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Value of cookie `name` in a `Cookie` header; empty values count as absent
pub fn parse_cookie(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn signed_token() -> String {
        let claims = TokenClaims {
            id: 7,
            email: "admin@boutique.gn".into(),
            name: Some("Mariama".into()),
            role: Some("admin".into()),
            exp: Some(1),
            iat: None,
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(b"server-secret")).unwrap()
    }

    #[test]
    fn test_guard_uses_configured_paths() {
        let config = SessionConfig {
            login_path: "/connexion".into(),
            home_path: "/tableau".into(),
            ..SessionConfig::default()
        };
        assert_eq!(
            route_guard(&SessionState::anonymous(), "/ventes", &config),
            RouteDecision::Redirect("/connexion".into())
        );
        assert_eq!(
            route_guard(&SessionState::with_token("t"), "/connexion/", &config),
            RouteDecision::Redirect("/tableau".into())
        );
    }

    #[test]
    fn test_cookie_round_trip() {
        let context = SessionContext::from_cookie_header(
            SessionConfig::default(),
            "theme=dark; token=abc.def.ghi; lang=fr",
        );
        assert_eq!(context.token().as_deref(), Some("abc.def.ghi"));
        assert_eq!(
            context.to_set_cookie().as_deref(),
            Some("token=abc.def.ghi; path=/; max-age=7200")
        );

        context.logout();
        assert!(context.to_set_cookie().is_none());
        assert_eq!(context.clear_cookie(), "token=; path=/; max-age=0");
    }

    #[test]
    fn test_parse_cookie_ignores_empty_and_similar_names() {
        assert_eq!(parse_cookie("token=", "token"), None);
        assert_eq!(parse_cookie("xtoken=1; token=2", "token").as_deref(), Some("2"));
        assert_eq!(parse_cookie("", "token"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::new(SessionConfig::default());
        let other = context.clone();
        context.open("t");
        assert!(other.is_authenticated());
        assert_eq!(other.guard("/login"), RouteDecision::Redirect("/".into()));
    }

    #[test]
    fn test_current_user_ignores_signature_and_expiry() {
        let context = SessionContext::new(SessionConfig::default());
        context.open(signed_token());
        let user = context.current_user().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name.as_deref(), Some("Mariama"));
    }

    #[test]
    fn test_current_user_none_for_garbage() {
        let context = SessionContext::new(SessionConfig::default());
        assert!(context.current_user().is_none());
        context.open("not-a-jwt");
        assert!(context.current_user().is_none());
    }
}
