//! Session snapshot and navigation guard
//!
//! Presence of the token, not its validity, decides access. The same rule runs
//! in the client library and in the browser.

use serde::{Deserialize, Serialize};

/// Snapshot of the session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    token: Option<String>,
}

impl SessionState {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// An empty token counts as no token
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Outcome of a navigation check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

/// Decide whether `path` can be shown.
///
/// Anonymous users are sent to `login_path` from everywhere but the login
/// page itself; an authenticated user opening the login page is sent to
/// `home_path`.
pub fn guard_route(
    state: &SessionState,
    path: &str,
    login_path: &str,
    home_path: &str,
) -> RouteDecision {
    let on_login_page = normalize(path) == normalize(login_path);
    match (state.is_authenticated(), on_login_page) {
        (false, false) => RouteDecision::Redirect(login_path.to_string()),
        (true, true) => RouteDecision::Redirect(home_path.to_string()),
        _ => RouteDecision::Allow,
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
