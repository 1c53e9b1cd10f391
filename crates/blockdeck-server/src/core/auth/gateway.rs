//! Access Gateway
//!
//! The single authorization choke point in front of the /api surface.
//! Every request passes through `authorize`; only the allow-listed routes
//! are reachable without a live session.

use super::SessionAuthority;

/// Routes reachable without a session token.
pub const PUBLIC_ROUTES: &[&str] = &["/api/login", "/api/auth"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Admit,
    Reject,
}

/// Decide whether a request may proceed. Stateless apart from the session
/// lookup, so it is testable without a network layer.
pub fn authorize(path: &str, token: Option<&str>, authority: &SessionAuthority) -> Access {
    if PUBLIC_ROUTES.contains(&path) {
        return Access::Admit;
    }

    match token {
        Some(token) if authority.check_auth(token) => Access::Admit,
        _ => Access::Reject,
    }
}
