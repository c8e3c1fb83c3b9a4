//! Session context
//!
//! The bearer-token/role pair every request carries. Injected explicitly
//! instead of being read from ambient global storage, so tests can run with
//! fake sessions and no hidden coupling exists between the client and the
//! surface that obtained the token.

/// An authenticated (or anonymous) POS session context.
///
/// Absence of a token simply omits the Authorization header; the server is
/// the authority on authorization, there is no local enforcement.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    role: Option<String>,
}

impl Session {
    /// A session with no credentials. Requests go out without an
    /// Authorization header.
    pub fn anonymous() -> Self {
        Session::default()
    }

    /// A session carrying a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Session {
            token: Some(token.into()),
            role: None,
        }
    }

    /// Attach the role reported at sign-in (display/routing only).
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The raw token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The session role, if any.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Authorization header value, when a token is present.
    pub fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_has_no_bearer() {
        assert_eq!(Session::anonymous().bearer(), None);
    }

    #[test]
    fn test_bearer_format() {
        let session = Session::with_token("abc123").with_role("CASHIER");
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc123"));
        assert_eq!(session.role(), Some("CASHIER"));
    }
}
