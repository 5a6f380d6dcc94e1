//! Admin session checks
//!
//! The control core does not authenticate anyone itself. Whatever sits in
//! front of it (a cookie session, basic auth) hands in an [`AdminSession`]
//! and the advancer only asks it whether the caller is an admin.

use std::env;

use crate::constants;

/// Trait for answering whether the current caller is an authenticated admin
pub trait AdminSession {
    /// Returns `true` if the caller may drive the quiz
    fn is_admin(&self) -> bool;
}

impl AdminSession for bool {
    fn is_admin(&self) -> bool {
        *self
    }
}

/// Admin credentials configured through the environment
///
/// The comparison is a plain string comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    password: String,
}

impl BasicCredentials {
    /// Creates credentials from explicit values
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads `PERIODQUIZ_ADMIN_USERNAME` and `PERIODQUIZ_ADMIN_PASSWORD`
    ///
    /// Returns `None` if either variable is unset or empty, in which case
    /// nobody can log in as admin.
    pub fn from_env() -> Option<Self> {
        let username = env::var(constants::admin::USERNAME_ENV).ok()?;
        let password = env::var(constants::admin::PASSWORD_ENV).ok()?;
        if username.is_empty() || password.is_empty() {
            tracing::warn!("admin credentials are configured but empty");
            return None;
        }
        Some(Self::new(username, password))
    }

    /// Checks a login attempt, yielding the session to use for admin actions
    pub fn login(&self, username: &str, password: &str) -> BasicSession {
        let authenticated = self.username == username && self.password == password;
        if !authenticated {
            tracing::warn!(username, "rejected admin login");
        }
        BasicSession { authenticated }
    }
}

/// Outcome of a [`BasicCredentials::login`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicSession {
    authenticated: bool,
}

impl AdminSession for BasicSession {
    fn is_admin(&self) -> bool {
        self.authenticated
    }
}
