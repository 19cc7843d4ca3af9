//! Demo login gate for the admin panel.
//!
//! This only hides the panel; the Content API enforces the real check with
//! its API key.

/// Accepted demo credentials.
const DEMO_USERS: &[(&str, &str)] = &[("admin", "admin123"), ("user", "user123")];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password. Try admin/admin123")]
    InvalidCredentials,
}

/// A logged-in admin user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Username with its first letter capitalized, for the header.
    pub fn display_name(&self) -> String {
        let mut chars = self.username.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Single uppercase letter shown in the avatar bubble.
    pub fn avatar_initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Check demo credentials.
pub fn login(username: &str, password: &str) -> Result<Session, AuthError> {
    let username = username.trim();
    let valid = DEMO_USERS
        .iter()
        .any(|(user, pass)| *user == username && *pass == password);

    if !valid {
        tracing::warn!(username, "Admin login rejected");
        return Err(AuthError::InvalidCredentials);
    }

    tracing::info!(username, "Admin login");
    Ok(Session {
        username: username.to_string(),
    })
}
