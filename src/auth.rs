//! Single-user login with a persisted session flag.

use crate::models::StorageManager;
use tracing::{info, warn};

pub const AUTH_KEY: &str = "recipe_auth";
pub const USERNAME_KEY: &str = "recipe_username";

const VALID_USERNAME: &str = "chef";
const VALID_PASSWORD: &str = "recipe123";

/// Hint shown on the login screen after a mismatch
pub const LOGIN_HINT: &str = "Invalid username or password";

#[derive(Debug, Default)]
pub struct AuthSession {
    authenticated: bool,
    username: Option<String>,
    storage: Option<StorageManager>,
}

impl AuthSession {
    /// Restores a previous login from storage, if one was recorded
    pub fn restore(storage: Option<StorageManager>) -> Self {
        let (authenticated, username) = match &storage {
            Some(storage) => {
                let flag = storage.load::<bool>(AUTH_KEY).unwrap_or_else(|e| {
                    warn!("Ignoring unreadable session flag: {:#}", e);
                    None
                });
                let username = storage.load::<String>(USERNAME_KEY).unwrap_or_else(|e| {
                    warn!("Ignoring unreadable session username: {:#}", e);
                    None
                });
                (flag == Some(true), username)
            }
            None => (false, None),
        };

        Self {
            authenticated,
            username,
            storage,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Checks the credentials; on a match the session is recorded locally
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if username != VALID_USERNAME || password != VALID_PASSWORD {
            info!("login rejected");
            return false;
        }

        self.authenticated = true;
        self.username = Some(username.to_string());

        if let Some(storage) = &self.storage {
            if let Err(e) = storage
                .save(AUTH_KEY, &true)
                .and_then(|_| storage.save(USERNAME_KEY, &username))
            {
                warn!("Failed to persist session: {:#}", e);
            }
        }

        info!(username, "logged in");
        true
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.username = None;

        if let Some(storage) = &self.storage {
            if let Err(e) = storage
                .remove(AUTH_KEY)
                .and_then(|_| storage.remove(USERNAME_KEY))
            {
                warn!("Failed to clear session: {:#}", e);
            }
        }

        info!("logged out");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_password_is_rejected() {
        let mut session = AuthSession::default();
        assert!(!session.login("chef", "nope"));
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);
    }

    #[test]
    fn login_is_restored_and_logout_clears_it() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::at(dir.path()).unwrap();

        let mut session = AuthSession::restore(Some(storage.clone()));
        assert!(!session.is_authenticated());
        assert!(session.login("chef", "recipe123"));

        let mut restored = AuthSession::restore(Some(storage.clone()));
        assert!(restored.is_authenticated());
        assert_eq!(restored.username(), Some("chef"));

        restored.logout();
        let after_logout = AuthSession::restore(Some(storage));
        assert!(!after_logout.is_authenticated());
        assert_eq!(after_logout.username(), None);
    }
}
