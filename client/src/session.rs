use std::path::{Path, PathBuf};

use common::{AuthResponse, Credentials, RegisterPayload, UserDto};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ClientError;

/// What is written to the session store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoredSession {
    pub token: String,
    pub user: UserDto,
}

/// The signed-in user, shared by every screen.
///
/// Holds the [`ApiClient`] so that signing in or out also updates the token
/// sent with protected requests.
#[derive(Debug, Clone)]
pub struct Session {
    api: ApiClient,
    user: Option<UserDto>,
    store_path: Option<PathBuf>,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Session {
            api,
            user: None,
            store_path: None,
        }
    }

    /// Like [`Session::new`], but remembers the session in `path` and picks
    /// up one left there by a previous run.
    pub fn with_store(api: ApiClient, path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let mut session = Session {
            api,
            user: None,
            store_path: Some(path.clone()),
        };
        if let Some(stored) = read_store(&path)? {
            tracing::info!("Restored session for {}", stored.user.username);
            session.api.set_token(Some(stored.token));
            session.user = Some(stored.user);
        }
        Ok(session)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn current_user(&self) -> Option<&UserDto> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.api.token().is_some()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserDto, ClientError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&credentials).await?;
        tracing::info!("Logged in as {}", response.user.username);
        Ok(self.establish(response))
    }

    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<&UserDto, ClientError> {
        let payload = RegisterPayload {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.register(&payload).await?;
        tracing::info!("Registered {}", response.user.username);
        Ok(self.establish(response))
    }

    pub fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(user) = self.user.take() {
            tracing::info!("Logged out {}", user.username);
        }
        self.api.set_token(None);
        if let Some(path) = &self.store_path {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Signs in with what the server handed back. A store that cannot be
    /// written only costs the next restart its session.
    fn establish(&mut self, response: AuthResponse) -> &UserDto {
        if let Some(path) = &self.store_path {
            let stored = StoredSession {
                token: response.token.clone(),
                user: response.user.clone(),
            };
            if let Err(e) = write_store(path, &stored) {
                tracing::warn!("Could not save the session to {}: {}", path.display(), e);
            }
        }
        self.api.set_token(Some(response.token));
        self.user.insert(response.user)
    }
}

fn write_store(path: &Path, stored: &StoredSession) -> Result<(), ClientError> {
    std::fs::write(path, serde_json::to_vec_pretty(stored)?)?;
    Ok(())
}

fn read_store(path: &Path) -> Result<Option<StoredSession>, ClientError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
