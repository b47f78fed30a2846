//! Session cache and session context
//!
//! The signed-in user lives in a small string key-value cache (`userId`,
//! `userName`). `SessionContext` wraps a store and is the only thing that
//! reads or writes those keys.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, info, warn};

use super::file_io::{read_json, write_json_atomic};
use crate::api::LoginResponse;
use crate::error::CarteiraError;
use crate::models::session::{USER_ID_KEY, USER_NAME_KEY};
use crate::models::{Route, Session, UserId};

/// A string key-value cache
pub trait SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, CarteiraError>;

    fn set(&self, key: &str, value: &str) -> Result<(), CarteiraError>;

    /// Remove every key
    fn clear(&self) -> Result<(), CarteiraError>;
}

fn lock_error<E: std::fmt::Display>(e: E) -> CarteiraError {
    CarteiraError::Storage(format!("Failed to acquire session lock: {}", e))
}

/// Session cache persisted as a flat JSON object
pub struct JsonFileStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store, loading any existing cache file
    ///
    /// An unreadable cache starts empty, so the user is signed out and the
    /// next write replaces the bad file.
    pub fn open(path: PathBuf) -> Result<Self, CarteiraError> {
        let data = match read_json::<BTreeMap<String, String>, _>(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "session cache unreadable; starting signed out");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), keys = data.len(), "session cache loaded");
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    fn save(&self, data: &BTreeMap<String, String>) -> Result<(), CarteiraError> {
        write_json_atomic(&self.path, data)
    }
}

impl SessionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CarteiraError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CarteiraError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(key.to_string(), value.to_string());
        self.save(&data)
    }

    fn clear(&self) -> Result<(), CarteiraError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        self.save(&data)
    }
}

/// In-memory session cache
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CarteiraError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CarteiraError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CarteiraError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        Ok(())
    }
}

/// The live session over a store
///
/// At most one session exists per context; signing in replaces it.
pub struct SessionContext<S: SessionStore> {
    store: S,
    session: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Read the cached session at launch
    ///
    /// A missing, empty or unparseable user id means signed out.
    pub fn init(store: S) -> Result<Self, CarteiraError> {
        let user_id = store.get(USER_ID_KEY)?;
        let user_name = store.get(USER_NAME_KEY)?.unwrap_or_default();

        let session = match user_id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<UserId>() {
                Ok(id) => Some(Session::new(id, user_name)),
                Err(e) => {
                    warn!(value = raw, error = %e, "cached user id is not a number; treating as signed out");
                    None
                }
            },
        };

        Ok(Self { store, session })
    }

    /// The signed-in user, if any
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Screen to open at launch
    pub fn initial_route(&self) -> Route {
        if self.is_signed_in() {
            Route::Home
        } else {
            Route::Login
        }
    }

    fn establish(&mut self, session: Session) -> Result<&Session, CarteiraError> {
        self.store
            .set(USER_ID_KEY, &session.user_id.get().to_string())?;
        self.store.set(USER_NAME_KEY, &session.user_name)?;
        info!(user = %session.user_id, "session established");
        Ok(&*self.session.insert(session))
    }

    /// Cache the user from a successful login
    pub fn login(&mut self, response: LoginResponse) -> Result<&Session, CarteiraError> {
        self.establish(Session::from(response))
    }

    /// Cache the user from a successful registration
    pub fn register(&mut self, response: LoginResponse) -> Result<&Session, CarteiraError> {
        self.establish(Session::from(response))
    }

    /// Update the cached display name after a profile edit
    pub fn rename(&mut self, name: &str) -> Result<&Session, CarteiraError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CarteiraError::Validation(
                "User name cannot be empty".to_string(),
            ));
        }

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| CarteiraError::Session("Not signed in".to_string()))?;

        self.store.set(USER_NAME_KEY, name)?;
        session.user_name = name.to_string();
        Ok(&*session)
    }

    /// Forget the cached user
    pub fn logout(&mut self) -> Result<(), CarteiraError> {
        self.store.clear()?;
        if let Some(session) = self.session.take() {
            info!(user = %session.user_id, "session cleared");
        }
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
