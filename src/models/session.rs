//! Session model
//!
//! The signed-in user as cached on the device: an id and a display name.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Cache key holding the user id
pub const USER_ID_KEY: &str = "userId";

/// Cache key holding the display name
pub const USER_NAME_KEY: &str = "userName";

/// The signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub user_name: String,
}

impl Session {
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.user_name, self.user_id)
    }
}

/// Screen the app opens on at launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::Login => write!(f, "Auth_login"),
        }
    }
}
