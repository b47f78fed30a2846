//! Storage layer for Carteira
//!
//! JSON file persistence with atomic writes for the session cache, and
//! payload loading for the report commands.

pub mod file_io;
pub mod session;

pub use file_io::{read_json, read_payload, read_payload_from, write_json_atomic, STDIN_SOURCE};
pub use session::{JsonFileStore, MemoryStore, SessionContext, SessionStore};

use crate::config::paths::CarteiraPaths;
use crate::error::CarteiraError;

/// Open the session context backed by `session.json`
pub fn open_session(paths: &CarteiraPaths) -> Result<SessionContext<JsonFileStore>, CarteiraError> {
    let store = JsonFileStore::open(paths.session_file())?;
    SessionContext::init(store)
}
