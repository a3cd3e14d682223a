//! Bearer token sources.
//!
//! The client asks its `CredentialProvider` for a token on every request, so
//! a token stored or cleared between calls takes effect on the next call.
//! A missing token is a normal state, not an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::StoreError;

/// Key under which `TokenFile` keeps the bearer token.
pub const TOKEN_KEY: &str = "token";

const APP_DIR: &str = "api-client";
const SESSION_FILE: &str = "session.json";

/// Source of the bearer token attached to outgoing requests.
pub trait CredentialProvider: Send + Sync {
    /// Current token, or `None` when no credential is stored.
    fn token(&self) -> Option<String>;
}

/// Never yields a token.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token supplied by the host application.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        self()
    }
}

/// Durable key-value file holding the token under `TOKEN_KEY`.
///
/// The file is a JSON object; other keys are left untouched by `store` and
/// `clear`. Reading never fails: any problem with the file means "no token".
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/api-client/session.json`.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs_next::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token`, creating the file and its parent directory if needed.
    pub fn store(&self, token: &str) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    /// Remove the token, keeping any other keys.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.load_entries()?;
        if entries.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }

    fn load_entries(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject(self.path.display().to_string())),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl CredentialProvider for TokenFile {
    fn token(&self) -> Option<String> {
        let entries = match self.load_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable token file");
                return None;
            }
        };
        match entries.get(TOKEN_KEY) {
            Some(Value::String(token)) => Some(token.clone()),
            Some(_) => {
                tracing::debug!(path = %self.path.display(), "token entry is not a string");
                None
            }
            None => None,
        }
    }
}
