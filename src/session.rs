//! Authenticated-session capability.
//!
//! The desk stores a session blob on disk after login:
//! `{ "userData": { "_id", "fullName", "email" }, "token": "..." }`.
//! This module reads that blob into a [`Session`] value which is handed to
//! the form controller and the HTTP client. The blob is never written by
//! this crate, and nothing outside this module touches the file: the
//! session is an injected capability, so tests substitute fakes.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::{Result, TesseraError};

/// The logged-in user's identity, as recorded at login time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentUser {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "fullName")]
    pub full_name: String,

    #[serde(default)]
    pub email: String,
}

/// Session capability: current user plus the bearer token for the user API
#[derive(Clone)]
pub struct Session {
    pub user: CurrentUser,
    token: SecretString,
}

#[derive(Deserialize)]
struct SessionBlob {
    #[serde(rename = "userData")]
    user_data: CurrentUser,
    token: String,
}

impl Session {
    pub fn new(user: CurrentUser, token: impl Into<String>) -> Self {
        Self {
            user,
            token: SecretString::from(token.into()),
        }
    }

    /// Get the path to the session blob.
    ///
    /// Resolution order:
    /// 1. `TESSERA_SESSION_FILE` environment variable (if set)
    /// 2. Platform data directory + `tessera/session.json`
    pub fn session_path() -> PathBuf {
        if let Ok(path) = env::var("TESSERA_SESSION_FILE")
            && !path.is_empty()
        {
            return PathBuf::from(path);
        }

        directories::ProjectDirs::from("com", "divmain", "tessera")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .unwrap_or_else(|| PathBuf::from("session.json"))
    }

    /// Load the session from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::session_path())
    }

    /// Load the session from a specific blob file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TesseraError::Session(format!(
                "no session blob at {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let blob: SessionBlob = serde_json::from_str(&content).map_err(|e| {
            tracing::warn!("malformed session blob at {}: {e}", path.display());
            TesseraError::Session(format!("malformed session blob: {e}"))
        })?;

        if blob.token.is_empty() {
            return Err(TesseraError::Session("session has no token".to_string()));
        }

        Ok(Self::new(blob.user_data, blob.token))
    }

    /// Expose the bearer token. Call only at header-build time.
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_blob(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_load_session_blob() {
        let file = write_blob(
            r#"{"userData": {"_id": "u7", "fullName": "Grace Hopper", "email": "grace@example.com"},
                "token": "tok-123"}"#,
        );

        let session = Session::load_from(file.path()).unwrap();
        assert_eq!(session.user.id, "u7");
        assert_eq!(session.user.full_name, "Grace Hopper");
        assert_eq!(session.expose_token(), "tok-123");
    }

    #[test]
    fn test_missing_blob_is_session_error() {
        let err = Session::load_from(Path::new("/nonexistent/session.json")).unwrap_err();
        assert!(matches!(err, TesseraError::Session(_)));
    }

    #[test]
    fn test_empty_token_rejected() {
        let file = write_blob(r#"{"userData": {"_id": "u7", "fullName": "G"}, "token": ""}"#);
        assert!(Session::load_from(file.path()).is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new(
            CurrentUser {
                id: "u1".to_string(),
                full_name: "Ada".to_string(),
                email: String::new(),
            },
            "super-secret",
        );
        let debug = format!("{session:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
