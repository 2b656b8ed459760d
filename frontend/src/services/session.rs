//! The browser-persisted session. Hooks receive a `Session` value
//! explicitly instead of reading storage ad hoc at call sites; the
//! booking core below this layer only ever sees an `Option<&str>`
//! token, so it stays storage-agnostic.

use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "token";

/// Every key the login flow writes; cleared together when the backend
/// rejects the credential.
const SESSION_KEYS: [&str; 5] = ["token", "rol", "email", "nombre", "apellido"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session;

impl Session {
    pub fn token(&self) -> Option<String> {
        LocalStorage::get::<String>(TOKEN_KEY)
            .ok()
            .filter(|token| !token.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn nombre(&self) -> Option<String> {
        LocalStorage::get::<String>("nombre").ok()
    }

    pub fn apellido(&self) -> Option<String> {
        LocalStorage::get::<String>("apellido").ok()
    }

    pub fn email(&self) -> Option<String> {
        LocalStorage::get::<String>("email").ok()
    }

    pub fn display_name(&self) -> Option<String> {
        let nombre = self.nombre()?;
        match self.apellido() {
            Some(apellido) if !apellido.is_empty() => Some(format!("{nombre} {apellido}")),
            _ => Some(nombre),
        }
    }

    /// Wipes the whole session, used when the backend answers 401.
    pub fn clear(&self) {
        for key in SESSION_KEYS {
            LocalStorage::delete(key);
        }
    }
}
