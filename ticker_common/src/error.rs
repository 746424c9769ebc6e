//! Error types shared between server and client.
//!
//! The `TickerError` enum unifies the few failure cases the workspace has: I/O,
//! JSON, HTTP transport on the client side, a poisoned series lock and bad
//! startup configuration.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by server and client.
#[derive(Error, Debug)]
pub enum TickerError {
    /// I/O error originating from sockets, listeners or child processes.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// A startup setting could not be parsed or is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl<T> From<PoisonError<T>> for TickerError {
    fn from(err: PoisonError<T>) -> Self {
        TickerError::MutexLock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn poisoned_lock_maps_to_mutex_lock() {
        let lock = Arc::new(Mutex::new(0u32));
        let clone = Arc::clone(&lock);
        let _ = thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err: TickerError = lock.lock().unwrap_err().into();
        assert!(matches!(err, TickerError::MutexLock(_)));
    }

    #[test]
    fn invalid_config_message() {
        let err = TickerError::InvalidConfig("port".into());
        assert_eq!(err.to_string(), "Invalid configuration: port");
    }
}
