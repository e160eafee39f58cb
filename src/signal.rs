//! Signal handling for graceful shutdown.
//!
//! Centralized Ctrl+C handling: a shared `AtomicBool` flag is set when a
//! termination signal arrives, and the TUI loop checks it every frame.
//! On interruption the application exits with code 130 (128 + SIGINT).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shutdown flag wrapper set by the installed signal handler.
///
/// Clone-cheap; the underlying flag is shared and uses atomic operations,
/// so handles may be passed freely to the TUI loop.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownHandler {
    /// Create a handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check whether shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Get the shared flag for the TUI loop.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Set the flag manually (used in tests).
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Install the Ctrl+C handler and return its [`ShutdownHandler`].
///
/// # Errors
///
/// Returns an error if a handler is already installed for this process.
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        eprintln!("Interrupted. Cleaning up...");
    })?;

    log::debug!("Ctrl+C handler installed");
    Ok(handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_starts_unset() {
        let handler = ShutdownHandler::new();
        assert!(!handler.is_shutdown_requested());
    }

    #[test]
    fn test_request_shutdown_sets_flag() {
        let handler = ShutdownHandler::new();
        handler.request_shutdown();
        assert!(handler.is_shutdown_requested());
    }

    #[test]
    fn test_flag_is_shared_across_clones() {
        let handler = ShutdownHandler::new();
        let clone = handler.clone();
        handler.request_shutdown();
        assert!(clone.is_shutdown_requested());
    }

    #[test]
    fn test_get_flag_observes_handler() {
        let handler = ShutdownHandler::new();
        let flag = handler.get_flag();
        assert!(!flag.load(Ordering::SeqCst));
        handler.request_shutdown();
        assert!(flag.load(Ordering::SeqCst));
    }
}
