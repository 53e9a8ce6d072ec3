//! Error types for the mirror pipeline.
//!
//! Every fallible operation in the core returns `Result<T, MirrorError>`.
//! Whether an error is fatal is decided by the controller, not here:
//! capture-path errors end the loop, tap-path errors are logged.

use std::time::Duration;
use thiserror::Error;

/// The canonical error type for tapmirror.
#[derive(Debug, Error)]
pub enum MirrorError {
    // ── Bridge Errors ────────────────────────────────────────────
    /// The bridge process could not be spawned or exited non-zero.
    #[error("bridge command `{command}` failed: {reason}")]
    BridgeInvocation { command: String, reason: String },

    /// A bridge call exceeded its deadline and was killed.
    #[error("bridge call timed out after {0:?}")]
    Timeout(Duration),

    // ── Payload Errors ───────────────────────────────────────────
    /// The bridge answered with something we cannot interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The captured image payload is malformed.
    #[error("decode error: {0}")]
    Decode(String),

    // ── Setup Errors ─────────────────────────────────────────────
    /// The device screen size is unknown or has a zero dimension.
    #[error("invalid screen size: {0}")]
    InvalidScreenSize(String),

    /// Creating or updating the display surface failed.
    #[error("display error: {0}")]
    Display(String),
}

impl MirrorError {
    /// Shorthand for a [`MirrorError::BridgeInvocation`].
    pub fn bridge(command: impl Into<String>, reason: impl Into<String>) -> Self {
        MirrorError::BridgeInvocation {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

impl From<image::ImageError> for MirrorError {
    fn from(e: image::ImageError) -> Self {
        MirrorError::Decode(e.to_string())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, MirrorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let e = MirrorError::bridge("adb exec-out screencap -p", "exit status: 1");
        assert!(e.to_string().contains("screencap"));
        assert!(e.to_string().contains("exit status: 1"));

        let e = MirrorError::Protocol("unexpected capture payload".into());
        assert!(e.to_string().contains("unexpected capture payload"));

        let e = MirrorError::Timeout(Duration::from_millis(250));
        assert!(e.to_string().contains("250ms"));
    }

    #[test]
    fn from_image_error() {
        let err = image::load_from_memory(b"definitely not an image").unwrap_err();
        let e: MirrorError = err.into();
        assert!(matches!(e, MirrorError::Decode(_)));
    }
}
