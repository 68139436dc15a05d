//! Error Types
//!
//! This module defines the error types used throughout the streaming core.
//!
//! # Overview
//!
//! The main error type [`StreamError`] covers all failure modes including:
//! - Per-resource state machine violations
//! - Backend load/unload failures
//! - Region configuration parsing errors
//!
//! All public APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, StreamError>`.

use thiserror::Error;

/// The main error type for the streaming core.
#[derive(Error, Debug)]
pub enum StreamError {
    // ========================================================================
    // State Machine Errors
    // ========================================================================
    /// A transition was requested that the per-resource state machine
    /// forbids (e.g. a load issued while an operation is already in
    /// flight). The scheduler's reconciliation algorithm guarantees this
    /// cannot happen, so seeing it means the caller bypassed the scheduler
    /// or the scheduler itself is broken.
    #[error("invalid transition for resource '{resource}': {reason}")]
    InvalidTransition {
        /// The resource id the transition was requested for
        resource: String,
        /// Which precondition was violated
        reason: &'static str,
    },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// The backend reported a failed load or unload. Recoverable: the
    /// resource stays in its last known good state and the next tick
    /// retries while the desired state still calls for it.
    #[error("backend operation failed: {0}")]
    Backend(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Region set configuration was structurally invalid.
    #[error("region config error: {0}")]
    Config(String),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias for `Result<T, StreamError>`.
pub type Result<T> = std::result::Result<T, StreamError>;
