//! Core error types for solver-core.
//!
//! Errors are grouped by concern with thiserror. Every operation boundary
//! (fetch, submit, sign-in) catches these and turns them into a single
//! notification; [`CoreError::category`] tells the boundary which kind of
//! message the user should see.

use std::path::PathBuf;
use thiserror::Error;

use crate::sync::SyncError;

/// Core error type for solver-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote store errors (transport, status, response shape)
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Identity provider errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// User-facing classification of a [`CoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Nothing configured to talk to; blocked before any network call.
    Config,
    /// Transport failure, non-success status, or an unreadable response.
    Network,
    /// Identity provider rejected or is misconfigured.
    Auth,
}

impl CoreError {
    /// Parse failures are reported to users as network failures.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CoreError::Config(_) => ErrorCategory::Config,
            CoreError::Sync(_) | CoreError::Json(_) => ErrorCategory::Network,
            CoreError::Auth(_) => ErrorCategory::Auth,
            CoreError::Io(_) => ErrorCategory::Config,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// No API endpoint configured
    #[error("No API endpoint configured")]
    MissingEndpoint,

    /// Could not determine where configuration lives
    #[error("Could not determine configuration directory: {0}")]
    NoDataDir(String),
}

/// Identity provider errors.
///
/// Each variant carries enough context to tell the user what to do next;
/// see [`AuthError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No identity in the current session
    #[error("Not signed in")]
    NotSignedIn,

    /// Agent identifier was blank
    #[error("Agent identity must not be empty")]
    EmptyIdentity,

    /// Provider settings are missing or unusable
    #[error("Identity provider is not configured: {0}")]
    ProviderNotConfigured(String),

    /// The sign-in method is disabled on the provider side
    #[error("Sign-in method '{provider}' is not enabled")]
    ProviderDisabled { provider: String },

    /// Provider refused the sign-in for any other reason
    #[error("Sign-in rejected: {0}")]
    Rejected(String),
}

impl AuthError {
    /// Map a federated provider's error code onto the taxonomy.
    pub fn from_provider_code(code: &str, message: &str) -> Self {
        match code {
            "auth/configuration-not-found" | "auth/operation-not-allowed" => {
                AuthError::ProviderDisabled {
                    provider: "Google".to_string(),
                }
            }
            "auth/invalid-api-key" | "auth/invalid-config" => {
                AuthError::ProviderNotConfigured(message.to_string())
            }
            _ => AuthError::Rejected(message.to_string()),
        }
    }

    /// Notification text with remediation for the user.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotSignedIn => "Sign in before logging a routine.".to_string(),
            AuthError::EmptyIdentity => "Enter an Agent ID to continue.".to_string(),
            AuthError::ProviderNotConfigured(_) => "Invalid Configuration Details".to_string(),
            AuthError::ProviderDisabled { provider } => format!(
                "Enable \"{provider}\" in Firebase Console > Authentication > Sign-in method"
            ),
            AuthError::Rejected(message) => format!("Login Failed: {message}"),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
