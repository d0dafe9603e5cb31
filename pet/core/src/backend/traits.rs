//! Pet Backend Traits
//!
//! The request/response contract of the pet service. The dialog only ever
//! talks to a [`PetBackend`]; transport and encoding live in the
//! implementations.
//!
//! Every call returns an [`ApiResponse`] when the service answered, or an
//! error when it could not be reached. [`RemoteOutcome`] folds both into the
//! three cases the dialog cares about.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::snapshot::{PetId, PetSnapshot};

/// Service reply: `{ success, data?, message? }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the service accepted the request
    pub success: bool,
    /// Payload, if any
    pub data: Option<T>,
    /// Server-provided message, usually set on failure
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful reply carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Successful reply without data ("nothing there")
    #[must_use]
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            message: None,
        }
    }

    /// Rejected reply with a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// What a remote call amounted to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteOutcome<T> {
    /// Accepted, with data
    Data(T),
    /// Accepted, without data
    Empty,
    /// Rejected by the service or not reachable
    Failed {
        /// Server message, when one was given
        message: Option<String>,
    },
}

impl<T> RemoteOutcome<T> {
    /// Fold a transport result into an outcome
    ///
    /// Transport errors carry no message so the caller falls back to its own
    /// generic text; blank server messages count as no message.
    pub fn from_result(operation: &str, result: anyhow::Result<ApiResponse<T>>) -> Self {
        match result {
            Ok(response) if response.success => match response.data {
                Some(data) => Self::Data(data),
                None => Self::Empty,
            },
            Ok(response) => {
                let message = response.message.filter(|m| !m.trim().is_empty());
                tracing::warn!(operation, message = ?message, "Pet service rejected request");
                Self::Failed { message }
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "Pet service request failed");
                Self::Failed { message: None }
            }
        }
    }

    /// The server message of a failure
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Pet service trait
///
/// Implement this to point the dialog at a different transport.
#[async_trait]
pub trait PetBackend: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &str;

    /// The caller's own pet; success without data means "no pet yet"
    async fn get_own_pet(&self) -> anyhow::Result<ApiResponse<PetSnapshot>>;

    /// Another account's pet
    async fn get_other_pet(&self, subject_id: &str) -> anyhow::Result<ApiResponse<PetSnapshot>>;

    /// Create the caller's pet
    async fn create_pet(
        &self,
        name: &str,
        avatar_url: &str,
    ) -> anyhow::Result<ApiResponse<PetSnapshot>>;

    /// Feed the pet; the service enforces the cooldown
    async fn feed_pet(&self, id: &PetId) -> anyhow::Result<ApiResponse<PetSnapshot>>;

    /// Pat the pet; the service enforces the cooldown
    async fn pat_pet(&self, id: &PetId) -> anyhow::Result<ApiResponse<PetSnapshot>>;

    /// Rename the pet; `data` is `true` when the rename was stored
    async fn rename_pet(&self, id: &PetId, name: &str) -> anyhow::Result<ApiResponse<bool>>;
}
