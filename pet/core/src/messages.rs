//! Dialog Messages
//!
//! Messages sent from the dialog core to its host surface. The surface
//! shows notices and may mirror the snapshot; it never decides what the
//! dialog presents (that is [`crate::view::select_view`]'s job).

use serde::{Deserialize, Serialize};

use crate::snapshot::PetSnapshot;

/// Messages from the dialog to the host surface
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DialogMessage {
    /// Transient notice (toast)
    Notify {
        /// Notice level
        level: NotifyLevel,
        /// Notice text
        message: String,
    },

    /// The store's snapshot changed (None after a reset)
    SnapshotChanged {
        /// The new snapshot
        snapshot: Option<PetSnapshot>,
    },
}

/// Notice levels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// Informational
    Info,
    /// An action succeeded
    Success,
    /// Local validation rejected the input
    Warning,
    /// A request failed
    Error,
}

impl NotifyLevel {
    /// Short tag for plain-text rendering
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_level_tag() {
        assert_eq!(NotifyLevel::Success.tag(), "ok");
        assert_eq!(NotifyLevel::Error.tag(), "error");
    }

    #[test]
    fn test_message_serializes() {
        let msg = DialogMessage::Notify {
            level: NotifyLevel::Warning,
            message: "Please enter a pet name".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("Warning"));
    }
}
