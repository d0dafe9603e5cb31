//! Display State Types
//!
//! State derived from [`DialogMessage`]s and used for rendering the parts of
//! the screen the dialog does not own: the toast line and the host's status
//! line.
//!
//! The TUI is a thin client. What the dialog itself shows comes from
//! `PetDialog::view`; this module only mirrors what the dialog announces.

use std::time::Duration;

use pet_core::{DialogMessage, NotifyLevel, PetSnapshot};

/// How long a toast stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// A toast to display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNotification {
    /// Notification level
    pub level: NotifyLevel,
    /// Message content
    pub message: String,
    /// Time left on screen
    pub remaining: Duration,
}

/// The full display state for the TUI
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Last snapshot the dialog announced
    pub snapshot: Option<PetSnapshot>,
    /// Current toast (if any)
    pub notification: Option<DisplayNotification>,
}

impl DisplayState {
    /// Create a new display state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a [`DialogMessage`] to update display state
    pub fn apply_message(&mut self, msg: DialogMessage) {
        match msg {
            DialogMessage::Notify { level, message } => {
                self.notification = Some(DisplayNotification {
                    level,
                    message,
                    remaining: NOTIFICATION_TTL,
                });
            }
            DialogMessage::SnapshotChanged { snapshot } => {
                self.snapshot = snapshot;
            }
        }
    }

    /// Update timers
    pub fn update(&mut self, delta: Duration) {
        if let Some(notification) = self.notification.as_mut() {
            notification.remaining = notification.remaining.saturating_sub(delta);
            if notification.remaining.is_zero() {
                self.notification = None;
            }
        }
    }

    /// Clear the notification
    pub fn clear_notification(&mut self) {
        self.notification = None;
    }

    /// Status line text for the host screen
    #[must_use]
    pub fn status_line(&self) -> String {
        match self.snapshot {
            Some(ref pet) => format!("{} {}", pet.name, pet.level_label()),
            None => "No pet loaded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_notify_sets_notification() {
        let mut state = DisplayState::new();
        state.apply_message(DialogMessage::Notify {
            level: NotifyLevel::Error,
            message: "cooldown".to_string(),
        });

        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.level, NotifyLevel::Error);
        assert_eq!(notification.message, "cooldown");
        assert_eq!(notification.remaining, NOTIFICATION_TTL);
    }

    #[test]
    fn test_newer_notification_replaces_older() {
        let mut state = DisplayState::new();
        state.apply_message(DialogMessage::Notify {
            level: NotifyLevel::Warning,
            message: "first".to_string(),
        });
        state.apply_message(DialogMessage::Notify {
            level: NotifyLevel::Success,
            message: "second".to_string(),
        });
        assert_eq!(
            state.notification.map(|n| n.message),
            Some("second".to_string())
        );
    }

    #[test]
    fn test_notification_expires() {
        let mut state = DisplayState::new();
        state.apply_message(DialogMessage::Notify {
            level: NotifyLevel::Info,
            message: "hi".to_string(),
        });

        state.update(Duration::from_secs(2));
        assert!(state.notification.is_some());
        state.update(Duration::from_secs(2));
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_snapshot_mirror_and_status_line() {
        let mut state = DisplayState::new();
        assert_eq!(state.status_line(), "No pet loaded");

        let mut pet = PetSnapshot::new("p1", "Bubbles");
        pet.level = 3;
        state.apply_message(DialogMessage::SnapshotChanged {
            snapshot: Some(pet),
        });
        assert_eq!(state.status_line(), "Bubbles Lv.3");

        state.apply_message(DialogMessage::SnapshotChanged { snapshot: None });
        assert!(state.snapshot.is_none());
    }
}
