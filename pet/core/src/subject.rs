//! View Subject
//!
//! Whose pet the dialog is showing. The caller's own pet is mutable; any
//! other account's pet is read-only.

use serde::{Deserialize, Serialize};

/// Fallback label when the host gives no display name for another account
pub const UNKNOWN_USER_LABEL: &str = "User";

/// The account whose pet is being displayed
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewSubject {
    /// The authenticated caller
    #[default]
    Own,
    /// Another account, read-only
    Other {
        /// External account identifier
        id: String,
        /// Display name supplied by the host
        display_name: Option<String>,
    },
}

impl ViewSubject {
    /// Another account's pet
    pub fn other(id: impl Into<String>, display_name: Option<String>) -> Self {
        Self::Other {
            id: id.into(),
            display_name,
        }
    }

    /// Build the subject from the host's optional parameters
    ///
    /// A missing or blank id means the caller's own pet.
    #[must_use]
    pub fn from_host(other_id: Option<&str>, display_name: Option<&str>) -> Self {
        match other_id.map(str::trim) {
            Some(id) if !id.is_empty() => Self::other(id, display_name.map(str::to_string)),
            _ => Self::Own,
        }
    }

    /// Is this the caller's own pet?
    #[must_use]
    pub fn is_own(&self) -> bool {
        matches!(self, Self::Own)
    }

    /// Same account, ignoring the display name
    #[must_use]
    pub fn same_account(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Own, Self::Own) => true,
            (Self::Other { id: a, .. }, Self::Other { id: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Create/feed/pat/rename are only legal on the caller's own pet
    #[must_use]
    pub fn allows_mutation(&self) -> bool {
        self.is_own()
    }

    /// Identifier of the other account, if any
    #[must_use]
    pub fn other_id(&self) -> Option<&str> {
        match self {
            Self::Own => None,
            Self::Other { id, .. } => Some(id),
        }
    }

    /// Name shown for the other account
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Own => "",
            Self::Other { display_name, .. } => display_name
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(UNKNOWN_USER_LABEL),
        }
    }

    /// Dialog title for this subject
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Own => "My Moyu Pet".to_string(),
            Self::Other { .. } => format!("{}'s Pet", self.display_name()),
        }
    }
}
