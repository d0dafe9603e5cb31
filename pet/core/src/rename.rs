//! Rename Sub-mode
//!
//! Two states layered on the detail presentation:
//!
//! ```text
//!          begin (own pet, snapshot present)
//!   Idle ─────────────────────────────────────► Editing
//!    ▲                                             │
//!    └──────── rename succeeded / cancel ──────────┘
//! ```
//!
//! A failed rename stays in `Editing` so the user can retry.

use crate::actions::ActionError;
use crate::store::PetStore;
use crate::validation::{InputEdit, NameInput};

/// Where the rename affordance is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenameMode {
    /// Showing the name with an edit affordance
    #[default]
    Idle,
    /// Showing the input with confirm/cancel
    Editing,
}

/// Rename sub-mode and its pending input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameState {
    mode: RenameMode,
    input: NameInput,
}

impl RenameState {
    /// Idle, with an empty buffer bounded at `max_len`
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            mode: RenameMode::Idle,
            input: NameInput::new(max_len),
        }
    }

    /// Current mode
    #[must_use]
    pub fn mode(&self) -> RenameMode {
        self.mode
    }

    /// True while editing
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.mode == RenameMode::Editing
    }

    /// Pending input
    #[must_use]
    pub fn input(&self) -> &NameInput {
        &self.input
    }

    /// Enter editing
    ///
    /// The buffer starts empty. Entering again while already editing keeps
    /// what was typed.
    ///
    /// # Errors
    ///
    /// [`ActionError::NotOwnPet`] for another account's pet,
    /// [`ActionError::NoPet`] when no snapshot is held.
    pub fn begin(&mut self, store: &PetStore) -> Result<(), ActionError> {
        if !store.subject().allows_mutation() {
            return Err(ActionError::NotOwnPet);
        }
        if store.is_empty() {
            return Err(ActionError::NoPet);
        }
        if self.mode == RenameMode::Idle {
            self.input.clear();
            self.mode = RenameMode::Editing;
        }
        Ok(())
    }

    /// Edit the buffer; ignored unless editing
    pub fn edit(&mut self, edit: InputEdit) -> bool {
        self.is_editing() && self.input.apply(edit)
    }

    /// Leave editing without touching the store
    pub fn cancel(&mut self) {
        self.input.clear();
        self.mode = RenameMode::Idle;
    }

    /// Leave editing after a stored rename
    pub fn finish(&mut self) {
        self.cancel();
    }

    /// Back to idle with an empty buffer (new activation)
    pub fn reset(&mut self) {
        self.cancel();
    }
}
