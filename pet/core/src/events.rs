//! Dialog Events
//!
//! User intents forwarded by the host surface. The surface does not interpret
//! them; [`crate::PetDialog::handle_event`] decides what each one means in the
//! current state.

use serde::{Deserialize, Serialize};

use crate::subject::ViewSubject;
use crate::validation::InputEdit;

/// Events from the host surface to the dialog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogEvent {
    /// Show the dialog for `subject`
    Open {
        /// Whose pet to show
        subject: ViewSubject,
    },

    /// Hide the dialog
    Close,

    /// The host switched the viewed account
    ChangeSubject {
        /// The new subject
        subject: ViewSubject,
    },

    /// Edit the creation form's name field
    EditCreateName(InputEdit),

    /// Submit the creation form
    SubmitCreate,

    /// Feed the pet
    Feed,

    /// Pat the pet
    Pat,

    /// Activate the rename affordance
    BeginRename,

    /// Edit the rename input
    EditRename(InputEdit),

    /// Confirm the rename
    ConfirmRename,

    /// Abandon the rename
    CancelRename,
}
