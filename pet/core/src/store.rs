//! Pet Snapshot Store
//!
//! Holds the one pet snapshot the dialog is currently showing, together with
//! the subject it belongs to. Only the dialog writes to it, and only while
//! applying a fetch or action completion that belongs to the current
//! activation.

use crate::snapshot::{PetId, PetSnapshot};
use crate::subject::ViewSubject;

/// The currently displayed pet (or its absence) and its subject
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PetStore {
    snapshot: Option<PetSnapshot>,
    subject: ViewSubject,
}

impl PetStore {
    /// Create an empty store for the caller's own pet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<&PetSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whose pet this store describes
    #[must_use]
    pub fn subject(&self) -> &ViewSubject {
        &self.subject
    }

    /// Identifier of the current pet, once one is known
    #[must_use]
    pub fn pet_id(&self) -> Option<&PetId> {
        self.snapshot.as_ref().and_then(|pet| pet.id.as_ref())
    }

    /// True when no snapshot is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Drop the snapshot and switch to `subject`
    pub(crate) fn reset(&mut self, subject: ViewSubject) {
        self.snapshot = None;
        self.subject = subject;
    }

    /// Refresh the subject's details for the same account, keeping the snapshot
    pub(crate) fn relabel(&mut self, subject: ViewSubject) {
        debug_assert!(self.subject.same_account(&subject));
        self.subject = subject;
    }

    /// Drop the snapshot, keeping the subject
    pub(crate) fn clear(&mut self) {
        self.snapshot = None;
    }

    /// Replace the whole snapshot with a server-returned one
    pub(crate) fn replace(&mut self, snapshot: PetSnapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Field-level update of the name; false when there is no snapshot
    pub(crate) fn set_name(&mut self, name: String) -> bool {
        match self.snapshot.as_mut() {
            Some(pet) => {
                pet.name = name;
                true
            }
            None => false,
        }
    }
}
