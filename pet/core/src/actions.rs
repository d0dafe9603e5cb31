//! Action Dispatcher
//!
//! Create, feed, pat and rename. Each action has its own busy flag; an action
//! whose flag is set cannot be started again until its completion has been
//! applied. Different actions do not block each other, the server arbitrates
//! cooldowns and returns the authoritative snapshot either way.
//!
//! An action runs in three steps:
//!
//! 1. `prepare_*` checks preconditions, validates input and raises the busy
//!    flag, producing an [`ActionRequest`]. Nothing is sent when it fails.
//! 2. [`perform`] sends the request and folds the reply into an
//!    [`ActionOutcome`].
//! 3. [`ActionDispatcher::apply`] lowers the flag and, on success only,
//!    writes the store. A failed action leaves the store untouched.

use std::fmt;

use thiserror::Error;

use crate::backend::{PetBackend, RemoteOutcome};
use crate::messages::NotifyLevel;
use crate::snapshot::{PetId, PetSnapshot};
use crate::store::PetStore;
use crate::validation::{NameValidator, ValidationError};

/// The four mutating actions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Create the caller's pet
    Create,
    /// Feed the pet
    Feed,
    /// Pat the pet
    Pat,
    /// Rename the pet
    Rename,
}

impl ActionKind {
    /// Lowercase label, for logs
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Feed => "feed",
            Self::Pat => "pat",
            Self::Rename => "rename",
        }
    }

    /// Notice shown after success
    #[must_use]
    pub fn success_text(self) -> &'static str {
        match self {
            Self::Create => "Pet created",
            Self::Feed => "Fed your pet",
            Self::Pat => "Patted your pet",
            Self::Rename => "Name updated",
        }
    }

    /// Notice shown after a failure the server did not explain
    #[must_use]
    pub fn failure_text(self) -> &'static str {
        match self {
            Self::Create => "Failed to create pet",
            Self::Feed => "Feed failed, your pet may be cooling down",
            Self::Pat => "Pat failed, your pet may be cooling down",
            Self::Rename => "Failed to rename pet",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One busy flag per action
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyFlags {
    /// Create in flight
    pub create: bool,
    /// Feed in flight
    pub feed: bool,
    /// Pat in flight
    pub pat: bool,
    /// Rename in flight
    pub rename: bool,
}

impl BusyFlags {
    /// Is `kind` in flight?
    #[must_use]
    pub fn is_busy(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Create => self.create,
            ActionKind::Feed => self.feed,
            ActionKind::Pat => self.pat,
            ActionKind::Rename => self.rename,
        }
    }

    /// Is anything in flight?
    #[must_use]
    pub fn any(&self) -> bool {
        self.create || self.feed || self.pat || self.rename
    }

    fn set(&mut self, kind: ActionKind, busy: bool) {
        match kind {
            ActionKind::Create => self.create = busy,
            ActionKind::Feed => self.feed = busy,
            ActionKind::Pat => self.pat = busy,
            ActionKind::Rename => self.rename = busy,
        }
    }
}

/// Why an action was not started
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Input rejected locally
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Mutations are only legal on the caller's own pet
    #[error("This pet belongs to someone else")]
    NotOwnPet,

    /// No pet (or no pet id) to act on
    #[error("There is no pet to act on")]
    NoPet,

    /// Create needs the caller to have no pet
    #[error("You already have a pet")]
    PetAlreadyExists,

    /// The same action is already in flight
    #[error("{0} is already in progress")]
    Busy(ActionKind),

    /// The dialog is not open
    #[error("The pet dialog is closed")]
    Closed,
}

/// A validated request, ready to send
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionRequest {
    /// Create with a trimmed name and the default avatar
    Create {
        /// Trimmed name
        name: String,
        /// Avatar reference
        avatar_url: String,
    },
    /// Feed pet `id`
    Feed {
        /// Target pet
        id: PetId,
    },
    /// Pat pet `id`
    Pat {
        /// Target pet
        id: PetId,
    },
    /// Rename pet `id`
    Rename {
        /// Target pet
        id: PetId,
        /// Trimmed new name
        name: String,
    },
}

impl ActionRequest {
    /// Which action this is
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Create { .. } => ActionKind::Create,
            Self::Feed { .. } => ActionKind::Feed,
            Self::Pat { .. } => ActionKind::Pat,
            Self::Rename { .. } => ActionKind::Rename,
        }
    }
}

/// Reply to an [`ActionRequest`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Create replied
    Created(RemoteOutcome<PetSnapshot>),
    /// Feed replied
    Fed(RemoteOutcome<PetSnapshot>),
    /// Pat replied
    Patted(RemoteOutcome<PetSnapshot>),
    /// Rename replied
    Renamed {
        /// The name that was sent
        name: String,
        /// Service reply
        outcome: RemoteOutcome<bool>,
    },
}

impl ActionOutcome {
    /// Which action replied
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Created(_) => ActionKind::Create,
            Self::Fed(_) => ActionKind::Feed,
            Self::Patted(_) => ActionKind::Pat,
            Self::Renamed { .. } => ActionKind::Rename,
        }
    }
}

/// What applying an outcome did
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    /// Which action
    pub kind: ActionKind,
    /// Whether the store was written
    pub applied: bool,
    /// Notice level
    pub level: NotifyLevel,
    /// Notice text
    pub message: String,
}

impl ActionReport {
    fn success(kind: ActionKind) -> Self {
        Self {
            kind,
            applied: true,
            level: NotifyLevel::Success,
            message: kind.success_text().to_string(),
        }
    }

    fn failure(kind: ActionKind, message: Option<String>) -> Self {
        Self {
            kind,
            applied: false,
            level: NotifyLevel::Error,
            message: message.unwrap_or_else(|| kind.failure_text().to_string()),
        }
    }
}

/// Busy flags plus the precondition checks guarding each action
#[derive(Clone, Debug, Default)]
pub struct ActionDispatcher {
    busy: BusyFlags,
}

impl ActionDispatcher {
    /// Create a dispatcher with nothing in flight
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current busy flags
    #[must_use]
    pub fn busy(&self) -> BusyFlags {
        self.busy
    }

    /// Forget everything in flight (new activation)
    pub fn reset(&mut self) {
        self.busy = BusyFlags::default();
    }

    /// Check and start a create
    ///
    /// # Errors
    ///
    /// [`ActionError::NotOwnPet`], [`ActionError::PetAlreadyExists`],
    /// [`ActionError::Busy`] or a validation error for the name.
    pub fn prepare_create(
        &mut self,
        store: &PetStore,
        validator: &NameValidator,
        raw_name: &str,
        avatar_url: &str,
    ) -> Result<ActionRequest, ActionError> {
        Self::require_own(store)?;
        if !store.is_empty() {
            return Err(ActionError::PetAlreadyExists);
        }
        self.require_idle(ActionKind::Create)?;
        let name = validator.validate(raw_name)?;

        self.busy.set(ActionKind::Create, true);
        Ok(ActionRequest::Create {
            name,
            avatar_url: avatar_url.to_string(),
        })
    }

    /// Check and start a feed
    ///
    /// # Errors
    ///
    /// [`ActionError::NotOwnPet`], [`ActionError::NoPet`] or
    /// [`ActionError::Busy`].
    pub fn prepare_feed(&mut self, store: &PetStore) -> Result<ActionRequest, ActionError> {
        let id = self.prepare_care(store, ActionKind::Feed)?;
        Ok(ActionRequest::Feed { id })
    }

    /// Check and start a pat
    ///
    /// # Errors
    ///
    /// [`ActionError::NotOwnPet`], [`ActionError::NoPet`] or
    /// [`ActionError::Busy`].
    pub fn prepare_pat(&mut self, store: &PetStore) -> Result<ActionRequest, ActionError> {
        let id = self.prepare_care(store, ActionKind::Pat)?;
        Ok(ActionRequest::Pat { id })
    }

    /// Check and start a rename
    ///
    /// # Errors
    ///
    /// [`ActionError::NotOwnPet`], [`ActionError::NoPet`],
    /// [`ActionError::Busy`] or a validation error for the name.
    pub fn prepare_rename(
        &mut self,
        store: &PetStore,
        validator: &NameValidator,
        raw_name: &str,
    ) -> Result<ActionRequest, ActionError> {
        Self::require_own(store)?;
        let id = store.pet_id().cloned().ok_or(ActionError::NoPet)?;
        self.require_idle(ActionKind::Rename)?;
        let name = validator.validate(raw_name)?;

        self.busy.set(ActionKind::Rename, true);
        Ok(ActionRequest::Rename { id, name })
    }

    /// Lower the busy flag and, on success, write the store
    pub fn apply(&mut self, outcome: ActionOutcome, store: &mut PetStore) -> ActionReport {
        let kind = outcome.kind();
        self.busy.set(kind, false);

        match outcome {
            ActionOutcome::Created(result)
            | ActionOutcome::Fed(result)
            | ActionOutcome::Patted(result) => match result {
                RemoteOutcome::Data(pet) => {
                    store.replace(pet);
                    ActionReport::success(kind)
                }
                // Accepted without a snapshot: nothing trustworthy to show
                RemoteOutcome::Empty => ActionReport::failure(kind, None),
                RemoteOutcome::Failed { message } => ActionReport::failure(kind, message),
            },
            ActionOutcome::Renamed { name, outcome } => match outcome {
                RemoteOutcome::Data(true) => {
                    if store.set_name(name) {
                        ActionReport::success(kind)
                    } else {
                        ActionReport::failure(kind, None)
                    }
                }
                RemoteOutcome::Data(false) | RemoteOutcome::Empty => {
                    ActionReport::failure(kind, None)
                }
                RemoteOutcome::Failed { message } => ActionReport::failure(kind, message),
            },
        }
    }

    fn prepare_care(&mut self, store: &PetStore, kind: ActionKind) -> Result<PetId, ActionError> {
        Self::require_own(store)?;
        let id = store.pet_id().cloned().ok_or(ActionError::NoPet)?;
        self.require_idle(kind)?;
        self.busy.set(kind, true);
        Ok(id)
    }

    fn require_own(store: &PetStore) -> Result<(), ActionError> {
        if store.subject().allows_mutation() {
            Ok(())
        } else {
            Err(ActionError::NotOwnPet)
        }
    }

    fn require_idle(&self, kind: ActionKind) -> Result<(), ActionError> {
        if self.busy.is_busy(kind) {
            Err(ActionError::Busy(kind))
        } else {
            Ok(())
        }
    }
}

/// Send `request` and fold the reply
pub async fn perform<B>(backend: &B, request: ActionRequest) -> ActionOutcome
where
    B: PetBackend + ?Sized,
{
    match request {
        ActionRequest::Create { name, avatar_url } => ActionOutcome::Created(
            RemoteOutcome::from_result("create_pet", backend.create_pet(&name, &avatar_url).await),
        ),
        ActionRequest::Feed { id } => ActionOutcome::Fed(RemoteOutcome::from_result(
            "feed_pet",
            backend.feed_pet(&id).await,
        )),
        ActionRequest::Pat { id } => ActionOutcome::Patted(RemoteOutcome::from_result(
            "pat_pet",
            backend.pat_pet(&id).await,
        )),
        ActionRequest::Rename { id, name } => {
            let outcome =
                RemoteOutcome::from_result("rename_pet", backend.rename_pet(&id, &name).await);
            ActionOutcome::Renamed { name, outcome }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subject::ViewSubject;
    use pretty_assertions::assert_eq;

    fn store_with(pet: PetSnapshot) -> PetStore {
        let mut store = PetStore::new();
        store.replace(pet);
        store
    }

    fn hungry_pet() -> PetSnapshot {
        PetSnapshot {
            hunger: 40,
            mood: 30,
            level: 2,
            exp: 15,
            ..PetSnapshot::new("p1", "Bubbles")
        }
    }

    #[test]
    fn test_create_rejects_empty_name_without_raising_busy() {
        let mut dispatcher = ActionDispatcher::new();
        let result =
            dispatcher.prepare_create(&PetStore::new(), &NameValidator::default(), "  ", "a.png");

        assert_eq!(
            result,
            Err(ActionError::Validation(ValidationError::EmptyName))
        );
        assert!(!dispatcher.busy().create);
    }

    #[test]
    fn test_create_trims_name() {
        let mut dispatcher = ActionDispatcher::new();
        let request = dispatcher
            .prepare_create(&PetStore::new(), &NameValidator::default(), " Bubbles ", "a.png")
            .unwrap();

        assert_eq!(
            request,
            ActionRequest::Create {
                name: "Bubbles".to_string(),
                avatar_url: "a.png".to_string(),
            }
        );
        assert!(dispatcher.busy().create);
    }

    #[test]
    fn test_create_refused_when_pet_exists() {
        let mut dispatcher = ActionDispatcher::new();
        let store = store_with(hungry_pet());
        let result = dispatcher.prepare_create(&store, &NameValidator::default(), "Fin", "a.png");
        assert_eq!(result, Err(ActionError::PetAlreadyExists));
    }

    #[test]
    fn test_mutations_refused_for_other_subject() {
        let mut store = PetStore::new();
        store.reset(ViewSubject::other("42", None));
        store.replace(hungry_pet());

        let mut dispatcher = ActionDispatcher::new();
        assert_eq!(dispatcher.prepare_feed(&store), Err(ActionError::NotOwnPet));
        assert_eq!(dispatcher.prepare_pat(&store), Err(ActionError::NotOwnPet));
        assert_eq!(
            dispatcher.prepare_rename(&store, &NameValidator::default(), "Fin"),
            Err(ActionError::NotOwnPet)
        );
        assert!(!dispatcher.busy().any());
    }

    #[test]
    fn test_feed_is_not_reentrant_but_pat_is_independent() {
        let store = store_with(hungry_pet());
        let mut dispatcher = ActionDispatcher::new();

        assert!(dispatcher.prepare_feed(&store).is_ok());
        assert_eq!(
            dispatcher.prepare_feed(&store),
            Err(ActionError::Busy(ActionKind::Feed))
        );
        assert!(dispatcher.prepare_pat(&store).is_ok());
        assert!(dispatcher.busy().feed);
        assert!(dispatcher.busy().pat);
    }

    #[test]
    fn test_feed_needs_pet_id() {
        let mut pet = hungry_pet();
        pet.id = None;
        let store = store_with(pet);
        let mut dispatcher = ActionDispatcher::new();
        assert_eq!(dispatcher.prepare_feed(&store), Err(ActionError::NoPet));
    }

    #[test]
    fn test_feed_success_replaces_snapshot() {
        let mut store = store_with(hungry_pet());
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.prepare_feed(&store).unwrap();

        let fed = PetSnapshot {
            hunger: 60,
            mood: 35,
            ..hungry_pet()
        };
        let report = dispatcher.apply(ActionOutcome::Fed(RemoteOutcome::Data(fed.clone())), &mut store);

        assert!(report.applied);
        assert_eq!(report.level, NotifyLevel::Success);
        assert_eq!(store.snapshot(), Some(&fed));
        assert!(!dispatcher.busy().feed);
    }

    #[test]
    fn test_feed_failure_keeps_store_and_uses_server_message() {
        let mut store = store_with(hungry_pet());
        let before = store.clone();
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.prepare_feed(&store).unwrap();

        let report = dispatcher.apply(
            ActionOutcome::Fed(RemoteOutcome::Failed {
                message: Some("cooldown".to_string()),
            }),
            &mut store,
        );

        assert!(!report.applied);
        assert_eq!(report.level, NotifyLevel::Error);
        assert!(report.message.contains("cooldown"));
        assert_eq!(store, before);
        assert!(!dispatcher.busy().feed);
    }

    #[test]
    fn test_pat_failure_without_message_uses_generic_text() {
        let mut store = store_with(hungry_pet());
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.prepare_pat(&store).unwrap();

        let report = dispatcher.apply(
            ActionOutcome::Patted(RemoteOutcome::Failed { message: None }),
            &mut store,
        );
        assert_eq!(report.message, ActionKind::Pat.failure_text());
    }

    #[test]
    fn test_success_without_snapshot_counts_as_failure() {
        let mut store = store_with(hungry_pet());
        let before = store.clone();
        let mut dispatcher = ActionDispatcher::new();
        dispatcher.prepare_feed(&store).unwrap();

        let report = dispatcher.apply(ActionOutcome::Fed(RemoteOutcome::Empty), &mut store);
        assert!(!report.applied);
        assert_eq!(store, before);
    }

    #[test]
    fn test_rename_success_only_touches_name() {
        let mut store = store_with(hungry_pet());
        let mut dispatcher = ActionDispatcher::new();
        let request = dispatcher
            .prepare_rename(&store, &NameValidator::default(), "  Fin ")
            .unwrap();
        assert_eq!(
            request,
            ActionRequest::Rename {
                id: PetId::new("p1"),
                name: "Fin".to_string(),
            }
        );

        let report = dispatcher.apply(
            ActionOutcome::Renamed {
                name: "Fin".to_string(),
                outcome: RemoteOutcome::Data(true),
            },
            &mut store,
        );

        assert!(report.applied);
        let expected = PetSnapshot {
            name: "Fin".to_string(),
            ..hungry_pet()
        };
        assert_eq!(store.snapshot(), Some(&expected));
    }

    #[test]
    fn test_rename_false_is_failure() {
        let mut store = store_with(hungry_pet());
        let before = store.clone();
        let mut dispatcher = ActionDispatcher::new();
        dispatcher
            .prepare_rename(&store, &NameValidator::default(), "Fin")
            .unwrap();

        let report = dispatcher.apply(
            ActionOutcome::Renamed {
                name: "Fin".to_string(),
                outcome: RemoteOutcome::Data(false),
            },
            &mut store,
        );
        assert!(!report.applied);
        assert_eq!(report.message, "Failed to rename pet");
        assert_eq!(store, before);
    }
}
