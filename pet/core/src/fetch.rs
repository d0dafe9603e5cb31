//! Fetch Controller
//!
//! Every open of the dialog, and every subject change while it is open, is
//! an *activation*. Each activation takes a fresh token from a monotonically
//! increasing counter; a fetch completion may only write the store when the
//! token it was issued with is still the current one. Completions arrive in
//! whatever order the network delivers them, so the token comparison is what
//! keeps a slow, superseded fetch from overwriting a newer one.
//!
//! ```text
//!   open(A) ──► token 1 ──► fetch A ─────────────────────┐
//!   open(B) ──► token 2 ──► fetch B ──┐                   │
//!                                      ▼                   ▼
//!                          complete(2): applied   complete(1): discarded
//! ```

use crate::backend::{PetBackend, RemoteOutcome};
use crate::snapshot::PetSnapshot;
use crate::subject::ViewSubject;

/// Generic notice when the caller's own pet could not be loaded
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load pet";

/// Token identifying one activation of the fetch controller
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Activation(u64);

impl Activation {
    /// Raw counter value, for logs
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Tracks the current activation and whether its fetch is still outstanding
#[derive(Clone, Debug, Default)]
pub struct FetchController {
    current: Activation,
    in_flight: bool,
}

impl FetchController {
    /// Create a controller with no activation yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new activation, superseding any previous one
    pub fn activate(&mut self) -> Activation {
        self.current = Activation(self.current.0 + 1);
        self.in_flight = true;
        self.current
    }

    /// Supersede the current activation without starting a fetch
    ///
    /// Used on close: anything still outstanding becomes stale.
    pub fn cancel(&mut self) {
        self.current = Activation(self.current.0 + 1);
        self.in_flight = false;
    }

    /// The current activation
    #[must_use]
    pub fn current(&self) -> Activation {
        self.current
    }

    /// Whether `activation` is still the current one
    #[must_use]
    pub fn is_current(&self, activation: Activation) -> bool {
        self.current == activation
    }

    /// Whether the current activation's fetch has not resolved yet
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Record that `activation`'s fetch resolved
    ///
    /// Returns false, and changes nothing, when the activation is stale.
    pub fn complete(&mut self, activation: Activation) -> bool {
        if !self.is_current(activation) {
            return false;
        }
        self.in_flight = false;
        true
    }
}

/// Classified result of one fetch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A pet came back
    Present(PetSnapshot),
    /// The caller has no pet yet
    AbsentOwn,
    /// The other account has no pet, or the lookup failed
    AbsentOther,
    /// The caller's own pet could not be loaded
    OwnFailed {
        /// Server message, when one was given
        message: Option<String>,
    },
}

impl FetchOutcome {
    /// Fold a remote outcome for `subject` into a fetch outcome
    ///
    /// For another account, "no data" and "failed" are the same thing to the
    /// viewer.
    #[must_use]
    pub fn classify(subject: &ViewSubject, outcome: RemoteOutcome<PetSnapshot>) -> Self {
        match (subject.is_own(), outcome) {
            (_, RemoteOutcome::Data(pet)) => Self::Present(pet),
            (true, RemoteOutcome::Empty) => Self::AbsentOwn,
            (true, RemoteOutcome::Failed { message }) => Self::OwnFailed { message },
            (false, RemoteOutcome::Empty | RemoteOutcome::Failed { .. }) => Self::AbsentOther,
        }
    }
}

/// Issue the one fetch that belongs to `subject` and classify its result
pub async fn fetch_for<B>(backend: &B, subject: &ViewSubject) -> FetchOutcome
where
    B: PetBackend + ?Sized,
{
    let outcome = match subject {
        ViewSubject::Own => RemoteOutcome::from_result("get_own_pet", backend.get_own_pet().await),
        ViewSubject::Other { id, .. } => RemoteOutcome::from_result(
            "get_other_pet",
            backend.get_other_pet(id).await,
        ),
    };
    FetchOutcome::classify(subject, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_activation_supersedes() {
        let mut fetch = FetchController::new();
        let first = fetch.activate();
        let second = fetch.activate();

        assert!(second > first);
        assert!(fetch.is_loading());
        assert!(!fetch.complete(first));
        assert!(fetch.is_loading());
        assert!(fetch.complete(second));
        assert!(!fetch.is_loading());
    }

    #[test]
    fn test_cancel_makes_outstanding_stale() {
        let mut fetch = FetchController::new();
        let activation = fetch.activate();
        fetch.cancel();

        assert!(!fetch.is_loading());
        assert!(!fetch.is_current(activation));
        assert!(!fetch.complete(activation));
    }

    #[test]
    fn test_classify_own() {
        let own = ViewSubject::Own;
        let pet = PetSnapshot::new("p1", "Bubbles");

        assert_eq!(
            FetchOutcome::classify(&own, RemoteOutcome::Data(pet.clone())),
            FetchOutcome::Present(pet)
        );
        assert_eq!(
            FetchOutcome::classify(&own, RemoteOutcome::Empty),
            FetchOutcome::AbsentOwn
        );
        assert_eq!(
            FetchOutcome::classify(
                &own,
                RemoteOutcome::Failed {
                    message: Some("timeout".to_string())
                }
            ),
            FetchOutcome::OwnFailed {
                message: Some("timeout".to_string())
            }
        );
    }

    #[test]
    fn test_classify_other_collapses_absence_and_failure() {
        let other = ViewSubject::other("42", Some("Alice".to_string()));

        assert_eq!(
            FetchOutcome::classify(&other, RemoteOutcome::Empty),
            FetchOutcome::AbsentOther
        );
        assert_eq!(
            FetchOutcome::classify(&other, RemoteOutcome::Failed { message: None }),
            FetchOutcome::AbsentOther
        );
    }
}
