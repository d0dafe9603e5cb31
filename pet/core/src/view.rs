//! View Selector
//!
//! Derives exactly one [`Presentation`] from the dialog's state. First match
//! wins:
//!
//! | Condition                     | Presentation    |
//! |-------------------------------|-----------------|
//! | dialog closed                 | `Hidden`        |
//! | mode is `CreationForm`        | `CreationForm`  |
//! | fetch in flight               | `Loading`       |
//! | mode is `OtherEmpty`          | `OtherEmpty`    |
//! | otherwise                     | `Detail`        |
//!
//! Action busy flags never select a presentation; they only mark the control
//! they belong to.

use crate::actions::BusyFlags;
use crate::rename::RenameState;
use crate::snapshot::PetSnapshot;
use crate::subject::ViewSubject;
use crate::validation::NameInput;

/// Dialog sub-mode set by fetch outcomes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogMode {
    /// Show the pet (or an empty detail after a failed own fetch)
    #[default]
    Detail,
    /// The caller has no pet yet
    CreationForm,
    /// The other account has no pet
    OtherEmpty,
}

/// Everything the selector looks at
#[derive(Clone, Copy, Debug)]
pub struct ViewInputs<'a> {
    /// Dialog visible?
    pub open: bool,
    /// Current activation's fetch outstanding?
    pub loading: bool,
    /// Sub-mode
    pub mode: DialogMode,
    /// Whose pet
    pub subject: &'a ViewSubject,
    /// Store contents
    pub snapshot: Option<&'a PetSnapshot>,
    /// Rename sub-mode
    pub rename: &'a RenameState,
    /// Action busy flags
    pub busy: BusyFlags,
    /// Creation form buffer
    pub create_input: &'a NameInput,
}

/// Which presentation, without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    /// Nothing shown
    Hidden,
    /// Creation form
    CreationForm,
    /// Loading placeholder
    Loading,
    /// "This user has no pet"
    OtherEmpty,
    /// Own pet with controls
    OwnDetail,
    /// Other account's pet, read-only
    OtherDetail,
}

/// The rename affordance inside the detail presentation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameView {
    /// Name plus edit affordance
    Idle {
        /// Whether the affordance is enabled
        can_edit: bool,
    },
    /// Input plus confirm/cancel
    Editing {
        /// Pending text
        input: String,
        /// Counter, e.g. `3/10`
        counter: String,
        /// Rename in flight
        saving: bool,
    },
}

/// Controls shown only for the caller's own pet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerControls {
    /// Feed in flight
    pub feed_busy: bool,
    /// Pat in flight
    pub pat_busy: bool,
    /// A pet with a known id is present
    pub can_act: bool,
    /// Rename affordance
    pub rename: RenameView,
}

impl OwnerControls {
    /// Feed button enabled?
    #[must_use]
    pub fn feed_enabled(&self) -> bool {
        self.can_act && !self.feed_busy
    }

    /// Pat button enabled?
    #[must_use]
    pub fn pat_enabled(&self) -> bool {
        self.can_act && !self.pat_busy
    }
}

/// Detail presentation payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailView {
    /// Dialog title
    pub title: String,
    /// The pet, absent after a failed own fetch
    pub pet: Option<PetSnapshot>,
    /// Present only for the caller's own pet
    pub controls: Option<OwnerControls>,
}

/// What the dialog shows
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Presentation {
    /// Dialog closed
    Hidden,
    /// Creation form
    CreationForm {
        /// Pending name
        name_input: String,
        /// Counter, e.g. `3/10`
        counter: String,
        /// Create in flight
        creating: bool,
    },
    /// Loading placeholder
    Loading {
        /// Dialog title
        title: String,
    },
    /// "This user has no pet"
    OtherEmpty {
        /// Dialog title
        title: String,
    },
    /// Pet detail
    Detail(DetailView),
}

impl Presentation {
    /// Which presentation this is
    #[must_use]
    pub fn kind(&self) -> PresentationKind {
        match self {
            Self::Hidden => PresentationKind::Hidden,
            Self::CreationForm { .. } => PresentationKind::CreationForm,
            Self::Loading { .. } => PresentationKind::Loading,
            Self::OtherEmpty { .. } => PresentationKind::OtherEmpty,
            Self::Detail(DetailView {
                controls: Some(_), ..
            }) => PresentationKind::OwnDetail,
            Self::Detail(_) => PresentationKind::OtherDetail,
        }
    }

    /// Owner controls, when shown
    #[must_use]
    pub fn controls(&self) -> Option<&OwnerControls> {
        match self {
            Self::Detail(detail) => detail.controls.as_ref(),
            _ => None,
        }
    }
}

/// Pick the presentation for `inputs`
#[must_use]
pub fn select_view(inputs: &ViewInputs<'_>) -> Presentation {
    if !inputs.open {
        return Presentation::Hidden;
    }

    if inputs.mode == DialogMode::CreationForm {
        return Presentation::CreationForm {
            name_input: inputs.create_input.as_str().to_string(),
            counter: inputs.create_input.counter(),
            creating: inputs.busy.create,
        };
    }

    let title = inputs.subject.title();

    if inputs.loading {
        return Presentation::Loading { title };
    }

    if inputs.mode == DialogMode::OtherEmpty {
        return Presentation::OtherEmpty { title };
    }

    let controls = inputs.subject.allows_mutation().then(|| owner_controls(inputs));

    Presentation::Detail(DetailView {
        title,
        pet: inputs.snapshot.cloned(),
        controls,
    })
}

fn owner_controls(inputs: &ViewInputs<'_>) -> OwnerControls {
    let has_pet = inputs.snapshot.is_some();
    let can_act = inputs.snapshot.and_then(|pet| pet.id.as_ref()).is_some();

    let rename = if inputs.rename.is_editing() {
        RenameView::Editing {
            input: inputs.rename.input().as_str().to_string(),
            counter: inputs.rename.input().counter(),
            saving: inputs.busy.rename,
        }
    } else {
        RenameView::Idle { can_edit: has_pet }
    };

    OwnerControls {
        feed_busy: inputs.busy.feed,
        pat_busy: inputs.busy.pat,
        can_act,
        rename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixture {
        subject: ViewSubject,
        snapshot: Option<PetSnapshot>,
        rename: RenameState,
        create_input: NameInput,
    }

    impl Fixture {
        fn own(snapshot: Option<PetSnapshot>) -> Self {
            Self {
                subject: ViewSubject::Own,
                snapshot,
                rename: RenameState::new(10),
                create_input: NameInput::new(10),
            }
        }

        fn other(snapshot: Option<PetSnapshot>) -> Self {
            Self {
                subject: ViewSubject::other("42", Some("Alice".to_string())),
                ..Self::own(snapshot)
            }
        }

        fn inputs(&self, open: bool, loading: bool, mode: DialogMode) -> ViewInputs<'_> {
            ViewInputs {
                open,
                loading,
                mode,
                subject: &self.subject,
                snapshot: self.snapshot.as_ref(),
                rename: &self.rename,
                busy: BusyFlags::default(),
                create_input: &self.create_input,
            }
        }
    }

    #[test]
    fn test_closed_is_hidden() {
        let f = Fixture::own(None);
        let view = select_view(&f.inputs(false, true, DialogMode::CreationForm));
        assert_eq!(view, Presentation::Hidden);
    }

    #[test]
    fn test_creation_form_beats_loading() {
        let f = Fixture::own(None);
        let view = select_view(&f.inputs(true, true, DialogMode::CreationForm));
        assert_eq!(view.kind(), PresentationKind::CreationForm);
    }

    #[test]
    fn test_loading_beats_other_empty() {
        let f = Fixture::other(None);
        let view = select_view(&f.inputs(true, true, DialogMode::OtherEmpty));
        assert_eq!(
            view,
            Presentation::Loading {
                title: "Alice's Pet".to_string()
            }
        );
    }

    #[test]
    fn test_other_empty_has_no_controls() {
        let f = Fixture::other(None);
        let view = select_view(&f.inputs(true, false, DialogMode::OtherEmpty));
        assert_eq!(view.kind(), PresentationKind::OtherEmpty);
        assert!(view.controls().is_none());
    }

    #[test]
    fn test_other_detail_is_read_only() {
        let f = Fixture::other(Some(PetSnapshot::new("p9", "Nemo")));
        let view = select_view(&f.inputs(true, false, DialogMode::Detail));
        assert_eq!(view.kind(), PresentationKind::OtherDetail);
        assert!(view.controls().is_none());
    }

    #[test]
    fn test_own_detail_controls_follow_busy_flags() {
        let f = Fixture::own(Some(PetSnapshot::new("p1", "Bubbles")));
        let mut inputs = f.inputs(true, false, DialogMode::Detail);
        inputs.busy.feed = true;

        let view = select_view(&inputs);
        assert_eq!(view.kind(), PresentationKind::OwnDetail);

        let controls = view.controls().unwrap();
        assert!(!controls.feed_enabled());
        assert!(controls.pat_enabled());
        assert_eq!(controls.rename, RenameView::Idle { can_edit: true });
    }

    #[test]
    fn test_action_busy_never_shows_loading() {
        let f = Fixture::own(Some(PetSnapshot::new("p1", "Bubbles")));
        let mut inputs = f.inputs(true, false, DialogMode::Detail);
        inputs.busy = BusyFlags {
            create: false,
            feed: true,
            pat: true,
            rename: true,
        };
        assert_eq!(select_view(&inputs).kind(), PresentationKind::OwnDetail);
    }

    #[test]
    fn test_own_detail_without_pet_disables_actions() {
        let f = Fixture::own(None);
        let view = select_view(&f.inputs(true, false, DialogMode::Detail));
        let controls = view.controls().unwrap();
        assert!(!controls.feed_enabled());
        assert_eq!(controls.rename, RenameView::Idle { can_edit: false });
    }
}
