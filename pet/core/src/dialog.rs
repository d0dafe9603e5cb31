//! The Pet Dialog
//!
//! [`PetDialog`] owns the store and every piece of state around it, and is
//! the only thing that writes to the store. Remote calls run on spawned tasks;
//! their results come back as completions tagged with the activation they were
//! issued under, and are applied on the caller's task by
//! [`PetDialog::poll_completions`] (or awaited with
//! [`PetDialog::next_completion`]).
//!
//! # Usage
//!
//! ```ignore
//! let (tx, mut rx) = mpsc::channel(64);
//! let mut dialog = PetDialog::new(backend, DialogConfig::default(), tx);
//!
//! dialog.handle_event(DialogEvent::Open { subject: ViewSubject::Own }).await?;
//!
//! loop {
//!     dialog.poll_completions().await;
//!     render(&dialog.view());
//!     while let Ok(msg) = rx.try_recv() {
//!         surface.apply(msg);
//!     }
//! }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::actions::{
    perform, ActionDispatcher, ActionError, ActionKind, ActionOutcome, ActionRequest, BusyFlags,
};
use crate::backend::PetBackend;
use crate::config::DEFAULT_AVATAR_URL;
use crate::events::DialogEvent;
use crate::fetch::{fetch_for, Activation, FetchController, FetchOutcome, LOAD_FAILED_MESSAGE};
use crate::messages::{DialogMessage, NotifyLevel};
use crate::rename::RenameState;
use crate::snapshot::PetSnapshot;
use crate::store::PetStore;
use crate::subject::ViewSubject;
use crate::validation::{InputEdit, NameInput, NameValidator, DEFAULT_NAME_MAX_LEN};
use crate::view::{select_view, DialogMode, Presentation, ViewInputs};

/// Settings the dialog core needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogConfig {
    /// Maximum pet name length in characters
    pub name_max_len: usize,
    /// Avatar reference sent with create
    pub default_avatar_url: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            name_max_len: DEFAULT_NAME_MAX_LEN,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

/// Result of a spawned remote call
#[derive(Debug)]
enum Completion {
    Fetch {
        activation: Activation,
        outcome: FetchOutcome,
    },
    Action {
        activation: Activation,
        outcome: ActionOutcome,
    },
}

/// Modal pet dialog
pub struct PetDialog<B: PetBackend + 'static> {
    backend: Arc<B>,
    config: DialogConfig,

    open: bool,
    store: PetStore,
    fetch: FetchController,
    mode: DialogMode,
    dispatcher: ActionDispatcher,
    rename: RenameState,
    create_input: NameInput,
    validator: NameValidator,

    /// Messages to the host surface
    tx: mpsc::Sender<DialogMessage>,

    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    /// Spawned calls whose completion has not been received yet
    pending: usize,
}

impl<B: PetBackend + 'static> PetDialog<B> {
    /// Create a closed dialog
    pub fn new(backend: B, config: DialogConfig, tx: mpsc::Sender<DialogMessage>) -> Self {
        Self::with_shared_backend(Arc::new(backend), config, tx)
    }

    /// Create a closed dialog over a backend shared with the host
    pub fn with_shared_backend(
        backend: Arc<B>,
        config: DialogConfig,
        tx: mpsc::Sender<DialogMessage>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let max_len = config.name_max_len;

        Self {
            backend,
            open: false,
            store: PetStore::new(),
            fetch: FetchController::new(),
            mode: DialogMode::default(),
            dispatcher: ActionDispatcher::new(),
            rename: RenameState::new(max_len),
            create_input: NameInput::new(max_len),
            validator: NameValidator::new(max_len),
            tx,
            completion_tx,
            completion_rx,
            pending: 0,
            config,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Is the dialog visible?
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The store
    #[must_use]
    pub fn store(&self) -> &PetStore {
        &self.store
    }

    /// The displayed snapshot, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<&PetSnapshot> {
        self.store.snapshot()
    }

    /// Whose pet
    #[must_use]
    pub fn subject(&self) -> &ViewSubject {
        self.store.subject()
    }

    /// Sub-mode set by the last fetch
    #[must_use]
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Is the current activation's fetch outstanding?
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.fetch.is_loading()
    }

    /// The current activation token
    #[must_use]
    pub fn activation(&self) -> Activation {
        self.fetch.current()
    }

    /// Action busy flags
    #[must_use]
    pub fn busy(&self) -> BusyFlags {
        self.dispatcher.busy()
    }

    /// Rename sub-mode
    #[must_use]
    pub fn rename(&self) -> &RenameState {
        &self.rename
    }

    /// Creation form buffer
    #[must_use]
    pub fn create_input(&self) -> &NameInput {
        &self.create_input
    }

    /// Settings in use
    #[must_use]
    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    /// The backend
    #[must_use]
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Spawned calls not yet received, stale ones included
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending
    }

    /// The presentation for the current state
    #[must_use]
    pub fn view(&self) -> Presentation {
        select_view(&ViewInputs {
            open: self.open,
            loading: self.fetch.is_loading(),
            mode: self.mode,
            subject: self.store.subject(),
            snapshot: self.store.snapshot(),
            rename: &self.rename,
            busy: self.dispatcher.busy(),
            create_input: &self.create_input,
        })
    }

    // =========================================================================
    // Host surface
    // =========================================================================

    /// Handle an event from the host surface
    ///
    /// # Errors
    ///
    /// Returns why an action was not started. Validation failures have
    /// already been shown as a warning notice; the other errors are silent.
    pub async fn handle_event(&mut self, event: DialogEvent) -> Result<(), ActionError> {
        tracing::debug!(event = ?event, "Dialog event");

        match event {
            DialogEvent::Open { subject } => {
                self.open(subject).await;
                Ok(())
            }
            DialogEvent::Close => {
                self.close().await;
                Ok(())
            }
            DialogEvent::ChangeSubject { subject } => {
                self.set_subject(subject).await;
                Ok(())
            }
            DialogEvent::EditCreateName(edit) => {
                self.edit_create_name(edit);
                Ok(())
            }
            DialogEvent::SubmitCreate => self.submit_create().await,
            DialogEvent::Feed => self.feed().await,
            DialogEvent::Pat => self.pat().await,
            DialogEvent::BeginRename => self.begin_rename(),
            DialogEvent::EditRename(edit) => {
                self.rename.edit(edit);
                Ok(())
            }
            DialogEvent::ConfirmRename => self.confirm_rename().await,
            DialogEvent::CancelRename => {
                self.rename.cancel();
                Ok(())
            }
        }
    }

    /// Show the dialog for `subject`
    ///
    /// Opening an already open dialog for the same account only refreshes the
    /// display name.
    pub async fn open(&mut self, subject: ViewSubject) {
        if self.open && self.store.subject().same_account(&subject) {
            self.store.relabel(subject);
            return;
        }
        self.open = true;
        self.activate(subject).await;
    }

    /// Hide the dialog and discard its state
    pub async fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.fetch.cancel();
        self.reset_local_state();
        self.store.clear();
        self.send(DialogMessage::SnapshotChanged { snapshot: None })
            .await;
        tracing::debug!(activation = self.fetch.current().value(), "Dialog closed");
    }

    /// Drive visibility from a host boolean
    pub async fn set_visible(&mut self, visible: bool, subject: ViewSubject) {
        if visible {
            self.open(subject).await;
        } else {
            self.close().await;
        }
    }

    /// Switch the viewed account
    ///
    /// While open this is a new activation; while closed it only records the
    /// subject for the next open.
    pub async fn set_subject(&mut self, subject: ViewSubject) {
        if self.store.subject().same_account(&subject) {
            self.store.relabel(subject);
            return;
        }
        if self.open {
            self.activate(subject).await;
        } else {
            self.store.reset(subject);
        }
    }

    // =========================================================================
    // Fetch controller
    // =========================================================================

    async fn activate(&mut self, subject: ViewSubject) {
        self.store.reset(subject.clone());
        self.reset_local_state();
        let activation = self.fetch.activate();

        tracing::info!(
            activation = activation.value(),
            subject = ?subject,
            backend = self.backend.name(),
            "Fetching pet"
        );

        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            let outcome = fetch_for(backend.as_ref(), &subject).await;
            if tx.send(Completion::Fetch { activation, outcome }).is_err() {
                tracing::debug!("Dialog dropped before fetch completed");
            }
        });

        self.send(DialogMessage::SnapshotChanged { snapshot: None })
            .await;
    }

    fn reset_local_state(&mut self) {
        self.mode = DialogMode::Detail;
        self.dispatcher.reset();
        self.rename.reset();
        self.create_input.clear();
    }

    async fn apply_fetch(&mut self, activation: Activation, outcome: FetchOutcome) {
        if !self.fetch.complete(activation) {
            tracing::debug!(
                stale = activation.value(),
                current = self.fetch.current().value(),
                "Discarding stale fetch completion"
            );
            return;
        }

        match outcome {
            FetchOutcome::Present(pet) => {
                tracing::debug!(name = %pet.name, "Pet loaded");
                self.mode = DialogMode::Detail;
                self.store.replace(pet);
                self.snapshot_changed().await;
            }
            FetchOutcome::AbsentOwn => {
                self.mode = DialogMode::CreationForm;
            }
            FetchOutcome::AbsentOther => {
                self.mode = DialogMode::OtherEmpty;
            }
            FetchOutcome::OwnFailed { message } => {
                self.mode = DialogMode::Detail;
                let text = message.unwrap_or_else(|| LOAD_FAILED_MESSAGE.to_string());
                self.notify(NotifyLevel::Error, &text).await;
            }
        }
    }

    // =========================================================================
    // Action dispatcher
    // =========================================================================

    fn edit_create_name(&mut self, edit: InputEdit) {
        if self.open && self.mode == DialogMode::CreationForm {
            self.create_input.apply(edit);
        }
    }

    async fn submit_create(&mut self) -> Result<(), ActionError> {
        self.require_open()?;
        let result = self.dispatcher.prepare_create(
            &self.store,
            &self.validator,
            self.create_input.as_str(),
            &self.config.default_avatar_url,
        );
        self.dispatch(result).await
    }

    async fn feed(&mut self) -> Result<(), ActionError> {
        self.require_open()?;
        let result = self.dispatcher.prepare_feed(&self.store);
        self.dispatch(result).await
    }

    async fn pat(&mut self) -> Result<(), ActionError> {
        self.require_open()?;
        let result = self.dispatcher.prepare_pat(&self.store);
        self.dispatch(result).await
    }

    fn begin_rename(&mut self) -> Result<(), ActionError> {
        self.require_open()?;
        self.rename.begin(&self.store).inspect_err(|e| {
            tracing::debug!(error = %e, "Rename not available");
        })
    }

    async fn confirm_rename(&mut self) -> Result<(), ActionError> {
        self.require_open()?;
        if !self.rename.is_editing() {
            return Ok(());
        }
        let result =
            self.dispatcher
                .prepare_rename(&self.store, &self.validator, self.rename.input().as_str());
        self.dispatch(result).await
    }

    async fn dispatch(
        &mut self,
        prepared: Result<ActionRequest, ActionError>,
    ) -> Result<(), ActionError> {
        let request = match prepared {
            Ok(request) => request,
            Err(ActionError::Validation(e)) => {
                self.notify(NotifyLevel::Warning, &e.to_string()).await;
                return Err(ActionError::Validation(e));
            }
            Err(e) => {
                tracing::debug!(error = %e, "Action not available");
                return Err(e);
            }
        };

        let kind = request.kind();
        let activation = self.fetch.current();
        tracing::info!(action = %kind, activation = activation.value(), "Dispatching action");

        let backend = Arc::clone(&self.backend);
        let tx = self.completion_tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            let outcome = perform(backend.as_ref(), request).await;
            if tx.send(Completion::Action { activation, outcome }).is_err() {
                tracing::debug!(action = %kind, "Dialog dropped before action completed");
            }
        });

        Ok(())
    }

    async fn apply_action(&mut self, activation: Activation, outcome: ActionOutcome) {
        if !self.fetch.is_current(activation) {
            tracing::debug!(
                action = %outcome.kind(),
                stale = activation.value(),
                "Discarding stale action completion"
            );
            return;
        }

        let sent_name = match outcome {
            ActionOutcome::Renamed { ref name, .. } => Some(name.clone()),
            _ => None,
        };

        let report = self.dispatcher.apply(outcome, &mut self.store);
        if report.applied {
            match report.kind {
                ActionKind::Create => {
                    self.mode = DialogMode::Detail;
                    self.create_input.clear();
                }
                // A newer edit started after this rename was sent stays open
                ActionKind::Rename => {
                    let superseded = self.rename.is_editing()
                        && sent_name.as_deref() != Some(self.rename.input().as_str().trim());
                    if !superseded {
                        self.rename.finish();
                    }
                }
                ActionKind::Feed | ActionKind::Pat => {}
            }
            self.snapshot_changed().await;
        }
        self.notify(report.level, &report.message).await;
    }

    fn require_open(&self) -> Result<(), ActionError> {
        if self.open {
            Ok(())
        } else {
            Err(ActionError::Closed)
        }
    }

    // =========================================================================
    // Completions
    // =========================================================================

    /// Apply every completion that has already arrived
    ///
    /// Call this regularly from the host loop. Returns true if anything was
    /// received.
    pub async fn poll_completions(&mut self) -> bool {
        let mut received = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            received.push(completion);
        }

        let activity = !received.is_empty();
        for completion in received {
            self.apply_completion(completion).await;
        }
        activity
    }

    /// Wait for the next completion and apply it
    ///
    /// Returns false without waiting when nothing is outstanding.
    pub async fn next_completion(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.completion_rx.recv().await {
            Some(completion) => {
                self.apply_completion(completion).await;
                true
            }
            None => false,
        }
    }

    /// Wait until every outstanding call has completed and been applied
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    async fn apply_completion(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);
        match completion {
            Completion::Fetch {
                activation,
                outcome,
            } => self.apply_fetch(activation, outcome).await,
            Completion::Action {
                activation,
                outcome,
            } => self.apply_action(activation, outcome).await,
        }
    }

    // =========================================================================
    // Messages
    // =========================================================================

    async fn snapshot_changed(&self) {
        self.send(DialogMessage::SnapshotChanged {
            snapshot: self.store.snapshot().cloned(),
        })
        .await;
    }

    async fn notify(&self, level: NotifyLevel, message: &str) {
        self.send(DialogMessage::Notify {
            level,
            message: message.to_string(),
        })
        .await;
    }

    async fn send(&self, msg: DialogMessage) {
        if let Err(e) = self.tx.send(msg).await {
            tracing::warn!("Failed to send message to surface: {}", e);
        }
    }
}
