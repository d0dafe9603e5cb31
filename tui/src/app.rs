//! Main Application
//!
//! The App struct is a thin host around the pet dialog:
//! - Event loop (keyboard, resize, frame tick)
//! - Key mapping from terminal keys to [`DialogEvent`]s
//! - DisplayState for toasts and the status line
//!
//! The dialog core decides what is shown; the App only forwards input,
//! drains completions and messages, and renders.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use pet_core::view::RenameView;
use pet_core::{
    DialogConfig, DialogEvent, DialogMessage, InputEdit, PetBackend, PetDialog, Presentation,
    ViewSubject,
};

use crate::display::DisplayState;
use crate::panels::PanelState;
use crate::theme::{notify_style, DIM_GRAY};
use crate::widgets::PetDialogWidget;

/// Capacity of the dialog-to-surface channel
const MESSAGE_CAPACITY: usize = 64;

/// What a key press amounts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward to the dialog
    Dialog(DialogEvent),
    /// Open the dialog for the host's subject
    OpenDialog,
    /// Next panel tab
    NextTab,
    /// Previous panel tab
    PrevTab,
    /// Show or hide the rules
    ToggleRules,
    /// Leave the app
    Quit,
    /// Nothing
    Ignore,
}

/// Map a key press to an action for the presentation on screen
#[must_use]
pub fn map_key(view: &Presentation, key: KeyEvent) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    let typed = |c: char| {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            None
        } else {
            Some(c)
        }
    };

    match view {
        Presentation::Hidden => match key.code {
            KeyCode::Enter | KeyCode::Char('o') => KeyAction::OpenDialog,
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        },

        Presentation::CreationForm { .. } => match key.code {
            KeyCode::Esc => KeyAction::Dialog(DialogEvent::Close),
            KeyCode::Enter => KeyAction::Dialog(DialogEvent::SubmitCreate),
            KeyCode::Backspace => KeyAction::Dialog(DialogEvent::EditCreateName(InputEdit::Backspace)),
            KeyCode::Char(c) => match typed(c) {
                Some(c) => KeyAction::Dialog(DialogEvent::EditCreateName(InputEdit::Insert(c))),
                None => KeyAction::Ignore,
            },
            _ => KeyAction::Ignore,
        },

        Presentation::Loading { .. } | Presentation::OtherEmpty { .. } => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Dialog(DialogEvent::Close),
            _ => KeyAction::Ignore,
        },

        Presentation::Detail(detail) => {
            let editing = matches!(
                detail.controls.as_ref().map(|c| &c.rename),
                Some(RenameView::Editing { .. })
            );

            if editing {
                return match key.code {
                    KeyCode::Esc => KeyAction::Dialog(DialogEvent::CancelRename),
                    KeyCode::Enter => KeyAction::Dialog(DialogEvent::ConfirmRename),
                    KeyCode::Backspace => {
                        KeyAction::Dialog(DialogEvent::EditRename(InputEdit::Backspace))
                    }
                    KeyCode::Char(c) => match typed(c) {
                        Some(c) => KeyAction::Dialog(DialogEvent::EditRename(InputEdit::Insert(c))),
                        None => KeyAction::Ignore,
                    },
                    _ => KeyAction::Ignore,
                };
            }

            let is_own = detail.controls.is_some();
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => KeyAction::Dialog(DialogEvent::Close),
                KeyCode::Tab | KeyCode::Right => KeyAction::NextTab,
                KeyCode::BackTab | KeyCode::Left => KeyAction::PrevTab,
                KeyCode::Char('?') => KeyAction::ToggleRules,
                KeyCode::Char('f') if is_own => KeyAction::Dialog(DialogEvent::Feed),
                KeyCode::Char('p') if is_own => KeyAction::Dialog(DialogEvent::Pat),
                KeyCode::Char('r') if is_own => KeyAction::Dialog(DialogEvent::BeginRename),
                _ => KeyAction::Ignore,
            }
        }
    }
}

/// Main application state
pub struct App<B: PetBackend + 'static> {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Subject the host passes to the dialog
    subject: ViewSubject,

    // === Dialog Integration ===
    /// The dialog core
    dialog: PetDialog<B>,
    /// Messages from the dialog
    messages: mpsc::Receiver<DialogMessage>,
    /// Display state derived from DialogMessages
    display: DisplayState,

    // === Panel State ===
    /// Selected tab and rules popover
    panels: PanelState,

    // === Misc State ===
    /// Last frame time (for toast expiry)
    last_frame: Instant,
}

impl<B: PetBackend + 'static> App<B> {
    /// Create a new App instance
    pub fn new(backend: B, config: DialogConfig, subject: ViewSubject) -> Self {
        let (tx, messages) = mpsc::channel(MESSAGE_CAPACITY);

        Self {
            running: true,
            subject,
            dialog: PetDialog::new(backend, config, tx),
            messages,
            display: DisplayState::new(),
            panels: PanelState::new(),
            last_frame: Instant::now(),
        }
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The dialog core
    pub fn dialog(&self) -> &PetDialog<B> {
        &self.dialog
    }

    /// Mutable access to the dialog core
    pub fn dialog_mut(&mut self) -> &mut PetDialog<B> {
        &mut self.dialog
    }

    /// Display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Panel state
    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    /// Open the dialog for the host's subject
    pub async fn open_dialog(&mut self) {
        self.panels.reset();
        let subject = self.subject.clone();
        self.dialog.set_visible(true, subject).await;
        self.process_dialog_messages();
    }

    /// Point the host at another subject
    pub async fn set_subject(&mut self, subject: ViewSubject) {
        if !subject.same_account(&self.subject) {
            self.panels.reset();
        }
        self.subject = subject.clone();
        self.dialog.set_subject(subject).await;
        self.process_dialog_messages();
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) {
        match map_key(&self.dialog.view(), key) {
            KeyAction::Dialog(event) => {
                let closing = event == DialogEvent::Close;
                if let Err(e) = self.dialog.handle_event(event).await {
                    tracing::debug!(error = %e, "Dialog refused event");
                }
                if closing {
                    self.panels.reset();
                }
            }
            KeyAction::OpenDialog => self.open_dialog().await,
            KeyAction::NextTab => self.panels.next(self.subject.is_own()),
            KeyAction::PrevTab => self.panels.prev(self.subject.is_own()),
            KeyAction::ToggleRules => self.panels.toggle_rules(),
            KeyAction::Quit => self.running = false,
            KeyAction::Ignore => {}
        }
        self.process_dialog_messages();
    }

    /// Apply completions, drain messages and advance timers
    pub async fn tick(&mut self) {
        self.dialog.poll_completions().await;
        self.process_dialog_messages();

        let now = Instant::now();
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.display.update(delta);
    }

    /// Process all pending messages from the dialog
    fn process_dialog_messages(&mut self) {
        while let Ok(msg) = self.messages.try_recv() {
            self.display.apply_message(msg);
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Target ~30 FPS; nothing here animates, the tick only drains completions
        let frame_duration = Duration::from_millis(33);

        let mut event_stream = EventStream::new();

        self.open_dialog().await;
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key).await;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!("Terminal event error: {}", e);
                        }
                        None => self.running = false,
                    }
                }

                _ = tokio::time::sleep(frame_duration) => {}
            }

            self.tick().await;
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Render the whole screen
    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 {
            return;
        }

        let hint = if self.dialog.is_open() {
            "[Esc] close the pet dialog"
        } else {
            "[Enter] open the pet dialog  [q] quit"
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(self.display.status_line()),
                Span::styled(format!("  {hint}"), Style::default().fg(DIM_GRAY)),
            ])),
            Rect { height: 1, ..area },
        );

        let view = self.dialog.view();
        frame.render_widget(PetDialogWidget::new(&view, &self.panels), area);

        if let Some(ref notification) = self.display.notification {
            let toast = Rect {
                y: area.bottom().saturating_sub(1),
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {} ", notification.message),
                    notify_style(notification.level),
                ))
                .alignment(ratatui::layout::Alignment::Center),
                toast,
            );
        }
    }
}
