//! Pet Core - Headless State for the Moyu Pet Dialog
//!
//! This crate holds everything the pet dialog decides: which presentation to
//! show, when the displayed snapshot may be written, and how the mutating
//! actions are guarded. It has no rendering code; a surface drives it with
//! [`DialogEvent`]s and renders whatever [`PetDialog::view`] returns.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Host Surface                          │
//! │            (TUI, tests, anything that can render)            │
//! │                            │                                 │
//! │              DialogEvent (up)   DialogMessage (down)         │
//! └────────────────────────────┼─────────────────────────────────┘
//!                              │
//! ┌────────────────────────────┼─────────────────────────────────┐
//! │                         PET CORE                             │
//! │  ┌─────────────────────────┴──────────────────────────────┐  │
//! │  │                       PetDialog                        │  │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────────┐  │  │
//! │  │  │  Fetch   │ │  Action  │ │  Rename  │ │   View    │  │  │
//! │  │  │Controller│ │Dispatcher│ │ Sub-mode │ │ Selector  │  │  │
//! │  │  └────┬─────┘ └────┬─────┘ └──────────┘ └───────────┘  │  │
//! │  │       └──────┬─────┘                                   │  │
//! │  │          PetStore                                      │  │
//! │  └──────────────┬─────────────────────────────────────────┘  │
//! │                 │                                            │
//! │            PetBackend (HTTP)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`PetDialog`]: Owns the store and applies completions
//! - [`PetStore`]: The displayed snapshot and its subject
//! - [`FetchController`]: Activation tokens for last-activation-wins fetches
//! - [`ActionDispatcher`]: Busy flags and preconditions for mutations
//! - [`RenameState`]: The idle/editing rename sub-mode
//! - [`select_view`]: Pure state to [`Presentation`] derivation
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod backend;
pub mod config;
pub mod dialog;
pub mod events;
pub mod fetch;
pub mod messages;
pub mod rename;
pub mod snapshot;
pub mod store;
pub mod subject;
pub mod validation;
pub mod view;

pub use actions::{ActionDispatcher, ActionError, ActionKind, BusyFlags};
pub use backend::{ApiResponse, HttpPetBackend, PetBackend, RemoteOutcome};
pub use config::{load_config, ConfigError, ConfigOverrides, PetConfig};
pub use dialog::{DialogConfig, PetDialog};
pub use events::DialogEvent;
pub use fetch::{Activation, FetchController, FetchOutcome};
pub use messages::{DialogMessage, NotifyLevel};
pub use rename::{RenameMode, RenameState};
pub use snapshot::{PetId, PetSnapshot};
pub use store::PetStore;
pub use subject::ViewSubject;
pub use validation::{InputEdit, NameInput, NameValidator, ValidationError};
pub use view::{select_view, DialogMode, Presentation, PresentationKind};
