//! Moyu Pet TUI - Terminal host for the pet dialog
//!
//! This crate hosts the headless dialog from `pet-core` in a full-screen
//! terminal UI. The dialog decides what is shown; this crate maps keys to
//! dialog events and draws the presentation.
//!
//! # Architecture
//!
//! - **App**: Event loop, key mapping, message draining
//! - **Display**: Toasts and status line derived from dialog messages
//! - **Panels**: Static tabs and the rules popover
//! - **Widgets**: The dialog modal and wrapped text blocks

pub mod app;
pub mod display;
pub mod panels;
pub mod theme;
pub mod widgets;

pub use app::{map_key, App, KeyAction};
