//! Widgets
//!
//! - [`PetDialogWidget`]: the modal dialog for a `Presentation`
//! - [`TextBlock`]: wrapped, optionally centered text

mod pet_dialog;
mod text_block;

pub use pet_dialog::{
    centered_rect, PetDialogWidget, CREATE_TITLE, LOADING_TEXT, NO_PET_DATA_TEXT,
    OTHER_EMPTY_TEXT,
};
pub use text_block::TextBlock;
