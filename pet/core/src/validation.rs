//! Name Validation
//!
//! Client-side checks that run before any request leaves the dialog, plus the
//! bounded text buffer used by the creation form and the rename input.
//!
//! Lengths are counted in characters, not bytes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on pet names
pub const DEFAULT_NAME_MAX_LEN: usize = 10;

/// A name rejected before any request was made
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing left after trimming
    #[error("Please enter a pet name")]
    EmptyName,

    /// Longer than the configured bound
    #[error("Pet names can be at most {max} characters")]
    NameTooLong {
        /// The bound that was exceeded
        max: usize,
    },
}

/// Validates submitted pet names
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameValidator {
    max_len: usize,
}

impl Default for NameValidator {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_MAX_LEN)
    }
}

impl NameValidator {
    /// Create a validator with the given character bound
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// The character bound
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Validate a raw name, returning it trimmed
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyName`] when only whitespace remains,
    /// [`ValidationError::NameTooLong`] when the trimmed name exceeds the bound.
    pub fn validate(&self, raw: &str) -> Result<String, ValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if name.chars().count() > self.max_len {
            return Err(ValidationError::NameTooLong { max: self.max_len });
        }
        Ok(name.to_string())
    }
}

/// An edit applied to a [`NameInput`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEdit {
    /// Type one character
    Insert(char),
    /// Delete the last character
    Backspace,
    /// Empty the buffer
    Clear,
    /// Replace the whole buffer (paste); truncated to the bound
    Set(String),
}

/// Text buffer that never holds more than its bound
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameInput {
    value: String,
    max_len: usize,
}

impl NameInput {
    /// Create an empty buffer
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            value: String::new(),
            max_len,
        }
    }

    /// Current contents
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Number of characters held
    #[must_use]
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// True when nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Character bound
    #[must_use]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Counter text, e.g. `3/10`
    #[must_use]
    pub fn counter(&self) -> String {
        format!("{}/{}", self.len(), self.max_len)
    }

    /// Apply an edit; returns false when the edit was refused or changed nothing
    pub fn apply(&mut self, edit: InputEdit) -> bool {
        match edit {
            InputEdit::Insert(c) => self.push(c),
            InputEdit::Backspace => self.value.pop().is_some(),
            InputEdit::Clear => {
                let changed = !self.value.is_empty();
                self.value.clear();
                changed
            }
            InputEdit::Set(text) => {
                let clamped: String = text
                    .chars()
                    .filter(|c| !c.is_control())
                    .take(self.max_len)
                    .collect();
                let changed = clamped != self.value;
                self.value = clamped;
                changed
            }
        }
    }

    /// Append a character if there is room
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= self.max_len {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Empty the buffer
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_trims() {
        let validator = NameValidator::default();
        assert_eq!(validator.validate("  Bubbles "), Ok("Bubbles".to_string()));
    }

    #[test]
    fn test_validate_empty() {
        let validator = NameValidator::default();
        assert_eq!(validator.validate(""), Err(ValidationError::EmptyName));
        assert_eq!(validator.validate("   "), Err(ValidationError::EmptyName));
    }

    #[test]
    fn test_validate_too_long() {
        let validator = NameValidator::default();
        assert_eq!(
            validator.validate("VeryLongNameExceedingLimit"),
            Err(ValidationError::NameTooLong { max: 10 })
        );
    }

    #[test]
    fn test_validate_counts_chars_not_bytes() {
        let validator = NameValidator::new(4);
        assert_eq!(validator.validate("小鱼小鱼"), Ok("小鱼小鱼".to_string()));
    }

    #[test]
    fn test_input_refuses_past_bound() {
        let mut input = NameInput::new(3);
        assert!(input.push('a'));
        assert!(input.push('b'));
        assert!(input.push('c'));
        assert!(!input.push('d'));
        assert_eq!(input.as_str(), "abc");
        assert_eq!(input.counter(), "3/3");
    }

    #[test]
    fn test_input_paste_truncates() {
        let mut input = NameInput::new(10);
        assert!(input.apply(InputEdit::Set("VeryLongNameExceedingLimit".to_string())));
        assert_eq!(input.as_str(), "VeryLongNa");
        assert_eq!(input.len(), 10);
    }

    #[test]
    fn test_input_ignores_control_chars() {
        let mut input = NameInput::new(10);
        assert!(!input.apply(InputEdit::Insert('\n')));
        assert!(input.is_empty());
    }

    #[test]
    fn test_input_backspace_and_clear() {
        let mut input = NameInput::new(10);
        input.apply(InputEdit::Set("Fin".to_string()));
        assert!(input.apply(InputEdit::Backspace));
        assert_eq!(input.as_str(), "Fi");
        assert!(input.apply(InputEdit::Clear));
        assert!(!input.apply(InputEdit::Clear));
        assert!(!input.apply(InputEdit::Backspace));
    }
}
