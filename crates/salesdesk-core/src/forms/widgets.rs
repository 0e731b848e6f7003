//! Form-state widgets.
//!
//! These are plain records standing in for input controls. A host (the
//! terminal UI, a test) copies user input into them and reads them back;
//! the controllers only ever see these values.

use std::fmt;

use chrono::NaiveDate;
use tracing::warn;

use super::utils::{DEFAULT_DATE_FORMAT, is_valid_date_format};

/// Input restriction applied to a [`TextField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Digits only.
    Integer,
    /// Digits with at most one `.` separator.
    Decimal,
    /// At most this many characters.
    MaxLength(usize),
}

impl Constraint {
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            Self::Integer => text.chars().all(|c| c.is_ascii_digit()),
            Self::Decimal => {
                let mut parts = text.splitn(2, '.');
                let whole = parts.next().unwrap_or_default();
                let fraction = parts.next().unwrap_or_default();
                whole.chars().all(|c| c.is_ascii_digit())
                    && fraction.chars().all(|c| c.is_ascii_digit())
            }
            Self::MaxLength(max) => text.chars().count() <= *max,
        }
    }
}

/// Single-line text input.
///
/// Text that violates a constraint is rejected and the previous text is
/// kept, the same way a constrained input control reverts an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    text: String,
    constraints: Vec<Constraint>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Replace the text. Returns `false` (and keeps the old text) when a
    /// constraint rejects the new value.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.constraints.iter().all(|c| c.accepts(&text)) {
            self.text = text;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

/// Calendar date input with a display pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    value: Option<NaiveDate>,
    format: String,
}

impl DatePicker {
    /// `format` is a chrono pattern such as `%d/%m/%Y`. A pattern that
    /// cannot render and read back a date is replaced by
    /// [`DEFAULT_DATE_FORMAT`].
    pub fn new(format: impl Into<String>) -> Self {
        let mut format = format.into();
        if !is_valid_date_format(&format) {
            warn!(%format, fallback = DEFAULT_DATE_FORMAT, "Unusable date pattern");
            format = DEFAULT_DATE_FORMAT.to_owned();
        }
        Self {
            value: None,
            format,
        }
    }

    pub fn value(&self) -> Option<NaiveDate> {
        self.value
    }

    pub fn set_value(&mut self, value: Option<NaiveDate>) {
        self.value = value;
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// The value rendered with the display pattern, or `""`.
    pub fn text(&self) -> String {
        self.value
            .map(|d| d.format(&self.format).to_string())
            .unwrap_or_default()
    }

    /// Parse typed text. Blank text clears the value; text that does not
    /// match the pattern leaves the value untouched.
    pub fn set_text(&mut self, text: &str) -> Result<(), chrono::ParseError> {
        let text = text.trim();
        if text.is_empty() {
            self.value = None;
            return Ok(());
        }
        self.value = Some(NaiveDate::parse_from_str(text, &self.format)?);
        Ok(())
    }
}

impl Default for DatePicker {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

/// Selection list.
///
/// `value` need not be one of `items`; editing an entity whose reference is
/// no longer listed still shows that reference.
#[derive(Clone)]
pub struct ComboBox<T> {
    items: Vec<T>,
    value: Option<T>,
    cell_renderer: fn(&T) -> String,
}

impl<T: Clone> ComboBox<T> {
    /// `cell_renderer` produces the text shown for each entry.
    pub fn new(cell_renderer: fn(&T) -> String) -> Self {
        Self {
            items: Vec::new(),
            value: None,
            cell_renderer,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Replace the whole list. The current value is kept.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
    }

    /// Select the first item, or nothing when the list is empty.
    pub fn select_first(&mut self) {
        self.value = self.items.first().cloned();
    }

    /// Select the item at `index`. Out-of-range indexes clear the selection.
    pub fn select_index(&mut self, index: usize) {
        self.value = self.items.get(index).cloned();
    }

    /// Text for one cell; an empty cell renders as blank.
    pub fn cell_text(&self, item: Option<&T>) -> String {
        item.map(self.cell_renderer).unwrap_or_default()
    }

    /// Text of the collapsed control (the current value).
    pub fn button_text(&self) -> String {
        self.cell_text(self.value.as_ref())
    }
}

impl<T: fmt::Debug> fmt::Debug for ComboBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComboBox")
            .field("items", &self.items)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// Message shown next to an input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLabel {
    text: String,
}

impl ErrorLabel {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
