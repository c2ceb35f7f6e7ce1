#![forbid(unsafe_code)]

//! Server-driven input prompts.
//!
//! A prompt is an HTML form fragment sent by the server. The client wraps it
//! with Submit (and optionally Back) buttons, keeps at most one prompt
//! active, and turns the user's answers into an [`OutboundAction`].
//!
//! [`OutboundAction`]: crate::protocol::OutboundAction

use core::fmt;

use crate::error::PromptError;
use crate::protocol::{InputValue, InputValues};

pub const WRAPPER_CLASS: &str = "simple-centered-wrap";
pub const PROMPT_CLASS: &str = "prompt-user";
pub const PROMPT_DISABLED_CLASS: &str = "prompt-user prompt-disabled";
/// Element id carried by the active prompt only.
pub const ACTIVE_PROMPT_ID: &str = "prompt-active";
pub const BUTTON_BOX_CLASS: &str = "prompt-button-metabox";
/// Attribute on prompt buttons naming the prompt they belong to.
pub const DATA_PROMPT_ID: &str = "data-prompt-id";
/// Attribute on prompt buttons naming what they do.
pub const DATA_PROMPT_ACTION: &str = "data-prompt-action";

/// Handle to one rendered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromptId(u64);

impl PromptId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptButton {
    Submit,
    Back,
}

impl PromptButton {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submit => "Submit",
            Self::Back => "Back",
        }
    }

    /// Value of the [`DATA_PROMPT_ACTION`] attribute.
    #[must_use]
    pub const fn action_name(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Back => "back",
        }
    }

    #[must_use]
    pub fn from_action_name(name: &str) -> Option<Self> {
        match name {
            "submit" => Some(Self::Submit),
            "back" => Some(Self::Back),
            _ => None,
        }
    }
}

/// Everything the frontend needs to render a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub id: PromptId,
    /// Server HTML placed inside the prompt body.
    pub html: String,
    /// Buttons in display order.
    pub buttons: Vec<PromptButton>,
}

impl PromptView {
    #[must_use]
    pub fn has_button(&self, button: PromptButton) -> bool {
        self.buttons.contains(&button)
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Checkbox,
    Text,
    TextArea,
    /// Any other `<input type=…>`; collected as its string value.
    Other(String),
}

impl FieldKind {
    /// Classify an `<input>` by its `type` property.
    #[must_use]
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "checkbox" => Self::Checkbox,
            "" | "text" => Self::Text,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Snapshot of one form control at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
}

impl FormField {
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            value: value.into(),
            checked: false,
        }
    }

    #[must_use]
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Checkbox,
            value: "on".to_owned(),
            checked,
        }
    }

    #[must_use]
    pub fn textarea(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::TextArea,
            value: value.into(),
            checked: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> InputValue {
        match self.kind {
            FieldKind::Checkbox => InputValue::Bool(self.checked),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Other(_) => {
                InputValue::Text(self.value.clone())
            }
        }
    }
}

/// Build the value map for `send-input`. Later duplicates win.
#[must_use]
pub fn collect_values<'a>(fields: impl IntoIterator<Item = &'a FormField>) -> InputValues {
    fields
        .into_iter()
        .map(|field| (field.name.clone(), field.value()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Result of opening a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opened {
    pub view: PromptView,
    /// Previously active prompt that must now be disabled.
    pub superseded: Option<PromptId>,
}

/// Owns the single active-prompt slot.
#[derive(Debug, Clone, Default)]
pub struct PromptTracker {
    active: Option<PromptId>,
    next_id: u64,
}

impl PromptTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn active(&self) -> Option<PromptId> {
        self.active
    }

    #[must_use]
    pub fn is_active(&self, id: PromptId) -> bool {
        self.active == Some(id)
    }

    pub fn open(&mut self, html: impl Into<String>, can_go_back: bool) -> Opened {
        self.next_id += 1;
        let id = PromptId::new(self.next_id);
        let superseded = self.active.replace(id);
        let mut buttons = vec![PromptButton::Submit];
        if can_go_back {
            buttons.push(PromptButton::Back);
        }
        Opened {
            view: PromptView {
                id,
                html: html.into(),
                buttons,
            },
            superseded,
        }
    }

    /// Fails unless `id` is the active prompt.
    pub fn check(&self, id: PromptId) -> Result<(), PromptError> {
        if self.is_active(id) {
            Ok(())
        } else if self.active.is_none() {
            Err(PromptError::NoActivePrompt)
        } else {
            Err(PromptError::NotActive { id })
        }
    }

    /// Release the active slot for an action on `id`.
    pub fn take(&mut self, id: PromptId) -> Result<PromptId, PromptError> {
        self.check(id)?;
        self.active = None;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn back_button_only_when_allowed() {
        let mut tracker = PromptTracker::new();
        let with_back = tracker.open("<p>q</p>", true).view;
        assert_eq!(
            with_back.buttons,
            vec![PromptButton::Submit, PromptButton::Back]
        );
        let without = tracker.open("<p>q</p>", false).view;
        assert_eq!(without.buttons, vec![PromptButton::Submit]);
        assert!(!without.has_button(PromptButton::Back));
    }

    #[test]
    fn new_prompt_supersedes_active_one() {
        let mut tracker = PromptTracker::new();
        let first = tracker.open("a", false);
        assert_eq!(first.superseded, None);
        let second = tracker.open("b", false);
        assert_eq!(second.superseded, Some(first.view.id));
        assert_eq!(tracker.active(), Some(second.view.id));
        assert!(tracker.is_active(second.view.id));
        assert!(!tracker.is_active(first.view.id));
    }

    #[test]
    fn take_enforces_active_prompt() {
        let mut tracker = PromptTracker::new();
        assert_eq!(
            tracker.take(PromptId::new(1)),
            Err(PromptError::NoActivePrompt)
        );
        let first = tracker.open("a", false).view.id;
        let second = tracker.open("b", false).view.id;
        assert_eq!(
            tracker.take(first),
            Err(PromptError::NotActive { id: first })
        );
        assert_eq!(tracker.take(second), Ok(second));
        assert_eq!(tracker.active(), None);
    }

    #[test]
    fn collects_checkbox_as_bool_and_text_as_string() {
        let fields = [FormField::checkbox("a", true), FormField::text("b", "x")];
        let values = collect_values(&fields);
        assert_eq!(values.get("a"), Some(&InputValue::Bool(true)));
        assert_eq!(values.get("b"), Some(&InputValue::Text("x".to_owned())));
    }

    #[test]
    fn other_input_types_collect_their_value() {
        let field = FormField {
            name: "age".to_owned(),
            kind: FieldKind::from_input_type("number"),
            value: "42".to_owned(),
            checked: false,
        };
        assert_eq!(field.kind, FieldKind::Other("number".to_owned()));
        assert_eq!(field.value(), InputValue::Text("42".to_owned()));
    }

    #[test]
    fn later_duplicate_names_win() {
        let fields = [FormField::text("n", "first"), FormField::textarea("n", "second")];
        let values = collect_values(&fields);
        assert_eq!(values.len(), 1);
        assert_eq!(values["n"], InputValue::Text("second".to_owned()));
    }

    #[test]
    fn input_type_classification_is_case_insensitive() {
        assert_eq!(FieldKind::from_input_type("CheckBox"), FieldKind::Checkbox);
        assert_eq!(FieldKind::from_input_type(""), FieldKind::Text);
    }

    #[test]
    fn button_action_names_round_trip() {
        for button in [PromptButton::Submit, PromptButton::Back] {
            assert_eq!(
                PromptButton::from_action_name(button.action_name()),
                Some(button)
            );
        }
        assert_eq!(PromptButton::from_action_name("dance"), None);
    }
}
