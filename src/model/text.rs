//! Formatted note text.

use serde::{Deserialize, Serialize};

/// Opaque formatted text attached to a note.
///
/// The model stores the raw text only; turning it into something displayable
/// is delegated through [`RenderText`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub text: String,
}

impl Description {
    /// Creates a description from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Renders the text through an external renderer.
    pub fn render_with<R: RenderText>(&self, renderer: &R) -> String {
        renderer.render(&self.text)
    }
}

/// External text-rendering collaborator.
///
/// Implementations decide what "rendered" means (markdown to terminal
/// escapes, HTML, plain passthrough); the model does not care.
pub trait RenderText {
    fn render(&self, text: &str) -> String;
}

/// Pass-through renderer that returns the text unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainText;

impl RenderText for PlainText {
    fn render(&self, text: &str) -> String {
        text.to_string()
    }
}
