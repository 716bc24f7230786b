//! The boundary with the typesetter which turns markup into something displayable.
//!
//! Typesetting itself is done elsewhere, behind the [Renderer] trait. What this module guarantees
//! is that a failing renderer never breaks the caller: [render_or_fallback] always produces some
//! HTML, falling back to the escaped markup as plain text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RenderError;

/// Options handed to the renderer along with the markup.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Render as a centred display block rather than inline.
    pub display_mode: bool,

    /// Whether the renderer should fail on bad markup, rather than rendering it in `error_color`.
    pub throw_on_error: bool,

    pub error_color: String,

    /// Extra commands, mapping a command name such as `\RR` to its expansion.
    pub macros: BTreeMap<String, String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            display_mode: false,
            throw_on_error: false,
            error_color: "#cc0000".to_string(),
            macros: BTreeMap::new(),
        }
    }
}

/// A typesetter which turns markup into HTML.
pub trait Renderer {
    fn render(&mut self, markup: &str, options: &RenderOptions) -> Result<String, RenderError>;
}

/// Renders `markup`, degrading to the escaped markup as plain text if the renderer fails.
pub fn render_or_fallback(renderer: &mut impl Renderer, markup: &str, options: &RenderOptions) -> String {
    match renderer.render(markup, options) {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, markup, "renderer failed, falling back to plain text");
            format!("<span class=\"latex-error\">{}</span>", escape_html(markup))
        }
    }
}

/// Escapes the characters which are significant in HTML text and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
