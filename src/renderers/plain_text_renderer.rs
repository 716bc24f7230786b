use crate::error::RenderError;
use crate::render::{escape_html, RenderOptions, Renderer};

/// Shows markup as escaped text. Used where no typesetter is available; never fails.
#[derive(Default, Clone, Debug)]
pub struct PlainTextRenderer {
    pub rendered: usize,
}

impl Renderer for PlainTextRenderer {
    fn render(&mut self, markup: &str, options: &RenderOptions) -> Result<String, RenderError> {
        self.rendered += 1;

        let class = if options.display_mode { "latex latex-display" } else { "latex" };
        Ok(format!("<span class=\"{}\">{}</span>", class, escape_html(markup)))
    }
}
