mod plain_text_renderer;
pub use plain_text_renderer::*;
