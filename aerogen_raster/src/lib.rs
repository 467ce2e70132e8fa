mod draw;
mod font;

pub use draw::{draw_text, fill_circle, fill_rect};
pub use font::{GLYPH_HEIGHT, GLYPH_WIDTH, text_width};
