//! CPU-side drawing primitives over any `image::GenericImage`.

use image::GenericImage;

use crate::font::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph};

/// Fill the rectangle spanned by two corner points, both inclusive.
/// Corners may be given in any order and may lie outside the canvas.
pub fn fill_rect<I: GenericImage>(image: &mut I, x0: i32, y0: i32, x1: i32, y1: i32, pixel: I::Pixel) {
    let (width, height) = image.dimensions();
    let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };

    let x_start = x0.max(0);
    let x_end = x1.min(width as i32 - 1);
    let y_start = y0.max(0);
    let y_end = y1.min(height as i32 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            image.put_pixel(x as u32, y as u32, pixel);
        }
    }
}

/// Fill a disc of the given radius centered on (cx, cy), clipped to the canvas.
pub fn fill_circle<I: GenericImage>(image: &mut I, cx: i32, cy: i32, radius: i32, pixel: I::Pixel) {
    if radius < 0 {
        return;
    }
    let (width, height) = image.dimensions();
    let r2 = i64::from(radius) * i64::from(radius);

    let y_start = (cy - radius).max(0);
    let y_end = (cy + radius).min(height as i32 - 1);
    let x_start = (cx - radius).max(0);
    let x_end = (cx + radius).min(width as i32 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            let dx = i64::from(x - cx);
            let dy = i64::from(y - cy);
            if dx * dx + dy * dy <= r2 {
                image.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}

/// Draw a line of text with (x, y) as the baseline-left origin.
///
/// Characters are rasterized from the embedded 5x7 font, scaled by `scale`
/// pixels per font pixel. Characters outside the font advance the pen
/// without drawing.
pub fn draw_text<I: GenericImage>(image: &mut I, x: i32, y: i32, text: &str, pixel: I::Pixel, scale: u32) {
    let scale = scale.max(1) as i32;
    let top = y - GLYPH_HEIGHT as i32 * scale;
    let mut pen_x = x;

    for ch in text.chars() {
        if let Some(rows) = glyph(ch.to_ascii_uppercase()) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH as i32 {
                    if (bits >> (GLYPH_WIDTH as i32 - 1 - col)) & 1 == 1 {
                        let px = pen_x + col * scale;
                        let py = top + row as i32 * scale;
                        fill_rect(image, px, py, px + scale - 1, py + scale - 1, pixel);
                    }
                }
            }
        }
        pen_x += (GLYPH_WIDTH as i32 + 1) * scale;
    }
}
