use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::warn;
use std::fs;
use std::path::Path;

/// Preferred scalable faces, probed in order.
const BOLD_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
];
const REGULAR_CANDIDATES: [&str; 2] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

/// A text face the preview can measure and rasterize with.
///
/// `Builtin` is the embedded fixed-size bitmap face used when no scalable
/// font could be loaded; it ignores the requested pixel size.
pub enum FontFace {
    Scalable(FontVec),
    Builtin,
}

impl FontFace {
    /// Bounding-box size of `text` rendered at `size` pixels.
    pub fn measure(&self, size: f32, text: &str) -> (u32, u32) {
        match self {
            FontFace::Scalable(font) => text_size(PxScale::from(size), font, text),
            FontFace::Builtin => builtin_text_size(text),
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, size: f32, text: &str) {
        match self {
            FontFace::Scalable(font) => {
                draw_text_mut(img, color, x, y, PxScale::from(size), font, text);
            }
            FontFace::Builtin => draw_builtin_text(img, color, x, y, text),
        }
    }
}

/// The bold and regular faces used by all preview text roles.
pub struct FontSet {
    pub bold: FontFace,
    pub regular: FontFace,
}

impl FontSet {
    /// Loads the preferred system fonts, substituting the built-in bitmap
    /// face for every role when either load fails.
    pub fn load() -> Self {
        Self::load_from(&BOLD_CANDIDATES, &REGULAR_CANDIDATES)
    }

    pub fn load_from(bold_candidates: &[&str], regular_candidates: &[&str]) -> Self {
        match (load_face(bold_candidates), load_face(regular_candidates)) {
            (Some(bold), Some(regular)) => Self {
                bold: FontFace::Scalable(bold),
                regular: FontFace::Scalable(regular),
            },
            _ => {
                warn!("scalable fonts unavailable, using the built-in bitmap face");
                Self {
                    bold: FontFace::Builtin,
                    regular: FontFace::Builtin,
                }
            }
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.bold, FontFace::Builtin)
    }
}

fn load_face(candidates: &[&str]) -> Option<FontVec> {
    for path in candidates {
        if let Ok(data) = fs::read(Path::new(path)) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}

/// Horizontal offset that centers a measured text width on the canvas.
pub fn centered_x(canvas_width: u32, text_width: u32) -> i32 {
    (canvas_width.saturating_sub(text_width) / 2) as i32
}

// --- Built-in bitmap face ---
//
// 5x7 glyph rows, bit 4 = leftmost column. Covers uppercase letters, digits
// and the punctuation appearing in the brand copy; lowercase maps onto
// uppercase. Unknown characters render blank.

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Fixed upscale of the bitmap face; the requested size is ignored.
const GLYPH_SCALE: u32 = 2;
const GLYPH_ADVANCE: u32 = (GLYPH_WIDTH + 1) * GLYPH_SCALE;

#[rustfmt::skip]
const GLYPHS: [(char, [u8; 7]); 45] = [
    ('A', [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('B', [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E]),
    ('C', [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E]),
    ('D', [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E]),
    ('E', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F]),
    ('F', [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10]),
    ('G', [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F]),
    ('H', [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11]),
    ('I', [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F]),
    ('M', [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11]),
    ('O', [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('P', [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10]),
    ('Q', [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D]),
    ('R', [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11]),
    ('S', [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E]),
    ('T', [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E]),
    ('V', [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A]),
    ('X', [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F]),
    ('0', [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E]),
    ('1', [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E]),
    ('2', [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F]),
    ('3', [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E]),
    ('4', [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02]),
    ('5', [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E]),
    ('6', [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E]),
    ('7', [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E]),
    ('9', [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C]),
    (' ', [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('-', [0x00, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08]),
    ('+', [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00]),
    ('&', [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D]),
    ('%', [0x19, 0x19, 0x02, 0x04, 0x08, 0x13, 0x13]),
    ('$', [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04]),
    ('/', [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10]),
];

fn builtin_glyph(ch: char) -> [u8; 7] {
    let ch = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|&&(g, _)| g == ch)
        .map(|&(_, rows)| rows)
        .unwrap_or([0; 7])
}

fn builtin_text_size(text: &str) -> (u32, u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, GLYPH_HEIGHT * GLYPH_SCALE);
    }
    (count * GLYPH_ADVANCE - GLYPH_SCALE, GLYPH_HEIGHT * GLYPH_SCALE)
}

fn draw_builtin_text(img: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
    let (width, height) = img.dimensions();
    for (index, ch) in text.chars().enumerate() {
        let rows = builtin_glyph(ch);
        let origin_x = x + (index as u32 * GLYPH_ADVANCE) as i32;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                // Each glyph bit becomes a GLYPH_SCALE square block.
                for dy in 0..GLYPH_SCALE {
                    for dx in 0..GLYPH_SCALE {
                        let px = origin_x + (col * GLYPH_SCALE + dx) as i32;
                        let py = y + (row as u32 * GLYPH_SCALE + dy) as i32;
                        if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                            img.put_pixel(px as u32, py as u32, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_fall_back_to_builtin() {
        let fonts = FontSet::load_from(&["/nonexistent/bold.ttf"], &["/nonexistent/regular.ttf"]);
        assert!(fonts.is_fallback());
        let (w, h) = fonts.bold.measure(80.0, "AB");
        assert_eq!(w, 2 * GLYPH_ADVANCE - GLYPH_SCALE);
        assert_eq!(h, GLYPH_HEIGHT * GLYPH_SCALE);
    }

    #[test]
    fn builtin_draw_stays_inside_measured_box() {
        let text = "99.9%";
        let (w, h) = builtin_text_size(text);
        let mut img = RgbImage::new(w + 20, h + 20);
        draw_builtin_text(&mut img, Rgb([255, 255, 255]), 10, 10, text);
        let mut lit = 0;
        for (x, y, pixel) in img.enumerate_pixels() {
            if pixel.0 == [255, 255, 255] {
                lit += 1;
                assert!(x >= 10 && x < 10 + w, "pixel outside box at x={x}");
                assert!(y >= 10 && y < 10 + h, "pixel outside box at y={y}");
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn centered_x_splits_the_margin() {
        assert_eq!(centered_x(1200, 400), 400);
        assert_eq!(centered_x(1200, 0), 600);
        // Wider than the canvas clamps to the left edge instead of underflowing.
        assert_eq!(centered_x(100, 200), 0);
    }

    #[test]
    fn lowercase_maps_onto_uppercase() {
        assert_eq!(builtin_glyph('a'), builtin_glyph('A'));
        assert_eq!(builtin_glyph('\u{fffd}'), [0; 7]);
    }
}
