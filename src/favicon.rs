use crate::brand::{self, FaviconLayout, with_alpha};
use crate::utils::draw_wide_segment;
use ico::{IconDir, IconDirEntry, IconImage};
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use log::info;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Sizes folded into the multi-resolution `favicon.ico`.
const ICO_SIZES: [u32; 3] = [16, 32, 48];

fn opaque(color: image::Rgb<u8>) -> Rgba<u8> {
    with_alpha(color, 255)
}

/// Renders the circular badge favicon at `size` pixels on a transparent canvas.
pub fn render(size: u32) -> RgbaImage {
    let layout = FaviconLayout::for_size(size);
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    // Badge circle.
    let center = layout.center as i32;
    draw_filled_circle_mut(&mut img, (center, center), layout.radius as i32, opaque(brand::PRIMARY_BLUE));

    // Cross: vertical bar, then horizontal bar.
    let vert_x = ((size - layout.cross_width) / 2) as i32;
    draw_filled_rect_mut(
        &mut img,
        Rect::at(vert_x, layout.cross_inset as i32).of_size(layout.cross_width, layout.cross_height),
        opaque(brand::WHITE),
    );
    draw_filled_rect_mut(
        &mut img,
        Rect::at(layout.cross_inset as i32, vert_x).of_size(layout.cross_height, layout.cross_width),
        opaque(brand::WHITE),
    );

    // Corner accent dots.
    for (x, y) in layout.dot_positions() {
        draw_filled_circle_mut(&mut img, (x as i32, y as i32), layout.dot_radius as i32, opaque(brand::ACCENT_GREEN));
    }

    // Translucent connector strokes go on their own layer so the alpha blends
    // against the finished opaque fills exactly once.
    let mut line_layer = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let line_color = with_alpha(brand::ACCENT_GREEN, brand::CONNECTOR_ALPHA);
    for ((x1, y1), (x2, y2)) in layout.connector_segments() {
        draw_wide_segment(
            &mut line_layer,
            (x1 as f32, y1 as f32),
            (x2 as f32, y2 as f32),
            layout.line_width,
            line_color,
        );
    }
    imageops::overlay(&mut img, &line_layer, 0, 0);

    img
}

/// Renders the favicon at `size` and writes it as a PNG.
pub fn write_png(size: u32, path: &Path) -> Result<(), Box<dyn Error>> {
    let img = render(size);
    img.save(path)?;
    info!("created {} ({}x{})", path.display(), size, size);
    Ok(())
}

/// Writes a multi-resolution `favicon.ico` from freshly rendered frames.
pub fn write_ico(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut icon_dir = IconDir::new(ico::ResourceType::Icon);
    for size in ICO_SIZES {
        let frame = render(size);
        let icon_image = IconImage::from_rgba_data(size, size, frame.into_raw());
        icon_dir.add_entry(IconDirEntry::encode(&icon_image)?);
    }
    let file = BufWriter::new(File::create(path)?);
    icon_dir.write(file)?;
    info!("created {} ({} sizes)", path.display(), ICO_SIZES.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_at_requested_dimensions() {
        for size in [32u32, 180] {
            let img = render(size);
            assert_eq!(img.dimensions(), (size, size));
        }
    }

    #[test]
    fn background_outside_the_circle_is_transparent() {
        let img = render(180);
        assert_eq!(img.get_pixel(1, 1).0[3], 0);
        // Just above the circle's top edge (radius 87 from center 90).
        assert_eq!(img.get_pixel(90, 1).0[3], 0);
    }

    #[test]
    fn cross_covers_the_center() {
        for size in [32u32, 180] {
            let img = render(size);
            let c = size / 2;
            assert_eq!(img.get_pixel(c, c).0, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn circle_fill_is_primary_blue() {
        let img = render(180);
        // Inside the circle, clear of the cross bars and accent dots.
        assert_eq!(img.get_pixel(90, 40).0, [0, 102, 204, 255]);
    }

    #[test]
    fn corner_dots_are_accent_green() {
        let img = render(180);
        let layout = FaviconLayout::for_size(180);
        for (x, y) in layout.dot_positions() {
            assert_eq!(img.get_pixel(x, y).0, [0, 204, 136, 255]);
        }
    }

    #[test]
    fn connector_stroke_blends_over_the_badge() {
        let img = render(180);
        // Midpoint of the first connector segment, over the opaque blue fill.
        let pixel = img.get_pixel(64, 64).0;
        assert_eq!(pixel[3], 255);
        assert!(pixel[1] > 102 && pixel[1] < 204, "green channel {} not a blend", pixel[1]);
    }

    #[test]
    fn ico_holds_every_frame_size() {
        let path = std::env::temp_dir().join("brandkit-favicon-test.ico");
        write_ico(&path).unwrap();
        let icon_dir = IconDir::read(File::open(&path).unwrap()).unwrap();
        let mut widths: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
        widths.sort_unstable();
        assert_eq!(widths, vec![16, 32, 48]);
        std::fs::remove_file(&path).unwrap();
    }
}
