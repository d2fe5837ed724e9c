use crate::brand::{self, preview_layout as layout};
use crate::text::{FontSet, centered_x};
use crate::utils::draw_wide_segment;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use log::info;
use std::error::Error;
use std::path::Path;

/// Renders the 1200x630 social preview card.
pub fn render(fonts: &FontSet) -> RgbImage {
    let mut img = RgbImage::new(layout::WIDTH, layout::HEIGHT);

    draw_gradient(&mut img);
    draw_title(&mut img, fonts);
    draw_taglines(&mut img, fonts);
    draw_cross_icon(&mut img);
    draw_accent_cluster(&mut img);
    draw_stats(&mut img, fonts);

    img
}

/// Vertical gradient from the primary blue into the deep blue, row by row.
fn draw_gradient(img: &mut RgbImage) {
    let height = img.height() as f32;
    let Rgb([r0, g0, b0]) = brand::PRIMARY_BLUE;
    let Rgb([r1, g1, b1]) = brand::DEEP_BLUE;
    for (_, y, pixel) in img.enumerate_pixels_mut() {
        let ratio = y as f32 / height;
        let r = (r0 as f32 - (r0 as f32 - r1 as f32) * ratio) as u8;
        let g = (g0 as f32 - (g0 as f32 - g1 as f32) * ratio) as u8;
        let b = (b0 as f32 - (b0 as f32 - b1 as f32) * ratio) as u8;
        *pixel = Rgb([r, g, b]);
    }
}

/// Brand name, centered, with a solid drop shadow under the foreground pass.
fn draw_title(img: &mut RgbImage, fonts: &FontSet) {
    let (text_width, _) = fonts.bold.measure(layout::TITLE_SIZE, brand::BRAND_NAME);
    let x = centered_x(layout::WIDTH, text_width);
    fonts.bold.draw(
        img,
        brand::SHADOW,
        x + layout::SHADOW_OFFSET,
        layout::TITLE_Y + layout::SHADOW_OFFSET,
        layout::TITLE_SIZE,
        brand::BRAND_NAME,
    );
    fonts.bold.draw(img, brand::WHITE, x, layout::TITLE_Y, layout::TITLE_SIZE, brand::BRAND_NAME);
}

fn draw_taglines(img: &mut RgbImage, fonts: &FontSet) {
    for (line, y) in brand::TAGLINE_LINES.iter().zip(layout::TAGLINE_YS) {
        let (text_width, _) = fonts.regular.measure(layout::SUBTITLE_SIZE, line);
        let x = centered_x(layout::WIDTH, text_width);
        fonts.regular.draw(img, brand::ACCENT_GREEN, x, y, layout::SUBTITLE_SIZE, line);
    }
    for (line, y) in brand::DESCRIPTION_LINES.iter().zip(layout::DESCRIPTION_YS) {
        let (text_width, _) = fonts.regular.measure(layout::BODY_SIZE, line);
        let x = centered_x(layout::WIDTH, text_width);
        fonts.regular.draw(img, brand::WHITE, x, y, layout::BODY_SIZE, line);
    }
}

/// Small white cross in the top-left corner, two overlapping bars.
fn draw_cross_icon(img: &mut RgbImage) {
    let vertical = Rect::at(
        layout::CROSS_X - layout::CROSS_THICKNESS / 2,
        layout::CROSS_Y - layout::CROSS_LENGTH / 2,
    )
    .of_size(layout::CROSS_THICKNESS as u32, layout::CROSS_LENGTH as u32);
    let horizontal = Rect::at(
        layout::CROSS_X - layout::CROSS_LENGTH / 2,
        layout::CROSS_Y - layout::CROSS_THICKNESS / 2,
    )
    .of_size(layout::CROSS_LENGTH as u32, layout::CROSS_THICKNESS as u32);
    draw_filled_rect_mut(img, vertical, brand::WHITE);
    draw_filled_rect_mut(img, horizontal, brand::WHITE);
}

/// Four accent dots in the top-right corner with crossing connectors.
fn draw_accent_cluster(img: &mut RgbImage) {
    for y in layout::DOT_YS {
        for x in layout::DOT_XS {
            draw_filled_circle_mut(img, (x, y), layout::DOT_RADIUS, brand::ACCENT_GREEN);
        }
    }
    let [left, right] = layout::DOT_XS;
    let [top, bottom] = layout::DOT_YS;
    draw_wide_segment(
        img,
        (right as f32, top as f32),
        (left as f32, bottom as f32),
        layout::CONNECTOR_WIDTH,
        brand::ACCENT_GREEN,
    );
    draw_wide_segment(
        img,
        (left as f32, top as f32),
        (right as f32, bottom as f32),
        layout::CONNECTOR_WIDTH,
        brand::ACCENT_GREEN,
    );
}

/// Midpoint of the `index`-th of three equal-width statistic columns.
fn stat_column_center(index: usize) -> i32 {
    let spacing = layout::WIDTH as i32 / 3;
    spacing * index as i32 + spacing / 2
}

fn draw_stats(img: &mut RgbImage, fonts: &FontSet) {
    for (index, (value, label)) in brand::STATS.iter().enumerate() {
        let center = stat_column_center(index);

        let (value_width, _) = fonts.regular.measure(layout::SUBTITLE_SIZE, value);
        fonts.regular.draw(
            img,
            brand::ACCENT_GREEN,
            center - value_width as i32 / 2,
            layout::STATS_Y,
            layout::SUBTITLE_SIZE,
            value,
        );

        let (label_width, _) = fonts.regular.measure(layout::BODY_SIZE, label);
        fonts.regular.draw(
            img,
            brand::WHITE,
            center - label_width as i32 / 2,
            layout::STATS_Y + layout::STAT_LABEL_DROP,
            layout::BODY_SIZE,
            label,
        );
    }
}

/// Renders the card and writes it as a PNG.
pub fn write_png(fonts: &FontSet, path: &Path) -> Result<(), Box<dyn Error>> {
    let img = render(fonts);
    img.save(path)?;
    info!("created {} ({}x{})", path.display(), layout::WIDTH, layout::HEIGHT);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin_fonts() -> FontSet {
        FontSet::load_from(&[], &[])
    }

    #[test]
    fn card_has_fixed_dimensions() {
        let img = render(&builtin_fonts());
        assert_eq!(img.dimensions(), (1200, 630));
    }

    #[test]
    fn gradient_runs_between_the_brand_blues() {
        // Column 0 carries nothing but the gradient.
        let img = render(&builtin_fonts());
        assert_eq!(img.get_pixel(0, 0).0, [0, 102, 204]);
        let bottom = img.get_pixel(0, 629).0;
        assert_eq!(bottom[0], 0);
        assert!(bottom[1].abs_diff(76) <= 1);
        assert!(bottom[2].abs_diff(153) <= 1);
    }

    #[test]
    fn gradient_is_monotone_per_channel() {
        let img = render(&builtin_fonts());
        for y in 1..630 {
            let prev = img.get_pixel(0, y - 1).0;
            let row = img.get_pixel(0, y).0;
            assert!(row[1] <= prev[1]);
            assert!(row[2] <= prev[2]);
        }
    }

    #[test]
    fn title_is_centered_within_one_glyph() {
        let fonts = builtin_fonts();
        let img = render(&fonts);
        let (_, text_height) = fonts.bold.measure(80.0, brand::BRAND_NAME);
        // Scan the title band for foreground-white pixels only; the shadow
        // pass is black and the accent cluster is green.
        let mut min_x = u32::MAX;
        let mut max_x = 0;
        for y in 120..120 + text_height {
            for x in 0..1200 {
                if img.get_pixel(x, y).0 == [255, 255, 255] {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        assert!(min_x < max_x, "no title pixels found");
        let center = (min_x + max_x) / 2;
        assert!(center.abs_diff(600) <= 12, "title center drifted to {center}");
    }

    #[test]
    fn stat_columns_split_the_width_evenly() {
        assert_eq!(stat_column_center(0), 200);
        assert_eq!(stat_column_center(1), 600);
        assert_eq!(stat_column_center(2), 1000);
    }

    #[test]
    fn fallback_fonts_still_produce_the_card() {
        let fonts = FontSet::load_from(&["/no/such/font.ttf"], &["/no/such/font.ttf"]);
        assert!(fonts.is_fallback());
        let img = render(&fonts);
        assert_eq!(img.dimensions(), (1200, 630));
    }
}
