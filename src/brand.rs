use chrono::{DateTime, Local};
use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};

/// Primary brand blue, used for the favicon badge and the preview gradient start.
pub const PRIMARY_BLUE: Rgb<u8> = Rgb([0, 102, 204]);
/// Darker blue the preview gradient runs into at the bottom edge.
pub const DEEP_BLUE: Rgb<u8> = Rgb([0, 76, 153]);
/// Accent green for dots, connector lines, taglines and stat values.
pub const ACCENT_GREEN: Rgb<u8> = Rgb([0, 204, 136]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Solid shadow tone behind the preview title.
pub const SHADOW: Rgb<u8> = Rgb([0, 0, 0]);

/// Alpha applied to the favicon connector strokes before compositing.
pub const CONNECTOR_ALPHA: u8 = 153;

pub const BRAND_NAME: &str = "SurgiGuard AI";
pub const TAGLINE_LINES: [&str; 2] = ["Surgical Instrument Tracking", "& Count Verification"];
pub const DESCRIPTION_LINES: [&str; 2] = ["AI-Powered Computer Vision to Prevent", "Retained Surgical Items"];

/// Bottom-row statistics, rendered as (value, label) pairs in three columns.
pub const STATS: [(&str, &str); 3] = [
    ("5,500+", "Annual RSI Cases"),
    ("$200K", "Avg Cost/Incident"),
    ("99.9%", "Accuracy Rate"),
];

/// Converts an opaque brand color into its RGBA form at the given alpha.
pub fn with_alpha(color: Rgb<u8>, alpha: u8) -> Rgba<u8> {
    let Rgb([r, g, b]) = color;
    Rgba([r, g, b, alpha])
}

/// All favicon geometry, derived from a single `size / 64` scale factor.
///
/// Every drawing call in the favicon generator reads its coordinates from
/// here, so the 32px and 180px renderings keep identical proportions.
#[derive(Debug, Clone, Copy)]
pub struct FaviconLayout {
    pub size: u32,
    pub scale: f32,
    /// Canvas midpoint on both axes.
    pub center: f32,
    /// Badge circle radius: half the canvas minus one scale unit.
    pub radius: f32,
    /// Thickness of each cross bar.
    pub cross_width: u32,
    /// Length of each cross bar.
    pub cross_height: u32,
    /// Distance from the canvas edge to the start of a cross bar.
    pub cross_inset: u32,
    pub dot_radius: u32,
    /// Near-corner dot offset on each axis.
    pub dot_near: u32,
    /// Far-corner dot offset on each axis.
    pub dot_far: u32,
    /// Inner connector endpoint nearer the canvas origin.
    pub inner_near: u32,
    /// Inner connector endpoint farther from the canvas origin.
    pub inner_far: u32,
    pub line_width: u32,
}

impl FaviconLayout {
    /// Derives the full layout for a square favicon of `size` pixels.
    pub fn for_size(size: u32) -> Self {
        let scale = size as f32 / 64.0;
        Self {
            size,
            scale,
            center: size as f32 / 2.0,
            radius: size as f32 / 2.0 - scale,
            cross_width: (8.0 * scale) as u32,
            cross_height: (28.0 * scale) as u32,
            cross_inset: (18.0 * scale) as u32,
            dot_radius: (2.0 * scale) as u32,
            dot_near: (20.0 * scale) as u32,
            dot_far: (44.0 * scale) as u32,
            inner_near: (26.0 * scale) as u32,
            inner_far: (38.0 * scale) as u32,
            line_width: (scale as u32).max(1),
        }
    }

    /// The four corner dot centers, in reading order.
    pub fn dot_positions(&self) -> [(u32, u32); 4] {
        [
            (self.dot_near, self.dot_near),
            (self.dot_far, self.dot_near),
            (self.dot_near, self.dot_far),
            (self.dot_far, self.dot_far),
        ]
    }

    /// Connector segments from each corner dot to its inward endpoint.
    pub fn connector_segments(&self) -> [((u32, u32), (u32, u32)); 4] {
        [
            ((self.dot_near, self.dot_near), (self.inner_near, self.inner_near)),
            ((self.dot_far, self.dot_near), (self.inner_far, self.inner_near)),
            ((self.dot_near, self.dot_far), (self.inner_near, self.inner_far)),
            ((self.dot_far, self.dot_far), (self.inner_far, self.inner_far)),
        ]
    }
}

/// Fixed layout of the 1200x630 social preview card.
pub mod preview_layout {
    pub const WIDTH: u32 = 1200;
    pub const HEIGHT: u32 = 630;

    pub const TITLE_SIZE: f32 = 80.0;
    pub const SUBTITLE_SIZE: f32 = 36.0;
    pub const BODY_SIZE: f32 = 32.0;

    pub const TITLE_Y: i32 = 120;
    pub const TAGLINE_YS: [i32; 2] = [240, 290];
    pub const DESCRIPTION_YS: [i32; 2] = [380, 425];
    pub const SHADOW_OFFSET: i32 = 3;

    /// Cross icon center and proportions, top-left corner of the card.
    pub const CROSS_X: i32 = 60;
    pub const CROSS_Y: i32 = 60;
    pub const CROSS_LENGTH: i32 = 40;
    pub const CROSS_THICKNESS: i32 = 12;

    /// Accent dot cluster in the top-right corner.
    pub const DOT_RADIUS: i32 = 8;
    pub const DOT_XS: [i32; 2] = [WIDTH as i32 - 140, WIDTH as i32 - 80];
    pub const DOT_YS: [i32; 2] = [60, 120];
    pub const CONNECTOR_WIDTH: u32 = 2;

    pub const STATS_Y: i32 = 510;
    pub const STAT_LABEL_DROP: i32 = 45;
}

/// Describes one emitted asset file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetRecord {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
    pub sha256: String,
}

/// Manifest of every asset written by a generator run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssetManifest {
    pub generator_version: String,
    pub generated_at: DateTime<Local>,
    pub assets: Vec<AssetRecord>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Local::now(),
            assets: Vec::new(),
        }
    }
}
