use log::info;
use std::error::Error;
use std::path::Path;

use crate::brand::{AssetManifest, preview_layout};
use crate::text::FontSet;

mod brand;
mod favicon;
mod preview;
mod text;
mod utils;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    favicon::write_png(32, Path::new("favicon-32x32.png"))?;
    favicon::write_png(180, Path::new("apple-touch-icon.png"))?;
    favicon::write_ico(Path::new("favicon.ico"))?;

    let fonts = FontSet::load();
    preview::write_png(&fonts, Path::new("social-preview.png"))?;

    // The manifest records what this run actually wrote; favicon.ico is
    // listed at its largest frame size.
    let manifest_path = Path::new("brand-assets.json");
    let previous = utils::load_manifest(manifest_path)?;
    let mut manifest = AssetManifest::default();
    for (file, width, height) in [
        ("favicon-32x32.png", 32, 32),
        ("apple-touch-icon.png", 180, 180),
        ("favicon.ico", 48, 48),
        ("social-preview.png", preview_layout::WIDTH, preview_layout::HEIGHT),
    ] {
        manifest.assets.push(utils::record_asset(Path::new(file), width, height)?);
    }
    utils::save_manifest(&manifest, manifest_path)?;

    let changed = manifest
        .assets
        .iter()
        .filter(|asset| {
            previous
                .assets
                .iter()
                .find(|prev| prev.file == asset.file)
                .is_none_or(|prev| prev.sha256 != asset.sha256)
        })
        .count();
    info!(
        "asset generation complete, {} of {} files changed since last run",
        changed,
        manifest.assets.len()
    );
    Ok(())
}
