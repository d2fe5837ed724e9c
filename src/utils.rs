use crate::brand::{AssetManifest, AssetRecord};
use imageproc::drawing::{Canvas, draw_line_segment_mut};
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

/// Draws a line segment widened to `width` pixels by parallel offsets.
pub fn draw_wide_segment<C>(canvas: &mut C, start: (f32, f32), end: (f32, f32), width: u32, color: C::Pixel)
where
    C: Canvas,
{
    let half = (width / 2) as f32;
    for i in 0..width {
        let offset = i as f32 - half;
        draw_line_segment_mut(canvas, (start.0 + offset, start.1), (end.0 + offset, end.1), color);
    }
}

/// Calculates the SHA256 hash of a file.
pub fn file_sha256(path: &Path) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0; 8192]; // 8KB buffer
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Builds the manifest entry for an asset already written to disk.
pub fn record_asset(path: &Path, width: u32, height: u32) -> Result<AssetRecord, Box<dyn Error>> {
    let bytes = fs::metadata(path)?.len();
    let sha256 = file_sha256(path)?;
    let file = path
        .file_name()
        .ok_or("asset path has no file name")?
        .to_string_lossy()
        .into_owned();
    Ok(AssetRecord {
        file,
        width,
        height,
        bytes,
        sha256,
    })
}

/// Saves the asset manifest to a JSON file.
pub fn save_manifest(manifest: &AssetManifest, path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, manifest)?;
    Ok(())
}

/// Loads an asset manifest from a JSON file.
pub fn load_manifest(path: &Path) -> Result<AssetManifest, Box<dyn Error>> {
    if !path.exists() {
        return Ok(AssetManifest::default());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let manifest = serde_json::from_reader(reader)?;
    Ok(manifest)
}
