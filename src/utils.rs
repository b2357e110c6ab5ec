//! Utility functions

use crate::api::ApiError;
use crate::constants::APP_NAME;
use crate::types::DecodedImage;
use base64::Engine;
use std::path::PathBuf;

// Square viewBox — for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 64"><rect x="4" y="4" width="56" height="56" rx="12" fill="#18181b" stroke="#2dd4bf" stroke-width="3"/><path d="M24 18h16v28h-6V24h-10z" fill="#2dd4bf"/><path d="M20 46h24v4H20z" fill="#fff"/></svg>"##;

/// Decode a base64 PNG payload (as sent by the backend) into RGBA pixels.
pub fn decode_base64_png(payload: &str) -> Result<DecodedImage, ApiError> {
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
    let rgba = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(DecodedImage { size, rgba: rgba.into_raw() })
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_icon(size: u32) -> Option<(Vec<u8>, u32, u32)> {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).ok()?;
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)?;
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Some((premul_to_straight(&pixmap), size, size))
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Get the app data directory path
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
