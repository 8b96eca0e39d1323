//! Helper functions for the GUI
//!
//! Window icon generation, token glyph colors, external links and the token
//! icon texture cache.

use anyhow::{anyhow, Result};
use eframe::egui;
use image::{Rgba, RgbaImage};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use url::Url;

const WINDOW_ICON_SIZE: u32 = 64;

/// Draw the application icon: a vault door (ring with a center hub) on a dark tile
pub fn window_icon_image() -> RgbaImage {
    let size = WINDOW_ICON_SIZE as f32;
    let center = size / 2.0 - 0.5;
    RgbaImage::from_fn(WINDOW_ICON_SIZE, WINDOW_ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let dist = (dx * dx + dy * dy).sqrt();
        if (20.0..=27.0).contains(&dist) || dist <= 7.0 {
            Rgba([0, 204, 214, 255])
        } else if (dx.abs() <= 1.5 || dy.abs() <= 1.5) && dist < 20.0 {
            Rgba([0, 122, 255, 255])
        } else {
            Rgba([16, 21, 36, 255])
        }
    })
}

/// Load the application icon for the window
pub fn load_icon() -> egui::IconData {
    let img = window_icon_image();
    let (width, height) = img.dimensions();
    egui::IconData {
        rgba: img.into_raw(),
        width,
        height,
    }
}

/// Up to two uppercase alphanumeric characters from a token symbol
pub fn symbol_initials(symbol: &str) -> String {
    let initials: String = symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(2)
        .collect::<String>()
        .to_ascii_uppercase();
    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// Stable fill color for a token glyph, derived from its symbol
pub fn symbol_color(symbol: &str) -> egui::Color32 {
    let mut hasher = DefaultHasher::new();
    symbol.to_ascii_uppercase().hash(&mut hasher);
    let hue = (hasher.finish() % 360) as f32 / 360.0;
    egui::ecolor::Hsva::new(hue, 0.55, 0.75, 1.0).into()
}

/// Only http(s) links from the catalog are handed to the system browser
pub fn validate_external_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| anyhow!("Invalid URL '{}': {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("Refusing to open '{}' link: {}", other, raw)),
    }
}

/// Open a catalog link in the default browser
pub fn open_external(raw: &str) -> Result<()> {
    let url = validate_external_url(raw)?;
    open::that(url.as_str()).map_err(|e| anyhow!("Failed to open URL: {}", e))
}

/// Token icon textures keyed by file path. Failed loads are remembered so a
/// missing file is only reported once.
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<String, Option<egui::TextureHandle>>,
}

impl IconCache {
    pub fn get(&mut self, ctx: &egui::Context, path: &str) -> Option<egui::TextureHandle> {
        self.textures
            .entry(path.to_string())
            .or_insert_with(|| {
                let bytes = match std::fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!("Failed to read token icon {}: {}", path, e);
                        return None;
                    }
                };
                match egui_extras::image::load_image_bytes(&bytes) {
                    Ok(image) => {
                        tracing::debug!("Loaded token icon {} ({}x{})", path, image.width(), image.height());
                        Some(ctx.load_texture(format!("token_icon:{}", path), image, Default::default()))
                    }
                    Err(e) => {
                        tracing::warn!("Failed to decode token icon {}: {}", path, e);
                        None
                    }
                }
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}
