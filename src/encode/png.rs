use std::{
    io::{Seek, Write},
    path::Path,
};

use anyhow::Context;

use crate::{foundation::error::CapsuleResult, render::texture::Surface};

/// Encode a straight-alpha surface as a PNG file at `path`.
pub fn save_png(surface: &Surface, path: &Path) -> CapsuleResult<()> {
    image::save_buffer_with_format(
        path,
        surface.pixels(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Encode a straight-alpha surface as PNG into `out`.
pub fn write_png<W: Write + Seek>(surface: &Surface, out: &mut W) -> CapsuleResult<()> {
    image::write_buffer_with_format(
        out,
        surface.pixels(),
        surface.width(),
        surface.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode png to stream")?;
    Ok(())
}

/// Decode any supported image format into a straight-alpha RGBA8 surface.
pub fn decode_image(bytes: &[u8]) -> CapsuleResult<Surface> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Surface::from_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
