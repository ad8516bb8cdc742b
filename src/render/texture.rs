use crate::foundation::{
    core::{Rect, dim_i32},
    error::{CapsuleError, CapsuleResult},
};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// How a [`Texture`] may be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureAccess {
    /// Sampled only.
    Static,
    /// Pixels may be written directly (blit target).
    Streaming,
    /// May be rendered into and read back.
    Target,
}

/// CPU pixel surface: straight-alpha RGBA8, tightly packed, row-major.
///
/// The surface owns its pixel buffer; dropping it releases both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    /// Transparent surface of `width x height`.
    pub fn new(width: u32, height: u32) -> CapsuleResult<Self> {
        let pixels = alloc_pixels(width, height)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing straight-alpha RGBA8 buffer.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> CapsuleResult<Self> {
        let expected = pixel_len(width, height)?;
        if pixels.len() != expected {
            return Err(CapsuleError::argument(format!(
                "surface {width}x{height} expects {expected} bytes, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Parent bounds `{0, 0, w, h}`.
    pub fn bounds(&self) -> Rect {
        Rect::sized(dim_i32(self.width), dim_i32(self.height))
    }

    /// Borrow the pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutably borrow the pixel buffer.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Release the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of pixel `(x, y)`, if inside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.pitch() + x as usize * BYTES_PER_PIXEL;
        let px = self.pixels.get(i..i + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Renderable texture backed by a premultiplied `vello_cpu` pixmap.
pub struct Texture {
    access: TextureAccess,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("access", &self.access)
            .finish()
    }
}

impl Texture {
    /// Transparent texture of `width x height`.
    pub fn new(width: u32, height: u32, access: TextureAccess) -> CapsuleResult<Self> {
        let (w, h) = texture_dims(width, height)?;
        Ok(Self {
            access,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Upload a straight-alpha surface.
    pub fn from_surface(surface: &Surface, access: TextureAccess) -> CapsuleResult<Self> {
        let mut premul = surface.pixels().to_vec();
        premultiply_rgba8_in_place(&mut premul);
        Ok(Self {
            access,
            pixmap: premul_bytes_to_pixmap(&premul, surface.width(), surface.height())?,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Texture dimensions as `{0, 0, w, h}`.
    pub fn bounds(&self) -> Rect {
        Rect::sized(dim_i32(self.width()), dim_i32(self.height()))
    }

    /// Access mode chosen at creation.
    pub fn access(&self) -> TextureAccess {
        self.access
    }

    /// Premultiplied RGBA8 bytes.
    pub fn premul_pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn premul_pixels_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }
}

fn texture_dims(width: u32, height: u32) -> CapsuleResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(CapsuleError::argument(format!(
            "texture dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| CapsuleError::argument("texture width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CapsuleError::argument("texture height exceeds u16"))?;
    Ok((w, h))
}

fn pixel_len(width: u32, height: u32) -> CapsuleResult<usize> {
    if width == 0 || height == 0 {
        return Err(CapsuleError::argument(format!(
            "surface dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| CapsuleError::argument("surface dimensions overflow"))
}

/// Allocate a zeroed RGBA8 pixel field, reporting allocation failure instead of aborting.
pub(crate) fn alloc_pixels(width: u32, height: u32) -> CapsuleResult<Vec<u8>> {
    let len = pixel_len(width, height)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|e| {
        CapsuleError::resource(format!("unable to allocate {len}-byte pixel field: {e}"))
    })?;
    buf.resize(len, 0);
    Ok(buf)
}

pub(crate) fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> CapsuleResult<vello_cpu::Pixmap> {
    let (w, h) = texture_dims(width, height)?;
    if rgba8_premul.len() != width as usize * height as usize * BYTES_PER_PIXEL {
        return Err(CapsuleError::argument("pixel byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(BYTES_PER_PIXEL) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn premul_px(px: &[u8]) -> [u8; 4] {
    let a = px[3] as u16;
    let mul = |c: u8| ((c as u16 * a + 127) / 255) as u8;
    [mul(px[0]), mul(px[1]), mul(px[2]), px[3]]
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(BYTES_PER_PIXEL) {
        let out = premul_px(px);
        px.copy_from_slice(&out);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(BYTES_PER_PIXEL) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
