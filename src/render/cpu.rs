use crate::{
    foundation::error::{CapsuleError, CapsuleResult},
    render::{
        backend::{Renderer, require_target},
        texture::{
            BYTES_PER_PIXEL, Texture, TextureAccess, premul_bytes_to_pixmap, premul_px,
            unpremultiply_rgba8_in_place,
        },
    },
};

/// Settings for [`CpuRenderer`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuRendererOpts {
    /// Straight-alpha colour a target is cleared to before each copy. `None` clears to
    /// transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Software renderer on top of `vello_cpu`.
#[derive(Debug, Default)]
pub struct CpuRenderer {
    opts: CpuRendererOpts,
}

impl CpuRenderer {
    /// Renderer with explicit settings.
    pub fn new(opts: CpuRendererOpts) -> Self {
        Self { opts }
    }

    /// Active settings.
    pub fn opts(&self) -> &CpuRendererOpts {
        &self.opts
    }

    fn clear_colour(&self) -> [u8; 4] {
        self.opts
            .clear_rgba
            .map(|rgba| premul_px(&rgba))
            .unwrap_or([0, 0, 0, 0])
    }
}

impl Renderer for CpuRenderer {
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        access: TextureAccess,
    ) -> CapsuleResult<Texture> {
        Texture::new(width, height, access)
    }

    fn render_copy(&mut self, src: &Texture, target: &mut Texture) -> CapsuleResult<()> {
        require_target(target)?;

        let clear = self.clear_colour();
        clear_premul(target.premul_pixels_mut(), clear);

        if src.width() == target.width() && src.height() == target.height() {
            src_over(target.premul_pixels_mut(), src.premul_pixels());
            return Ok(());
        }

        let scratch = stretch(src, target.width(), target.height())?;
        src_over(target.premul_pixels_mut(), scratch.data_as_u8_slice());
        Ok(())
    }

    fn read_pixels(&mut self, target: &Texture, out: &mut [u8]) -> CapsuleResult<()> {
        require_target(target)?;
        let src = target.premul_pixels();
        if out.len() != src.len() {
            return Err(CapsuleError::argument(format!(
                "readback buffer is {} bytes, texture needs {}",
                out.len(),
                src.len()
            )));
        }
        out.copy_from_slice(src);
        unpremultiply_rgba8_in_place(out);
        Ok(())
    }
}

/// Rasterise `src` scaled to `width x height` into a fresh transparent pixmap.
fn stretch(src: &Texture, width: u32, height: u32) -> CapsuleResult<vello_cpu::Pixmap> {
    let (w, h) = (
        u16::try_from(width).map_err(|_| CapsuleError::argument("target width exceeds u16"))?,
        u16::try_from(height).map_err(|_| CapsuleError::argument("target height exceeds u16"))?,
    );

    let pixmap = premul_bytes_to_pixmap(src.premul_pixels(), src.width(), src.height())?;
    let paint = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };

    let sx = f64::from(width) / f64::from(src.width());
    let sy = f64::from(height) / f64::from(src.height());

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::scale_non_uniform(sx, sy));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(src.width()),
        f64::from(src.height()),
    ));
    ctx.flush();

    let mut out = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut out);
    Ok(out)
}

fn clear_premul(data: &mut [u8], rgba: [u8; 4]) {
    for px in data.chunks_exact_mut(BYTES_PER_PIXEL) {
        px.copy_from_slice(&rgba);
    }
}

/// Premultiplied source-over of equally sized buffers.
fn src_over(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst
        .chunks_exact_mut(BYTES_PER_PIXEL)
        .zip(src.chunks_exact(BYTES_PER_PIXEL))
    {
        let sa = s[3] as u16;
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        for i in 0..BYTES_PER_PIXEL {
            d[i] = (s[i] as u16 + (d[i] as u16 * inv + 127) / 255).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
