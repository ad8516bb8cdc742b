use crate::{
    foundation::{
        core::Rect,
        error::{CapsuleError, CapsuleResult},
    },
    render::{
        reconcile::reconcile,
        texture::{BYTES_PER_PIXEL, Surface, Texture, TextureAccess, premul_px},
    },
};

/// Copy pixels from a surface into a streaming texture.
///
/// Absent rectangles default to the full bounds of their side. Both rectangles are reconciled
/// against their buffers first, then `min(w) x min(h)` pixels are copied starting at each
/// rectangle's own origin. Fully transparent source pixels leave the destination untouched.
pub fn blit_surface_to_texture(
    src: &Surface,
    dst: &mut Texture,
    src_rect: Option<Rect>,
    dst_rect: Option<Rect>,
) -> CapsuleResult<()> {
    if dst.access() != TextureAccess::Streaming {
        return Err(CapsuleError::argument(format!(
            "blit needs a streaming texture, got {:?}",
            dst.access()
        )));
    }

    let src_bounds = src.bounds();
    let dst_bounds = dst.bounds();
    let mut clip = src_rect.unwrap_or(src_bounds);
    let mut blit = dst_rect.unwrap_or(dst_bounds);
    reconcile(&src_bounds, &mut clip, &dst_bounds, &mut blit);

    let w = clip.w.min(blit.w).max(0) as usize;
    let h = clip.h.min(blit.h).max(0) as usize;
    if w == 0 || h == 0 {
        return Ok(());
    }

    let src_pitch = src.pitch();
    let dst_pitch = dst.width() as usize * BYTES_PER_PIXEL;
    let src_px = src.pixels();
    let dst_px = dst.premul_pixels_mut();

    for row in 0..h {
        let s_row = (clip.y as usize + row) * src_pitch + clip.x as usize * BYTES_PER_PIXEL;
        let d_row = (blit.y as usize + row) * dst_pitch + blit.x as usize * BYTES_PER_PIXEL;
        let s = &src_px[s_row..s_row + w * BYTES_PER_PIXEL];
        let d = &mut dst_px[d_row..d_row + w * BYTES_PER_PIXEL];
        for (sp, dp) in s
            .chunks_exact(BYTES_PER_PIXEL)
            .zip(d.chunks_exact_mut(BYTES_PER_PIXEL))
        {
            if sp[3] == 0 {
                continue;
            }
            dp.copy_from_slice(&premul_px(sp));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blit.rs"]
mod tests;
