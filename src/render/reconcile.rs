use crate::foundation::core::Rect;

fn constrain(min: i32, v: &mut i32, max: i32) {
    *v = (*v).clamp(min, max.max(min));
}

/// Clamp a source clip and a destination blit rectangle against their own parent bounds.
///
/// Both rectangles are corrected in place so that, afterwards, `0 <= x`, `0 <= y`,
/// `x + w <= bounds.w` and `y + h <= bounds.h` hold for each. When the destination starts left of
/// (or above) its parent, the source origin is shifted and its extent shrunk by the same overflow
/// so the two origins stay in registration. A destination overflowing right/bottom only shrinks
/// the destination: the consumer copies `min(w) x min(h)` samples.
///
/// Any extent corrected below zero is normalized to an empty rectangle inside the bounds.
pub fn reconcile(src_bounds: &Rect, src_clip: &mut Rect, dst_bounds: &Rect, dst_blit: &mut Rect) {
    constrain(0, &mut src_clip.w, src_bounds.w);
    constrain(0, &mut src_clip.h, src_bounds.h);
    constrain(0, &mut dst_blit.w, dst_bounds.w);
    constrain(0, &mut dst_blit.h, dst_bounds.h);

    // source against its own bounds
    if src_clip.x < 0 {
        src_clip.w = src_clip.w.saturating_add(src_clip.x);
        src_clip.x = 0;
    }
    if src_clip.right() > src_bounds.w {
        src_clip.w = src_bounds.w.saturating_sub(src_clip.x);
    }
    if src_clip.y < 0 {
        src_clip.h = src_clip.h.saturating_add(src_clip.y);
        src_clip.y = 0;
    }
    if src_clip.bottom() > src_bounds.h {
        src_clip.h = src_bounds.h.saturating_sub(src_clip.y);
    }

    // destination, propagating left/top overflow back into the source
    if dst_blit.x < 0 {
        src_clip.w = src_clip.w.saturating_add(dst_blit.x);
        src_clip.x = src_clip.x.saturating_sub(dst_blit.x);
        dst_blit.w = dst_blit.w.saturating_add(dst_blit.x);
        dst_blit.x = 0;
    }
    if dst_blit.right() > dst_bounds.w {
        dst_blit.w = dst_bounds.w - dst_blit.x;
    }
    if dst_blit.y < 0 {
        src_clip.h = src_clip.h.saturating_add(dst_blit.y);
        src_clip.y = src_clip.y.saturating_sub(dst_blit.y);
        dst_blit.h = dst_blit.h.saturating_add(dst_blit.y);
        dst_blit.y = 0;
    }
    if dst_blit.bottom() > dst_bounds.h {
        dst_blit.h = dst_bounds.h - dst_blit.y;
    }

    normalize(src_clip, src_bounds);
    normalize(dst_blit, dst_bounds);
}

fn normalize(r: &mut Rect, bounds: &Rect) {
    if r.w < 0 {
        r.x = r.x.clamp(0, bounds.w.max(0));
        r.w = 0;
    }
    if r.h < 0 {
        r.y = r.y.clamp(0, bounds.h.max(0));
        r.h = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/reconcile.rs"]
mod tests;
