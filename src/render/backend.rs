use crate::{
    foundation::error::{CapsuleError, CapsuleResult},
    render::texture::{Surface, Texture, TextureAccess},
};

/// Rendering collaborator used by the bridge.
///
/// Render-target redirection is scoped to a single [`Renderer::render_copy`] call: the target is
/// passed explicitly, so there is no ambient target to restore afterwards.
pub trait Renderer {
    /// Allocate a transparent texture.
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        access: TextureAccess,
    ) -> CapsuleResult<Texture>;

    /// Upload a straight-alpha surface as a texture.
    fn create_texture_from_surface(
        &mut self,
        surface: &Surface,
        access: TextureAccess,
    ) -> CapsuleResult<Texture> {
        Texture::from_surface(surface, access)
    }

    /// Stretch `src` over the whole of `target`, replacing its contents.
    ///
    /// `target` must have [`TextureAccess::Target`].
    fn render_copy(&mut self, src: &Texture, target: &mut Texture) -> CapsuleResult<()>;

    /// Read `target` back as straight-alpha RGBA8 into `out`, which must hold exactly
    /// `width * height * 4` bytes.
    fn read_pixels(&mut self, target: &Texture, out: &mut [u8]) -> CapsuleResult<()>;
}

pub(crate) fn require_target(texture: &Texture) -> CapsuleResult<()> {
    if texture.access() != TextureAccess::Target {
        return Err(CapsuleError::argument(format!(
            "texture has {:?} access, render target required",
            texture.access()
        )));
    }
    Ok(())
}
