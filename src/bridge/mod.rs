//! Surface/texture bridge: textures and surfaces to encoded images and capsules, and back.

use std::path::{Path, PathBuf};

use crate::{
    container::{
        capsule::Capsule,
        stream::{RwStream, StreamIo},
    },
    encode::png::{decode_image, save_png, write_png},
    foundation::error::{CapsuleError, CapsuleResult},
    render::{
        backend::Renderer,
        texture::{Surface, Texture, TextureAccess, alloc_pixels},
    },
};

/// Environment variable overriding [`BridgeOpts::temp_dir`].
pub const TEMP_DIR_ENV: &str = "CAPSULE_TEMP_DIR";

/// Settings for [`Bridge`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeOpts {
    /// Directory for intermediate image files. `None` uses the system temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl BridgeOpts {
    /// Defaults, with `temp_dir` taken from `CAPSULE_TEMP_DIR` when set and non-empty.
    pub fn from_env() -> Self {
        let temp_dir = std::env::var_os(TEMP_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self { temp_dir }
    }
}

/// Converts between renderer textures, pixel surfaces, encoded images and capsules.
#[derive(Debug)]
pub struct Bridge<R> {
    renderer: R,
    opts: BridgeOpts,
}

impl<R: Renderer> Bridge<R> {
    /// Bridge over `renderer`.
    pub fn new(renderer: R, opts: BridgeOpts) -> Self {
        Self { renderer, opts }
    }

    /// Borrow the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutably borrow the renderer, e.g. to create textures.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Active settings.
    pub fn opts(&self) -> &BridgeOpts {
        &self.opts
    }

    /// Read a texture back into a newly allocated straight-alpha surface.
    ///
    /// The texture is copied into an off-screen render target of the same size which is
    /// released when this call returns, on success or failure.
    #[tracing::instrument(skip_all, fields(w = texture.width(), h = texture.height()))]
    pub fn texture_to_surface(&mut self, texture: &Texture) -> CapsuleResult<Surface> {
        let (w, h) = (texture.width(), texture.height());

        let mut target = self
            .renderer
            .create_texture(w, h, TextureAccess::Target)
            .map_err(|e| {
                tracing::error!(error = %e, "unable to create render target");
                CapsuleError::resource(format!("create {w}x{h} render target: {e}"))
            })?;

        self.renderer.render_copy(texture, &mut target).map_err(|e| {
            tracing::error!(error = %e, "unable to copy texture into render target");
            e
        })?;

        let mut pixels = alloc_pixels(w, h).map_err(|e| {
            tracing::error!(error = %e, "unable to allocate readback buffer");
            e
        })?;
        self.renderer.read_pixels(&target, &mut pixels).map_err(|e| {
            tracing::error!(error = %e, "unable to read back render target");
            e
        })?;

        Surface::from_rgba8(w, h, pixels).map_err(|e| {
            tracing::error!(error = %e, "unable to wrap readback buffer");
            CapsuleError::resource(format!("create {w}x{h} surface: {e}"))
        })
    }

    /// Encode a texture as a PNG file.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn texture_save_png(&mut self, texture: &Texture, path: &Path) -> CapsuleResult<()> {
        let surface = self.texture_to_surface(texture)?;
        save_png(&surface, path)
    }

    /// Encode a texture as PNG into a seekable stream at its current position.
    #[tracing::instrument(skip_all)]
    pub fn texture_save_png_to_stream<S: RwStream + ?Sized>(
        &mut self,
        texture: &Texture,
        stream: &mut S,
    ) -> CapsuleResult<()> {
        let surface = self.texture_to_surface(texture)?;
        write_png(&surface, &mut StreamIo::new(stream))
    }

    /// Encode a texture as a PNG capsule.
    #[tracing::instrument(skip_all)]
    pub fn texture_to_capsule(&mut self, texture: &Texture) -> CapsuleResult<Capsule> {
        let surface = self.texture_to_surface(texture)?;
        self.surface_to_capsule(&surface)
    }

    /// Encode a surface as a PNG capsule.
    ///
    /// The image is written to a uniquely named temporary file which is loaded with
    /// [`Capsule::from_file`] and removed when this call returns, whatever the outcome.
    #[tracing::instrument(skip_all, fields(w = surface.width(), h = surface.height()))]
    pub fn surface_to_capsule(&self, surface: &Surface) -> CapsuleResult<Capsule> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("capsule-").suffix(".png");
        let mut tmp = match &self.opts.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| {
            tracing::error!(error = %e, "unable to create temporary image file");
            CapsuleError::io(format!("create temporary image file: {e}"))
        })?;

        write_png(surface, &mut tmp)?;
        let path = tmp.into_temp_path();
        tracing::debug!(path = %path.display(), "encoded temporary png");

        Capsule::from_file(&path)
    }

    /// Decode an image capsule into a straight-alpha surface.
    #[tracing::instrument(skip_all, fields(tag = caps.type_tag(), size = caps.size()))]
    pub fn capsule_to_surface(&self, caps: &Capsule) -> CapsuleResult<Surface> {
        let data = caps
            .data()
            .ok_or_else(|| CapsuleError::argument("capsule holds no payload"))?;
        decode_image(data).map_err(|e| {
            tracing::warn!(error = %e, "capsule payload is not a decodable image");
            e
        })
    }

    /// Decode an image capsule and upload it as a texture.
    #[tracing::instrument(skip_all)]
    pub fn capsule_to_texture(
        &mut self,
        caps: &Capsule,
        access: TextureAccess,
    ) -> CapsuleResult<Texture> {
        let surface = self.capsule_to_surface(caps)?;
        self.renderer
            .create_texture_from_surface(&surface, access)
            .map_err(|e| {
                tracing::error!(error = %e, "unable to create texture from surface");
                CapsuleError::resource(format!("upload surface: {e}"))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bridge/bridge.rs"]
mod tests;
