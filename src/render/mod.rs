//! CPU pixel surfaces, textures and the rendering collaborator used by the bridge.

/// The [`Renderer`] trait.
pub mod backend;
/// Surface-to-texture pixel copy.
pub mod blit;
/// `vello_cpu` renderer.
pub mod cpu;
/// Paired source/destination rectangle clamping.
pub mod reconcile;
/// [`Surface`] and [`Texture`] pixel containers.
pub mod texture;

pub use backend::Renderer;
pub use blit::blit_surface_to_texture;
pub use cpu::{CpuRenderer, CpuRendererOpts};
pub use reconcile::reconcile;
pub use texture::{Surface, Texture, TextureAccess};
