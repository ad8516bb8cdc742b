//! Capsule is a small typed binary container for game and media assets.
//!
//! A capsule is `type (u32 LE) | size (u32 LE) | data`, written and read either through any
//! `std::io` handle or through a seekable [`RwStream`]. Around it sit:
//!
//! - fail-soft fixed-width codecs that record short transfers in an [`ErrorAccumulator`]
//! - a CPU rendering collaborator ([`Surface`], [`Texture`], [`CpuRenderer`]) with a rectangle
//!   reconciler for clipped blits
//! - a [`Bridge`] turning textures and surfaces into PNG capsules and back
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Surface/texture bridge.
pub mod bridge;
/// Byte-order codecs.
pub mod codec;
/// Capsule container, streams and type classifier.
pub mod container;
/// Image encoding.
pub mod encode;
/// Rendering collaborator.
pub mod render;

pub use crate::foundation::accumulator::{Checkpoint, ErrorAccumulator, IoFailure};
pub use crate::foundation::core::Rect;
pub use crate::foundation::error::{CapsuleError, CapsuleResult};

pub use crate::bridge::{Bridge, BridgeOpts};
pub use crate::container::capsule::{Capsule, CapsuleInfo, HEADER_LEN};
pub use crate::container::kind::AssetKind;
pub use crate::container::stream::{ConstMemStream, FileStream, MemStream, RwStream, StreamIo};
pub use crate::render::{
    CpuRenderer, CpuRendererOpts, Renderer, Surface, Texture, TextureAccess,
    blit_surface_to_texture, reconcile,
};
