//! Typed binary capsule: `type (u32 LE) | size (u32 LE) | data (size bytes)`.

/// The [`Capsule`](capsule::Capsule) value and its file/stream codecs.
pub mod capsule;
/// File-extension classifier producing capsule type tags.
pub mod kind;
/// Seekable byte streams with their own little-endian primitives.
pub mod stream;
