//! Image encoder collaborator.

/// PNG encode/decode through the `image` crate.
pub mod png;
