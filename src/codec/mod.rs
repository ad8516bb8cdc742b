//! Fail-soft fixed-width primitives.
//!
//! Every read/write records short transfers in an [`crate::ErrorAccumulator`] instead of returning a
//! status, so a chain of primitives can be checked once by the caller.

/// Big/little-endian integer and float primitives over `std::io` handles.
pub mod byte_order;
