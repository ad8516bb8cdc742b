pub(crate) mod accumulator;
pub(crate) mod core;
pub(crate) mod error;
