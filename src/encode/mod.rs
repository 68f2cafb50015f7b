//! Output encoding for finished strips.

pub(crate) mod png;
