//! Strip geometry planning.

pub(crate) mod geometry;
