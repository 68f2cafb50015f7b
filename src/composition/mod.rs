//! Boundary input model: themes, sticker records and strip requests.

pub(crate) mod model;
