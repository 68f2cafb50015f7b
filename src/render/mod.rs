//! Strip rendering stages and the fan-out/fan-in pipeline that drives them.

pub(crate) mod compositor;
pub(crate) mod normalize;
pub(crate) mod pipeline;
pub(crate) mod sticker;
