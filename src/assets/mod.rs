//! Source photo decoding and glyph SVG rasterization.

pub(crate) mod decode;
pub(crate) mod svg_raster;
