//! Pikura assembles photographs into a single photo-booth strip.
//!
//! A strip is up to four photos stacked vertically on a themed background, decorated with emoji
//! stickers placed by percent coordinates on individual frames, and delivered as a PNG.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: source widths + frame count -> [`GeometryPlan`] (frame size, canvas size, offsets)
//! 2. **Normalize** (fan-out): each photo is letterboxed into an opaque frame-sized buffer
//! 3. **Rasterize** (fan-out): each sticker glyph is drawn into a transparent square buffer
//! 4. **Composite** (barrier): background, then frames in order, then stickers in order
//! 5. **Encode**: PNG bytes, optionally as a `data:` URI
//!
//! Steps 2 and 3 run concurrently on a `rayon` pool; compositing starts only after both finish.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce byte-identical PNG output, parallel or not.
//! - **Premultiplied RGBA8** end-to-end; the encoder converts to straight alpha.
//! - **Soft sticker failures**: a glyph that cannot be drawn is skipped and reported, never fatal.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod composition;
mod config;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;

pub use assets::decode::{MAX_SOURCE_DIM, decode_source, probe_source};
pub use assets::svg_raster::{EMOJI_FONT_FAMILIES, GLYPH_FONT_SIZE, glyph_svg_document};
pub use composition::model::{
    MAX_FRAMES, STICKER_GALLERY, SourceFrame, StickerPlacement, StripRequest, Theme,
    parse_stickers, validate_frame_count,
};
pub use config::StripSettings;
pub use encode::png::{PNG_MIME, encode_png, png_data_uri};
pub use foundation::core::{RasterBuffer, Rgba8, Rgba8Premul};
pub use foundation::error::{ErrorKind, PikuraError, PikuraResult};
pub use layout::geometry::{
    FRAME_ASPECT, FRAME_GAP, GeometryPlan, MAX_FRAME_WIDTH, MIN_FRAME_WIDTH, STICKER_SIZE_RATIO,
    STRIP_PADDING,
};
pub use render::compositor::{PlacedSticker, composite_strip};
pub use render::normalize::{ContainFit, contain_fit, normalize_frame};
pub use render::pipeline::{
    CancelFlag, SkippedSticker, StripEngine, StripOutput, StripRender, generate_strip,
    render_strip,
};
pub use render::sticker::{GlyphRasterizer, SvgGlyphRasterizer, rasterize_sticker};
