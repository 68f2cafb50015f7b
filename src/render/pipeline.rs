use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::assets::decode::probe_source;
use crate::composition::model::{
    SourceFrame, StickerPlacement, StripRequest, Theme, validate_frame_count,
};
use crate::config::StripSettings;
use crate::encode::png::{encode_png, png_data_uri};
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{PikuraError, PikuraResult};
use crate::layout::geometry::GeometryPlan;
use crate::render::compositor::{PlacedSticker, composite_strip};
use crate::render::normalize::normalize_frame;
use crate::render::sticker::{GlyphRasterizer, SvgGlyphRasterizer, rasterize_sticker};

/// Cooperative cancellation handle for one invocation.
///
/// Cancelling before the compositing barrier abandons the invocation and drops every intermediate
/// buffer. Once compositing has started the strip is finished regardless.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// New, not-cancelled flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// `true` once [`CancelFlag::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> PikuraResult<()> {
        if self.is_cancelled() {
            return Err(PikuraError::Cancelled);
        }
        Ok(())
    }
}

/// A sticker left out of the strip because its glyph could not be drawn.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SkippedSticker {
    /// Client id, or `#<position>` when the record had none.
    pub id: String,
    /// Position in the request's sticker list.
    pub position: usize,
    /// Why the glyph failed.
    pub reason: String,
}

/// Composited strip before encoding.
#[derive(Clone, Debug)]
pub struct StripRender {
    /// Final canvas, premultiplied RGBA8.
    pub raster: RasterBuffer,
    /// Layout used for this strip.
    pub plan: GeometryPlan,
    /// Stickers that were skipped, in list order.
    pub skipped: Vec<SkippedSticker>,
}

/// Encoded strip.
#[derive(Clone, Debug)]
pub struct StripOutput {
    /// PNG bytes.
    pub png: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Stickers that were skipped, in list order.
    pub skipped: Vec<SkippedSticker>,
}

impl StripOutput {
    /// `data:image/png;base64,...` form of [`StripOutput::png`].
    pub fn data_uri(&self) -> String {
        png_data_uri(&self.png)
    }
}

/// Reusable strip generator.
///
/// Holds the glyph source (whose font database is expensive to load) and the worker pool, so one
/// engine can serve many requests.
pub struct StripEngine {
    glyphs: Arc<dyn GlyphRasterizer>,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for StripEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripEngine")
            .field(
                "threads",
                &self.pool.as_ref().map(|p| p.current_num_threads()),
            )
            .finish_non_exhaustive()
    }
}

impl StripEngine {
    /// Engine drawing glyphs with [`SvgGlyphRasterizer`].
    pub fn new(settings: &StripSettings) -> PikuraResult<Self> {
        Self::with_glyphs(settings, Arc::new(SvgGlyphRasterizer::new(settings)))
    }

    /// Engine drawing glyphs with a caller-supplied source.
    pub fn with_glyphs(
        settings: &StripSettings,
        glyphs: Arc<dyn GlyphRasterizer>,
    ) -> PikuraResult<Self> {
        let pool = if settings.parallel {
            Some(settings.build_thread_pool()?)
        } else {
            None
        };
        Ok(Self { glyphs, pool })
    }

    /// Render and encode a strip.
    pub fn generate(&self, request: StripRequest) -> PikuraResult<StripOutput> {
        self.generate_with_cancel(request, &CancelFlag::new())
    }

    /// Render and encode a strip, honoring `cancel` up to the compositing barrier.
    pub fn generate_with_cancel(
        &self,
        request: StripRequest,
        cancel: &CancelFlag,
    ) -> PikuraResult<StripOutput> {
        let render = self.render_with_cancel(request, cancel)?;
        let started = Instant::now();
        let png = encode_png(&render.raster)?;
        tracing::debug!(
            bytes = png.len(),
            ms = started.elapsed().as_millis() as u64,
            "encoded strip"
        );
        Ok(StripOutput {
            png,
            width: render.raster.width(),
            height: render.raster.height(),
            skipped: render.skipped,
        })
    }

    /// Render a strip without encoding it.
    pub fn render(&self, request: StripRequest) -> PikuraResult<StripRender> {
        self.render_with_cancel(request, &CancelFlag::new())
    }

    /// Render a strip without encoding it, honoring `cancel` up to the compositing barrier.
    #[tracing::instrument(
        skip_all,
        fields(
            frames = request.frames.len(),
            stickers = request.stickers.len(),
            theme = %request.theme
        )
    )]
    pub fn render_with_cancel(
        &self,
        request: StripRequest,
        cancel: &CancelFlag,
    ) -> PikuraResult<StripRender> {
        let StripRequest {
            frames,
            theme,
            stickers,
        } = request;

        validate_frame_count(frames.len())?;
        cancel.check()?;

        let sources = frames
            .into_iter()
            .enumerate()
            .map(|(i, bytes)| probe_source(i, bytes))
            .collect::<PikuraResult<Vec<_>>>()?;
        let widths: Vec<u32> = sources.iter().map(|s| s.width).collect();
        let plan = GeometryPlan::from_source_widths(&widths)?;
        tracing::debug!(
            frame_width = plan.frame_width,
            frame_height = plan.frame_height,
            strip_width = plan.strip_width,
            strip_height = plan.strip_height,
            sticker_size = plan.sticker_pixel_size,
            "planned strip geometry"
        );

        let started = Instant::now();
        let glyphs: &dyn GlyphRasterizer = self.glyphs.as_ref();
        let (frame_results, sticker_results) = match &self.pool {
            Some(pool) => pool.install(|| {
                rayon::join(
                    || normalize_all(&sources, &plan, theme, cancel, true),
                    || rasterize_all(&stickers, &plan, glyphs, cancel, true),
                )
            }),
            None => (
                normalize_all(&sources, &plan, theme, cancel, false),
                rasterize_all(&stickers, &plan, glyphs, cancel, false),
            ),
        };
        drop(sources);

        // Barrier: every task has finished before anything is composited.
        cancel.check()?;
        let frames = frame_results
            .into_iter()
            .collect::<PikuraResult<Vec<_>>>()?;

        let mut placed = Vec::with_capacity(stickers.len());
        let mut skipped = Vec::new();
        for (position, result) in sticker_results.into_iter().enumerate() {
            match result {
                Ok(sticker) => placed.push(sticker),
                Err(PikuraError::GlyphRender { sticker_id, reason }) => {
                    tracing::warn!(sticker = %sticker_id, %reason, "skipping sticker");
                    skipped.push(SkippedSticker {
                        id: sticker_id,
                        position,
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        tracing::debug!(
            ms = started.elapsed().as_millis() as u64,
            placed = placed.len(),
            skipped = skipped.len(),
            "frames normalized and stickers rasterized"
        );

        let raster = composite_strip(theme.background(), &plan, frames, placed)?;
        tracing::info!(
            width = raster.width(),
            height = raster.height(),
            skipped = skipped.len(),
            "strip composited"
        );
        Ok(StripRender {
            raster,
            plan,
            skipped,
        })
    }
}

fn normalize_all(
    sources: &[SourceFrame],
    plan: &GeometryPlan,
    theme: Theme,
    cancel: &CancelFlag,
    parallel: bool,
) -> Vec<PikuraResult<RasterBuffer>> {
    let run = |source: &SourceFrame| -> PikuraResult<RasterBuffer> {
        cancel.check()?;
        normalize_frame(source, plan, theme)
    };
    if parallel {
        sources.par_iter().map(run).collect()
    } else {
        sources.iter().map(run).collect()
    }
}

fn rasterize_all(
    stickers: &[StickerPlacement],
    plan: &GeometryPlan,
    glyphs: &dyn GlyphRasterizer,
    cancel: &CancelFlag,
    parallel: bool,
) -> Vec<PikuraResult<PlacedSticker>> {
    let run = |(position, placement): (usize, &StickerPlacement)| -> PikuraResult<PlacedSticker> {
        cancel.check()?;
        let raster = rasterize_sticker(placement, position, plan, glyphs)?;
        let (left, top) = plan.sticker_offset(placement);
        Ok(PlacedSticker { raster, left, top })
    };
    if parallel {
        stickers.par_iter().enumerate().map(run).collect()
    } else {
        stickers.iter().enumerate().map(run).collect()
    }
}

/// One-shot helper: build an engine from `settings` and generate a strip.
///
/// Prefer [`StripEngine`] when generating more than one strip, since it keeps the loaded fonts.
pub fn generate_strip(
    request: StripRequest,
    settings: &StripSettings,
) -> PikuraResult<StripOutput> {
    StripEngine::new(settings)?.generate(request)
}

/// One-shot helper returning the composited raster without encoding it.
pub fn render_strip(request: StripRequest, settings: &StripSettings) -> PikuraResult<StripRender> {
    StripEngine::new(settings)?.render(request)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
