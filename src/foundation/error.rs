/// Convenience result type used across Pikura.
pub type PikuraResult<T> = Result<T, PikuraError>;

/// Top-level error taxonomy used by the strip engine.
///
/// Every variant except [`PikuraError::GlyphRender`] aborts the invocation. Glyph failures are
/// collected per sticker and reported next to the finished strip.
#[derive(thiserror::Error, Debug)]
pub enum PikuraError {
    /// No source photographs were supplied.
    #[error("no frames: at least one photo is required")]
    NoFrames,

    /// More source photographs than a strip can hold.
    #[error("too many frames: got {count}, at most {max} are allowed")]
    TooManyFrames {
        /// Number of frames supplied.
        count: usize,
        /// Maximum accepted frame count.
        max: usize,
    },

    /// A source photograph could not be decoded.
    #[error("decode error: frame {frame_index}: {source}")]
    Decode {
        /// Index of the offending frame in input order.
        frame_index: usize,
        /// Underlying decoder failure.
        #[source]
        source: anyhow::Error,
    },

    /// The sticker list was present but is not valid JSON of the expected shape.
    #[error("sticker json error: {0}")]
    StickerJson(String),

    /// A single sticker glyph could not be rasterized.
    #[error("glyph render error: sticker {sticker_id}: {reason}")]
    GlyphRender {
        /// Identifier of the sticker that was skipped.
        sticker_id: String,
        /// Human-readable cause.
        reason: String,
    },

    /// Serializing the finished strip failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid settings or internal arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel buffer could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// The invocation was abandoned before compositing.
    #[error("cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Stable, machine-readable error kind for callers at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`PikuraError::NoFrames`].
    NoFrames,
    /// See [`PikuraError::TooManyFrames`].
    TooManyFrames,
    /// See [`PikuraError::Decode`].
    Decode,
    /// See [`PikuraError::StickerJson`].
    StickerJson,
    /// See [`PikuraError::GlyphRender`].
    GlyphRender,
    /// See [`PikuraError::Encode`].
    Encode,
    /// See [`PikuraError::Validation`].
    Validation,
    /// See [`PikuraError::Allocation`].
    Allocation,
    /// See [`PikuraError::Cancelled`].
    Cancelled,
    /// See [`PikuraError::Other`].
    Other,
}

impl ErrorKind {
    /// Snake-case identifier, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoFrames => "no_frames",
            Self::TooManyFrames => "too_many_frames",
            Self::Decode => "decode",
            Self::StickerJson => "sticker_json",
            Self::GlyphRender => "glyph_render",
            Self::Encode => "encode",
            Self::Validation => "validation",
            Self::Allocation => "allocation",
            Self::Cancelled => "cancelled",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PikuraError {
    /// Build a [`PikuraError::Decode`] value.
    pub fn decode(frame_index: usize, source: impl Into<anyhow::Error>) -> Self {
        Self::Decode {
            frame_index,
            source: source.into(),
        }
    }

    /// Build a [`PikuraError::StickerJson`] value.
    pub fn sticker_json(msg: impl Into<String>) -> Self {
        Self::StickerJson(msg.into())
    }

    /// Build a [`PikuraError::GlyphRender`] value.
    pub fn glyph_render(sticker_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::GlyphRender {
            sticker_id: sticker_id.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`PikuraError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PikuraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PikuraError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoFrames => ErrorKind::NoFrames,
            Self::TooManyFrames { .. } => ErrorKind::TooManyFrames,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::StickerJson(_) => ErrorKind::StickerJson,
            Self::GlyphRender { .. } => ErrorKind::GlyphRender,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Allocation(_) => ErrorKind::Allocation,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// `false` only for failures that skip a single sticker.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::GlyphRender { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
