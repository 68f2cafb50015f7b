use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{PikuraError, PikuraResult};

/// Maximum number of photos in one strip.
pub const MAX_FRAMES: usize = 4;

/// Stock sticker emoji offered by the editor.
pub const STICKER_GALLERY: [&str; 8] = ["✨", "💖", "🌸", "😺", "⭐", "🎀", "🩷", "💫"];

/// Fixed visual style of a strip.
///
/// Each theme maps to one opaque background color used both as canvas fill and as letterbox fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// White background.
    Plain,
    /// Soft pink background.
    #[default]
    Pastel,
    /// Dark slate background.
    Midnight,
}

impl Theme {
    /// Every theme, in display order.
    pub const ALL: [Theme; 3] = [Theme::Plain, Theme::Pastel, Theme::Midnight];

    /// Wire identifier (`"plain"`, `"pastel"`, `"midnight"`).
    pub fn id(self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Pastel => "pastel",
            Theme::Midnight => "midnight",
        }
    }

    /// Strict parse of a wire identifier.
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Lenient parse: absent or unknown identifiers fall back to [`Theme::Pastel`].
    pub fn from_id_or_default(id: Option<&str>) -> Self {
        match id {
            None => Self::default(),
            Some(s) => Self::parse(s).unwrap_or_else(|| {
                tracing::warn!(theme = s, "unknown theme id, using default");
                Self::default()
            }),
        }
    }

    /// Opaque background color.
    pub fn background(self) -> Rgba8 {
        match self {
            Theme::Plain => Rgba8::opaque(255, 255, 255),
            Theme::Pastel => Rgba8::opaque(255, 240, 250),
            Theme::Midnight => Rgba8::opaque(15, 23, 42),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for Theme {
    type Err = PikuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| PikuraError::validation(format!("unknown theme '{s}'")))
    }
}

/// One sticker placed by the user.
///
/// `x_pct`/`y_pct` are percentages of the *frame* (not the strip) and are not clamped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerPlacement {
    /// Client-assigned identifier, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Frame the sticker sits on, in current frame order.
    pub frame_index: i64,
    /// Single emoji text unit.
    pub emoji: String,
    /// Horizontal center, percent of frame width.
    pub x_pct: f64,
    /// Vertical center, percent of frame height.
    pub y_pct: f64,
}

impl StickerPlacement {
    /// Placement without a client id.
    pub fn new(frame_index: i64, emoji: impl Into<String>, x_pct: f64, y_pct: f64) -> Self {
        Self {
            id: None,
            frame_index,
            emoji: emoji.into(),
            x_pct,
            y_pct,
        }
    }

    /// Attach a client id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Identifier used in reports: the client id, or `#<position>` in the sticker list.
    pub fn sticker_id(&self, position: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => format!("#{position}"),
        }
    }
}

/// Parse the JSON-encoded sticker list.
///
/// `None` (field absent) yields an empty list. Present but malformed input is an error, never an
/// empty list.
pub fn parse_stickers(json: Option<&str>) -> PikuraResult<Vec<StickerPlacement>> {
    let Some(json) = json else {
        return Ok(Vec::new());
    };
    serde_json::from_str::<Vec<StickerPlacement>>(json)
        .map_err(|e| PikuraError::sticker_json(e.to_string()))
}

/// Encoded bytes of one uploaded photograph plus its decoded dimensions.
#[derive(Clone, Debug)]
pub struct SourceFrame {
    /// Position in the strip (0 = top).
    pub index: usize,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Decoded width in pixels.
    pub width: u32,
    /// Decoded height in pixels.
    pub height: u32,
}

/// One strip-generation request, already parsed from the boundary representation.
#[derive(Clone, Debug, Default)]
pub struct StripRequest {
    /// Encoded photographs, top to bottom.
    pub frames: Vec<Vec<u8>>,
    /// Background theme.
    pub theme: Theme,
    /// Stickers in placement order (later ones draw on top).
    pub stickers: Vec<StickerPlacement>,
}

impl StripRequest {
    /// Build a request from raw boundary fields.
    ///
    /// - `theme`: absent or unknown ⇒ [`Theme::Pastel`]
    /// - `stickers_json`: absent ⇒ no stickers, malformed ⇒ [`PikuraError::StickerJson`]
    ///
    /// Frame count is validated first, so a request with no photos fails with
    /// [`PikuraError::NoFrames`] regardless of the other fields.
    pub fn from_parts(
        frames: Vec<Vec<u8>>,
        theme: Option<&str>,
        stickers_json: Option<&str>,
    ) -> PikuraResult<Self> {
        validate_frame_count(frames.len())?;
        let stickers = parse_stickers(stickers_json)?;
        Ok(Self {
            frames,
            theme: Theme::from_id_or_default(theme),
            stickers,
        })
    }
}

/// Reject empty strips and strips longer than [`MAX_FRAMES`].
pub fn validate_frame_count(count: usize) -> PikuraResult<()> {
    if count == 0 {
        return Err(PikuraError::NoFrames);
    }
    if count > MAX_FRAMES {
        return Err(PikuraError::TooManyFrames {
            count,
            max: MAX_FRAMES,
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
