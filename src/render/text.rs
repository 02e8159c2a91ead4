//! Fonts, truncation, and aligned text drawing

use ab_glyph::{FontRef, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

use super::RenderError;

/// Marker appended to truncated text.
pub(crate) const ELLIPSIS: &str = "...";

/// The embedded font faces used on a document. Sans faces carry labels and
/// names, mono faces carry account numbers and identifiers.
pub(crate) struct FontSet {
    pub sans: FontRef<'static>,
    pub sans_bold: FontRef<'static>,
    pub mono: FontRef<'static>,
    pub mono_bold: FontRef<'static>,
}

impl FontSet {
    pub fn load() -> Result<Self, RenderError> {
        Ok(Self {
            sans: load_font(
                include_bytes!("../../assets/fonts/DejaVuSans.ttf"),
                "DejaVuSans",
            )?,
            sans_bold: load_font(
                include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf"),
                "DejaVuSans-Bold",
            )?,
            mono: load_font(
                include_bytes!("../../assets/fonts/DejaVuSansMono.ttf"),
                "DejaVuSansMono",
            )?,
            mono_bold: load_font(
                include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf"),
                "DejaVuSansMono-Bold",
            )?,
        })
    }
}

fn load_font(bytes: &'static [u8], name: &'static str) -> Result<FontRef<'static>, RenderError> {
    FontRef::try_from_slice(bytes).map_err(|_| RenderError::FontUnavailable(name))
}

/// Cut `text` to an exact character budget, appending the ellipsis marker.
///
/// The result is exactly `budget` characters long when truncation applies;
/// shorter text passes through unmodified. Counting is char-based so
/// Cyrillic names truncate safely.
pub(crate) fn truncate_field(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let keep = budget.saturating_sub(ELLIPSIS.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}

#[derive(Clone, Copy)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

/// Draw `text` at the given size, anchored left, centered, or right on `x`.
pub(crate) fn draw_string(
    canvas: &mut RgbaImage,
    color: Rgba<u8>,
    x: i32,
    y: i32,
    size: f32,
    font: &FontRef<'static>,
    text: &str,
    align: Align,
) {
    if text.is_empty() {
        return;
    }
    let scale = PxScale::from(size);
    let x = match align {
        Align::Left => x,
        Align::Center => {
            let (w, _) = text_size(scale, font, text);
            x - (w as i32) / 2
        }
        Align::Right => {
            let (w, _) = text_size(scale, font, text);
            x - w as i32
        }
    };
    draw_text_mut(canvas, color, x, y, scale, font, text);
}
