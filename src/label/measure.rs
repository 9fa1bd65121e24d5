//! # Text Box Estimation
//!
//! Approximates the box a text field occupies on the editor canvas.
//!
//! ## Heuristic
//!
//! ```text
//! avg_char_width = 0.6 × font_size_pt
//! raw_width      = chars × avg_char_width
//!
//! fits:   width = max(raw_width, 60)        height = font_size + 4
//! wraps:  chars_per_line = ⌊max_width / avg_char_width⌋
//!         lines  = ⌈chars / chars_per_line⌉
//!         width  = max_width                height = (font_size + 4) × lines
//!
//! centered text gets +40 px of width
//! ```
//!
//! This is a layout hint for the canvas only. The printed label wraps with
//! CSS, which measures real glyphs, so the two can disagree.

use super::types::TextAlign;

/// Width of one average glyph, as a fraction of the font size.
pub const AVG_CHAR_WIDTH_RATIO: f32 = 0.6;

/// No text box is ever narrower than this (virtual px).
pub const MIN_TEXT_WIDTH: f32 = 60.0;

/// Extra width given to centered text so it has room to center.
pub const CENTER_PADDING: f32 = 40.0;

/// Vertical breathing room added to each line (virtual px).
pub const LINE_PADDING: f32 = 4.0;

/// Estimated box for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub width: f32,
    pub height: f32,
    pub line_count: usize,
}

/// Estimate the box of `text` at `font_size_pt`, wrapping past `max_width`.
pub fn estimate(text: &str, font_size_pt: f32, align: TextAlign, max_width: f32) -> TextBox {
    let font_size = font_size_pt.max(0.0);
    let max_width = max_width.max(0.0);
    let avg_char_width = font_size * AVG_CHAR_WIDTH_RATIO;
    let chars = text.chars().count();
    let raw_width = chars as f32 * avg_char_width;
    let line_height = font_size + LINE_PADDING;

    let (width, line_count) = if raw_width <= max_width {
        (raw_width.max(MIN_TEXT_WIDTH), 1)
    } else {
        let chars_per_line = ((max_width / avg_char_width).floor() as usize).max(1);
        (max_width.max(MIN_TEXT_WIDTH), chars.div_ceil(chars_per_line))
    };

    let width = match align {
        TextAlign::Center => width + CENTER_PADDING,
        TextAlign::Left => width,
    };

    TextBox {
        width,
        height: line_height * line_count as f32,
        line_count,
    }
}
