//! Fitting area names inside their polygons.
//!
//! A label is one word per line, centred as a block on an anchor point.
//! The font is the largest size whose widest word and total block height fit
//! a share of the area's bounding box; overlong words are shortened with an
//! ellipsis, with one retry at a smaller fallback size.

use crate::options::RenderOptions;
use crate::surface::Surface;
use kurbo::{Point, Rect};
use thiserror::Error;

const ELLIPSIS: char = '\u{2026}';

/// The label cannot be made to fit its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("label does not fit its area")]
pub struct LabelOverflow;

/// A fitted label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub font_size: f64,
    /// Distance between consecutive line centres.
    pub line_height: f64,
    pub lines: Vec<String>,
}

impl LabelLayout {
    /// Total height of the block.
    pub fn block_height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }

    /// Each line with the centre point it is drawn at, block centred on `anchor`.
    pub fn positioned_lines(&self, anchor: Point) -> impl Iterator<Item = (&str, Point)> {
        let top = anchor.y - self.block_height() / 2.0 + self.line_height / 2.0;
        self.lines
            .iter()
            .enumerate()
            .map(move |(i, line)| (line.as_str(), Point::new(anchor.x, top + i as f64 * self.line_height)))
    }
}

fn text_width<S: Surface + ?Sized>(surface: &mut S, text: &str, font_size: f64) -> f64 {
    surface.set_font_size(font_size);
    surface.measure_text(text)
}

fn widest_word<S: Surface + ?Sized>(surface: &mut S, words: &[&str], font_size: f64) -> f64 {
    words
        .iter()
        .map(|w| text_width(surface, w, font_size))
        .fold(0.0, f64::max)
}

/// Largest size in `[min, max]` (whole steps down from `max`) that satisfies both ratios.
fn choose_font_size<S: Surface + ?Sized>(surface: &mut S, words: &[&str], bounds: Rect, options: &RenderOptions) -> f64 {
    let max_width = bounds.width() * options.label_width_ratio;
    let max_height = bounds.height() * options.label_height_ratio;
    let lines = words.len() as f64;

    let mut candidate = options.max_font_size;
    while candidate >= options.min_font_size {
        let block_height = lines * candidate * options.line_height;
        if block_height <= max_height && widest_word(surface, words, candidate) <= max_width {
            return candidate;
        }
        candidate -= 1.0;
    }
    options.min_font_size
}

/// Shorten one word with a trailing ellipsis until it fits `limit`.
///
/// `None` when fewer than `min_chars` characters would survive.
fn truncate_word<S: Surface + ?Sized>(
    surface: &mut S,
    word: &str,
    font_size: f64,
    limit: f64,
    min_chars: usize,
) -> Option<String> {
    if text_width(surface, word, font_size) <= limit {
        return Some(word.to_string());
    }

    let chars: Vec<char> = word.chars().collect();
    for keep in (1..chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push(ELLIPSIS);
        if text_width(surface, &candidate, font_size) <= limit {
            return (keep >= min_chars).then_some(candidate);
        }
    }
    None
}

fn fit_lines<S: Surface + ?Sized>(
    surface: &mut S,
    words: &[&str],
    font_size: f64,
    limit: f64,
    min_chars: usize,
) -> Option<Vec<String>> {
    words
        .iter()
        .map(|w| truncate_word(surface, w, font_size, limit, min_chars))
        .collect()
}

/// Fit `text` inside `bounds` (surface units).
///
/// Measures through `surface`, which is left at the chosen font size.
pub fn fit_label<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    bounds: Rect,
    options: &RenderOptions,
) -> Result<LabelLayout, LabelOverflow> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err(LabelOverflow);
    }

    let limit = bounds.width() * options.truncate_width_ratio;
    let font_size = choose_font_size(surface, &words, bounds, options);

    let mut attempts = vec![font_size];
    if options.fallback_font_size < font_size {
        attempts.push(options.fallback_font_size);
    }

    for size in attempts {
        if let Some(lines) = fit_lines(surface, &words, size, limit, options.min_truncated_chars) {
            surface.set_font_size(size);
            return Ok(LabelLayout {
                font_size: size,
                line_height: size * options.line_height,
                lines,
            });
        }
    }
    Err(LabelOverflow)
}
