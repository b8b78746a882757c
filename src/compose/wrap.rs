//! Word wrapping for region content.
//!
//! Regions truncate overlong lines by default; with `wrap` enabled their
//! streams are re-broken at word boundaries first. Breaking works on display
//! columns, not bytes: widths come from `unicode-width` and boundaries from
//! `unicode-segmentation`, so a grapheme is never split and a double-width
//! character never ends up half on a row.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::compose::{Line, Stream};

/// Re-break a line's streams into as many lines as fit in `width` columns.
/// Stream colours and styles travel with their text; line-level attributes
/// are copied onto every produced line.
pub fn wrap_line(line: &Line, width: u16) -> Vec<Line> {
    if width == 0 {
        return Vec::new();
    }
    let width = width as usize;

    // Tokens tagged with the stream they came from, so styling survives.
    let mut tokens: Vec<(&str, usize)> = Vec::new();
    for (i, stream) in line.streams.iter().enumerate() {
        for word in stream.text.split_word_bounds() {
            tokens.push((word, i));
        }
    }

    let mut rows: Vec<Vec<(String, usize)>> = Vec::new();
    let mut row: Vec<(String, usize)> = Vec::new();
    let mut used = 0usize;

    let mut flush = |row: &mut Vec<(String, usize)>, used: &mut usize| {
        // Trailing whitespace would render as ghost cells at the break.
        while matches!(row.last(), Some((t, _)) if t.trim().is_empty()) {
            row.pop();
        }
        rows.push(std::mem::take(row));
        *used = 0;
    };

    for (token, stream_index) in tokens {
        let token_width = token.width();
        if used + token_width <= width {
            row.push((token.to_string(), stream_index));
            used += token_width;
            continue;
        }
        if token.trim().is_empty() {
            // The break swallows the whitespace that caused it.
            flush(&mut row, &mut used);
            continue;
        }
        if token_width <= width {
            flush(&mut row, &mut used);
            row.push((token.to_string(), stream_index));
            used = token_width;
            continue;
        }
        // A single word wider than the region: hard-break at graphemes.
        for grapheme in token.graphemes(true) {
            let grapheme_width = grapheme.width();
            if used + grapheme_width > width {
                flush(&mut row, &mut used);
            }
            row.push((grapheme.to_string(), stream_index));
            used += grapheme_width;
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(Vec::new());
    }

    rows.into_iter()
        .map(|row| {
            let mut out = Line {
                streams: Vec::new(),
                colors: line.colors,
                style: line.style,
            };
            for (text, stream_index) in row {
                let source = &line.streams[stream_index];
                match out.streams.last_mut() {
                    // Merge runs that came from the same source stream.
                    Some(last) if last.colors == source.colors && last.style == source.style => {
                        last.text.push_str(&text);
                    }
                    _ => out.streams.push(Stream {
                        text,
                        colors: source.colors,
                        style: source.style,
                    }),
                }
            }
            out
        })
        .collect()
}
