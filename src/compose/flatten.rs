//! Flattening a composition tree into a cell grid.
//!
//! [`compose`] resolves every visible region against the terminal extent and
//! paints it into a blank [`Grid`] in z-order, lowest first, so overlapping
//! regions simply overwrite. All cascade resolution happens here; the grid
//! that comes out carries final colours and styles only.

use unicode_width::UnicodeWidthChar;

use crate::color::Colors;
use crate::compose::wrap::wrap_line;
use crate::compose::{cascade, Composition, Line, Region};
use crate::screen::grid::{Cell, Grid};
use crate::terminal::Extent;

/// Flatten the composition into a grid covering the whole extent.
pub fn compose(composition: &Composition, extent: Extent) -> Grid {
    let mut grid = Grid::blank(extent.width, extent.height);
    for region in composition.paint_order() {
        if !region.visible {
            continue;
        }
        paint_region(region, extent, &mut grid);
    }
    grid
}

fn paint_region(region: &Region, extent: Extent, grid: &mut Grid) {
    let rect = region.geometry.resolve(extent);
    if rect.is_empty() {
        return;
    }
    let width = rect.width();
    let height = rect.height();

    let lines: Vec<Line> = if region.wrap {
        region
            .lines
            .iter()
            .flat_map(|line| wrap_line(line, width))
            .collect()
    } else {
        region.lines.clone()
    };

    // Lines past the region's bottom edge are clipped, never scrolled.
    for row in 0..height {
        let line = lines.get(row as usize);
        let y = rect.y - 1 + row;
        let painted = match line {
            Some(line) => paint_line(line, region, rect.x - 1, y, width, grid),
            None => 0,
        };

        // Pad to the region edge so stale underlying cells are overwritten.
        let pad = match line {
            Some(line) => Colors::new(None, line.colors.or(region.colors).bg),
            None => Colors::new(None, region.colors.bg),
        };
        for col in painted..width {
            grid.set(rect.x - 1 + col, y, Cell::blank_with(pad));
        }
    }
}

/// Paint one line's streams left to right, truncating at the region edge.
/// Returns the number of columns written.
fn paint_line(line: &Line, region: &Region, x0: u16, y: u16, width: u16, grid: &mut Grid) -> u16 {
    let mut col = 0u16;
    for stream in &line.streams {
        let (colors, style) = cascade(stream, line, region);
        for ch in stream.text.chars() {
            let Some(ch_width) = ch.width() else {
                continue; // control characters never reach the grid
            };
            if ch_width == 0 {
                continue;
            }
            if col + ch_width as u16 > width {
                return col;
            }
            grid.set(x0 + col, y, Cell::new(ch, colors, style));
            if ch_width == 2 {
                grid.set(x0 + col + 1, y, Cell::continuation(colors, style));
            }
            col += ch_width as u16;
        }
    }
    col
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Rgb, Style};
    use crate::compose::Stream;
    use crate::geometry::Geometry;

    const TERM: Extent = Extent::new(20, 6);

    fn region_at(name: &str, x: u16, y: u16, w: u16, h: u16) -> Region {
        Region::new(name).geometry(Geometry::new().at(x, y).size(w, h))
    }

    #[test]
    fn test_lines_land_at_region_origin() {
        let composition = Composition::new().with(
            region_at("main", 3, 2, 10, 2).line("hello").line("world"),
        );
        let grid = compose(&composition, TERM);
        assert_eq!(&grid.row_text(1)[2..7], "hello");
        assert_eq!(&grid.row_text(2)[2..7], "world");
    }

    #[test]
    fn test_overlong_line_truncates_at_region_edge() {
        let composition =
            Composition::new().with(region_at("main", 1, 1, 5, 1).line("overflowing"));
        let grid = compose(&composition, TERM);
        assert_eq!(&grid.row_text(0)[..6], "overf ");
    }

    #[test]
    fn test_excess_lines_are_clipped() {
        let composition = Composition::new()
            .with(region_at("main", 1, 1, 5, 2).line("one").line("two").line("three"));
        let grid = compose(&composition, TERM);
        assert_eq!(&grid.row_text(1)[..3], "two");
        assert_eq!(grid.row_text(2).trim_end(), "");
    }

    #[test]
    fn test_rows_pad_with_region_background() {
        let bg = Rgb::new(0, 0, 128);
        let composition = Composition::new()
            .with(region_at("main", 1, 1, 6, 2).colors(Colors::bg(bg)).line("ab"));
        let grid = compose(&composition, TERM);
        // Written cells and padding both carry the region background.
        for x in 0..6 {
            assert_eq!(grid.get(x, 0).unwrap().bg, Some(bg), "col {x}");
            assert_eq!(grid.get(x, 1).unwrap().bg, Some(bg), "col {x}");
        }
        assert_eq!(grid.get(6, 0).unwrap().bg, None);
    }

    #[test]
    fn test_higher_zindex_paints_over() {
        let composition = Composition::new()
            .with(region_at("top", 1, 1, 5, 1).zindex(1).line("AAAAA"))
            .with(region_at("under", 1, 1, 5, 1).line("bbbbb"));
        let grid = compose(&composition, TERM);
        assert_eq!(&grid.row_text(0)[..5], "AAAAA");
    }

    #[test]
    fn test_invisible_region_paints_nothing() {
        let mut region = region_at("gone", 1, 1, 5, 1).line("xxxxx");
        region.visible = false;
        let grid = compose(&Composition::new().with(region), TERM);
        assert_eq!(grid, Grid::blank(TERM.width, TERM.height));
    }

    #[test]
    fn test_cascade_reaches_cells() {
        let region_fg = Rgb::new(10, 10, 10);
        let stream_fg = Rgb::new(200, 0, 0);
        let line = Line::new(vec![
            Stream::new("ab"),
            Stream::new("cd").colors(Colors::fg(stream_fg)).style(Style::BOLD),
        ]);
        let composition = Composition::new()
            .with(region_at("main", 1, 1, 6, 1).colors(Colors::fg(region_fg)).line(line));
        let grid = compose(&composition, TERM);
        assert_eq!(grid.get(0, 0).unwrap().fg, Some(region_fg));
        assert_eq!(grid.get(2, 0).unwrap().fg, Some(stream_fg));
        assert_eq!(grid.get(2, 0).unwrap().style, Style::BOLD);
    }

    #[test]
    fn test_wide_char_writes_continuation() {
        let composition = Composition::new().with(region_at("main", 1, 1, 6, 1).line("界x"));
        let grid = compose(&composition, TERM);
        assert_eq!(grid.get(0, 0).unwrap().ch, '界');
        assert!(grid.get(1, 0).unwrap().is_continuation());
        assert_eq!(grid.get(2, 0).unwrap().ch, 'x');
    }

    #[test]
    fn test_wide_char_never_splits_at_edge() {
        // Width 3: 'x' fits, '界' needs two columns and only one remains.
        let composition = Composition::new().with(region_at("main", 1, 1, 3, 1).line("xx界"));
        let grid = compose(&composition, TERM);
        assert_eq!(&grid.row_text(0)[..3], "xx ");
    }

    #[test]
    fn test_wrapped_region_breaks_at_words() {
        let composition = Composition::new()
            .with(region_at("main", 1, 1, 10, 3).wrap(true).line("the quick brown fox"));
        let grid = compose(&composition, TERM);
        assert_eq!(grid.row_text(0).trim_end(), "the quick");
        assert_eq!(grid.row_text(1).trim_end(), "brown fox");
    }

    #[test]
    fn test_region_clipped_at_terminal_edge() {
        let composition = Composition::new()
            .with(region_at("main", 18, 6, 10, 3).line("wide"));
        let grid = compose(&composition, TERM);
        // Only the columns inside the terminal are written.
        assert_eq!(&grid.row_text(5)[17..], "wid");
    }
}
