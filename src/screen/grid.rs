//! The dense cell grid.
//!
//! A [`Grid`] is the flattened form of a composition: one [`Cell`] per
//! terminal position, fully resolved colours and style, no tree structure
//! left. Storage is 0-based row-major; the 1-based terminal coordinates only
//! reappear when the compressor prints cursor moves.

use crate::color::{Colors, Rgb, Style};

/// Marks the trailing column of a double-width character. The compressor
/// skips these when printing because the terminal advances two columns on
/// its own.
pub const CONTINUATION: char = '\0';

/// One terminal cell: a character plus its fully resolved presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub style: Style,
}

impl Cell {
    pub const BLANK: Self = Self {
        ch: ' ',
        fg: None,
        bg: None,
        style: Style::empty(),
    };

    pub fn new(ch: char, colors: Colors, style: Style) -> Self {
        Self { ch, fg: colors.fg, bg: colors.bg, style }
    }

    /// A space carrying only a background, used to pad rows out to the
    /// region edge.
    pub fn blank_with(colors: Colors) -> Self {
        Self::new(' ', colors, Style::empty())
    }

    /// The hidden second column of a wide character.
    pub fn continuation(colors: Colors, style: Style) -> Self {
        Self::new(CONTINUATION, colors, style)
    }

    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.ch == CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A fixed-size grid of cells covering the whole terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-blank grid of the given size.
    pub fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at 0-based `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at 0-based `(x, y)`. Writes outside the grid are
    /// dropped, which is how region clipping at the terminal edge works.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// One row of cells, 0-based. Empty slice outside the grid.
    pub fn row(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// The plain text of one row, continuations dropped. Test helper mostly,
    /// but also what a screenshot export would use.
    pub fn row_text(&self, y: u16) -> String {
        self.row(y)
            .iter()
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }
}
