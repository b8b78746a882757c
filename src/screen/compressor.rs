//! The virtual terminal and its escape-sequence compressor.
//!
//! [`VirtualTerminal`] keeps a cell-exact copy of what is on screen. Each
//! render diffs the incoming grid against that copy and emits:
//!
//! - one cursor move per contiguous run of changed cells in a row, and
//! - SGR codes only where the presentation actually changes between printed
//!   cells, with a full `\x1b[0m` reset whenever a channel goes from set back
//!   to unset.
//!
//! Rendering the same grid twice therefore produces an empty string, and a
//! one-cell change produces one cursor move plus one cell.

use crate::color::{bg_code, fg_code, style_code, ColorDepth, Rgb, Style};
use crate::screen::grid::{Cell, Grid};

/// Reset all SGR attributes.
const RESET: &str = "\x1b[0m";

/// Clear the whole screen.
const CLEAR: &str = "\x1b[2J";

/// Tracks the SGR attributes the real terminal is currently in, so the
/// compressor only emits codes on transitions.
#[derive(Debug, Clone, Copy, Default)]
struct SgrState {
    /// False until the first emission after a reset; forces a full restate.
    known: bool,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    style: Style,
}

impl SgrState {
    /// Emit whatever codes move the terminal from this state to the cell's
    /// presentation, updating the state to match.
    fn transition(&mut self, cell: &Cell, depth: ColorDepth, out: &mut String) {
        // SGR has codes to add attributes but clearing a single channel needs
        // a full reset, so any set-to-unset transition restates everything.
        let needs_reset = !self.known
            || (self.fg.is_some() && cell.fg.is_none())
            || (self.bg.is_some() && cell.bg.is_none())
            || !cell.style.contains(self.style);

        if needs_reset {
            out.push_str(RESET);
            out.push_str(&fg_code(cell.fg, depth));
            out.push_str(&bg_code(cell.bg, depth));
            out.push_str(&style_code(cell.style));
        } else {
            if cell.fg != self.fg {
                out.push_str(&fg_code(cell.fg, depth));
            }
            if cell.bg != self.bg {
                out.push_str(&bg_code(cell.bg, depth));
            }
            let added = cell.style - self.style;
            out.push_str(&style_code(added));
        }

        self.known = true;
        self.fg = cell.fg;
        self.bg = cell.bg;
        self.style = cell.style;
    }
}

/// The engine's model of the physical terminal.
#[derive(Debug)]
pub struct VirtualTerminal {
    grid: Grid,
    depth: ColorDepth,
    state: SgrState,
}

impl VirtualTerminal {
    /// A virtual terminal whose screen is assumed blank.
    pub fn new(width: u16, height: u16, depth: ColorDepth) -> Self {
        Self {
            grid: Grid::blank(width, height),
            depth,
            state: SgrState::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    /// What the compressor believes is on screen.
    pub fn screen(&self) -> &Grid {
        &self.grid
    }

    /// Diff `new` against the current screen and return the escape output
    /// that updates the terminal. The virtual copy is advanced to `new`, so
    /// rendering the same grid again returns an empty string.
    pub fn render(&mut self, new: &Grid) -> String {
        if new.width() != self.grid.width() || new.height() != self.grid.height() {
            // Size changed under us: the baseline is meaningless, redraw all.
            self.resize(new.width(), new.height());
        }

        let mut out = String::new();
        let mut cells = 0usize;
        for y in 0..new.height() {
            self.render_row(y, new, &mut out, &mut cells);
        }
        self.grid = new.clone();

        tracing::debug!(cells, bytes = out.len(), "render pass");
        out
    }

    fn render_row(&mut self, y: u16, new: &Grid, out: &mut String, cells: &mut usize) {
        let old_row = self.grid.row(y);
        let new_row = new.row(y);
        let width = new_row.len();

        let mut changed: Vec<bool> = (0..width)
            .map(|x| old_row.get(x) != Some(&new_row[x]))
            .collect();
        // A wide character repaints as a unit: dirty either column of a
        // lead/continuation pair and both columns are printed.
        for x in 0..width {
            if changed[x] {
                if new_row[x].is_continuation() && x > 0 {
                    changed[x - 1] = true;
                } else if x + 1 < width && new_row[x + 1].is_continuation() {
                    changed[x + 1] = true;
                }
            }
        }

        let mut x = 0;
        while x < width {
            if !changed[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && changed[x] {
                x += 1;
            }
            // 1-based cursor addressing.
            out.push_str(&format!("\x1b[{};{}H", y + 1, start as u16 + 1));
            for cell in &new_row[start..x] {
                if cell.is_continuation() {
                    continue;
                }
                self.state.transition(cell, self.depth, out);
                out.push(cell.ch);
                *cells += 1;
            }
        }
    }

    /// Forget the screen contents and emit the escape that blanks the real
    /// terminal to match.
    pub fn clear(&mut self) -> String {
        self.grid = Grid::blank(self.grid.width(), self.grid.height());
        self.state = SgrState::default();
        format!("{RESET}{CLEAR}\x1b[1;1H")
    }

    /// Adopt a new terminal size. The baseline becomes blank, so the next
    /// render repaints every non-blank cell.
    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "virtual terminal resized");
        self.grid = Grid::blank(width, height);
        self.state = SgrState::default();
    }
}
