//! Terminal extent sources and the live output sink.
//!
//! The engine never reads the terminal size ad hoc: geometry resolution asks
//! an [`ExtentSource`] exactly once per resolution, which keeps resolution a
//! pure function of its inputs and makes every test deterministic via
//! [`FixedExtent`].

use std::io::{self, Write};

/// Show the hardware cursor.
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// Hide the hardware cursor.
pub const HIDE_CURSOR: &str = "\x1b[?25l";

/// Parent dimensions a geometry resolves against, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: u16,
    pub height: u16,
}

impl Extent {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when there is no drawable area at all.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where the current parent extent comes from.
pub trait ExtentSource {
    fn extent(&self) -> Extent;
}

/// A fixed extent, for tests and embedded render targets.
#[derive(Debug, Clone, Copy)]
pub struct FixedExtent(pub Extent);

impl ExtentSource for FixedExtent {
    fn extent(&self) -> Extent {
        self.0
    }
}

/// The live terminal, queried through crossterm on every resolution so that
/// resizes are picked up without any resize bookkeeping here.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalExtent;

/// Fallback when the size query fails (e.g. output is not a tty).
const FALLBACK: Extent = Extent::new(80, 24);

impl ExtentSource for TerminalExtent {
    fn extent(&self) -> Extent {
        match crossterm::terminal::size() {
            Ok((width, height)) => Extent::new(width, height),
            Err(_) => FALLBACK,
        }
    }
}

/// Writes compressed escape output to the real terminal in one flush.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }

    /// Write one render pass worth of output. Empty passes are skipped
    /// entirely so an idempotent render costs no syscall.
    pub fn write(&mut self, output: &str) -> io::Result<()> {
        if output.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        stdout.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        self.write(SHOW_CURSOR)
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        self.write(HIDE_CURSOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_extent_is_stable() {
        let source = FixedExtent(Extent::new(40, 10));
        assert_eq!(source.extent(), Extent::new(40, 10));
        assert_eq!(source.extent(), Extent::new(40, 10));
    }

    #[test]
    fn test_empty_extent() {
        assert!(Extent::new(0, 10).is_empty());
        assert!(Extent::new(10, 0).is_empty());
        assert!(!Extent::new(1, 1).is_empty());
    }
}
