//! The cell screen model and the escape-sequence compressor.
//!
//! - [`grid`] holds the dense cell grid a composition flattens into.
//! - [`compressor`] diffs a new grid against the virtual terminal's copy of
//!   what is already on screen and emits the minimal escape output.

pub mod compressor;
pub mod grid;

pub use compressor::VirtualTerminal;
pub use grid::{Cell, Grid};
