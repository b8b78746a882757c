//! # tessella
//!
//! A terminal composition and rendering engine.
//!
//! Views are declared as a tree of named regions, each carrying lines of
//! styled text streams and a declarative geometry. The engine resolves
//! geometry against the terminal extent, cascades colours and styles down
//! the tree, flattens everything into a cell grid, and diffs that grid
//! against a virtual copy of the screen to emit the minimal escape output.
//!
//! ## Pipeline
//!
//! ```text
//! Composition → resolve geometry → cascade colours → Grid → diff → escapes
//! ```
//!
//! Content changes flow through per-region triple buffers: stage with
//! [`Buffers::set_pending`], promote with a swap, and render the whole set.
//! Rendering the same state twice writes nothing.
//!
//! ## Modules
//!
//! - [`geometry`] - declarative rectangles, centring, maximise, moves
//! - [`color`] - 24-bit colours degraded to the terminal's real depth
//! - [`compose`] - the region/line/stream view tree and its flattener
//! - [`screen`] - the cell grid and the escape-sequence compressor
//! - [`buffers`] - per-region pending/current/prior buffering
//! - [`events`] - named events with arity-shaped dispatch
//!
//! ## Example
//!
//! ```
//! use tessella::color::ColorDepth;
//! use tessella::compose::Region;
//! use tessella::geometry::Geometry;
//! use tessella::{Buffers, Extent, VirtualTerminal};
//!
//! let mut buffers = Buffers::new();
//! let mut terminal = VirtualTerminal::new(40, 10, ColorDepth::TrueColor);
//! let extent = Extent::new(40, 10);
//!
//! buffers.set_pending(
//!     Region::new("status")
//!         .geometry(Geometry::new().size(10u16, 2u16).centred(true))
//!         .line("ready"),
//! );
//! let output = buffers.swap_and_render("status", &mut terminal, extent).unwrap();
//! assert!(output.contains("ready"));
//! ```

pub mod buffers;
pub mod color;
pub mod compose;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod screen;
pub mod terminal;

pub use buffers::Buffers;
pub use color::{ColorDepth, Colors, Rgb, Style};
pub use compose::{compose, Composition, Line, Region, Stream};
pub use config::RenderOptions;
pub use error::{Error, Result};
pub use events::{Dispatch, Dispatcher};
pub use geometry::{Geometry, Rect};
pub use screen::{Cell, Grid, VirtualTerminal};
pub use terminal::{Extent, ExtentSource, FixedExtent, TerminalExtent, TerminalSink};
