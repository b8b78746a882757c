//! Error types for the composition and rendering engine.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the engine.
///
/// Degenerate geometry and unregistered event names are deliberately *not*
/// errors; they resolve to empty rectangles and empty dispatch results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A colour string did not match the `#rrggbb` format.
    #[error("invalid color {input:?}: expected \"#rrggbb\"")]
    InvalidColor { input: String },

    /// A targeted operation named a region that was never registered.
    #[error("unknown region {0:?}")]
    UnknownRegion(String),

    /// Bad or missing configuration. This is the only fatal core error and
    /// is raised before any rendering occurs.
    #[error("configuration error: {0}")]
    Config(String),
}
