//! Render configuration.
//!
//! The only mandatory setting is the colour depth the terminal actually
//! supports. It must be known before the first render: colour translation is
//! a pure function of `(rgb, depth)` and the compressor bakes the resulting
//! escape codes into its output. An unset or unrecognised depth therefore
//! fails fast with [`Error::Config`] instead of producing garbage SGR codes.

use std::str::FromStr;

use crate::color::ColorDepth;
use crate::error::{Error, Result};

/// Environment variable consulted by [`RenderOptions::from_env`].
pub const DEPTH_ENV_VAR: &str = "TESSELLA_COLOR_DEPTH";

/// Engine-wide render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Colour depth every 24-bit colour is degraded to.
    pub depth: ColorDepth,
}

impl RenderOptions {
    /// Build options with an explicit colour depth.
    pub fn new(depth: ColorDepth) -> Self {
        Self { depth }
    }

    /// Read the colour depth from [`DEPTH_ENV_VAR`].
    ///
    /// An absent or unparsable value is a configuration error, not a
    /// rendering error.
    pub fn from_env() -> Result<Self> {
        match std::env::var(DEPTH_ENV_VAR) {
            Ok(value) => Ok(Self::new(value.parse()?)),
            Err(_) => Err(Error::Config(format!("{DEPTH_ENV_VAR} is not set"))),
        }
    }
}

impl FromStr for ColorDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "16" | "ansi" | "basic" => Ok(Self::Ansi16),
            "256" | "indexed" => Ok(Self::Ansi256),
            "truecolor" | "24bit" | "rgb" => Ok(Self::TrueColor),
            other => Err(Error::Config(format!(
                "unknown color depth {other:?}: expected 16, 256, or truecolor"
            ))),
        }
    }
}
