//! Colour parsing, degradation, and SGR emission.
//!
//! Every colour enters the engine as 24-bit RGB and is degraded to the
//! terminal's actual depth at emission time:
//!
//! - `TrueColor` emits direct `38;2;R;G;B` / `48;2;R;G;B` codes.
//! - `Ansi256` picks the nearest entry of the 6x6x6 colour cube or the
//!   24-step grayscale ramp by squared Euclidean distance.
//! - `Ansi16` reduces to the nearest of the 16 ANSI reference colours.
//!
//! An unset channel always resolves to the empty string, never a
//! default-colour code: cascading inheritance then works by plain string
//! concatenation in the compressor.

use crate::error::{Error, Result};

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` hex string (exactly six hex digits).
    ///
    /// # Examples
    ///
    /// ```
    /// use tessella::color::Rgb;
    ///
    /// assert_eq!(Rgb::parse("#ff0000").unwrap(), Rgb::new(255, 0, 0));
    /// assert!(Rgb::parse("ff0000").is_err());
    /// assert!(Rgb::parse("#fff").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor { input: input.to_string() };
        let hex = input.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Squared Euclidean distance to another colour. Monotonic in the true
    /// distance, which is all nearest-match needs.
    #[inline]
    fn distance(self, other: Self) -> u32 {
        let d = |a: u8, b: u8| {
            let d = a as i32 - b as i32;
            (d * d) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

/// The colour depth the terminal actually supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDepth {
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Optional foreground/background pair. Both channels cascade independently
/// through the view tree; `None` means "inherit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Colors {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl Colors {
    pub const fn new(fg: Option<Rgb>, bg: Option<Rgb>) -> Self {
        Self { fg, bg }
    }

    pub fn fg(rgb: Rgb) -> Self {
        Self { fg: Some(rgb), bg: None }
    }

    pub fn bg(rgb: Rgb) -> Self {
        Self { fg: None, bg: Some(rgb) }
    }

    /// Channel-wise cascade: take this pair's channels, filling unset ones
    /// from `fallback`.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            fg: self.fg.or(fallback.fg),
            bg: self.bg.or(fallback.bg),
        }
    }
}

bitflags::bitflags! {
    /// Text style flags, stored as a bitfield for cheap cell comparison.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Style: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// SGR emission
// =============================================================================

/// Foreground SGR code for a (possibly unset) colour at a given depth.
pub fn fg_code(color: Option<Rgb>, depth: ColorDepth) -> String {
    let Some(rgb) = color else {
        return String::new();
    };
    match depth {
        ColorDepth::TrueColor => format!("\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        ColorDepth::Ansi256 => format!("\x1b[38;5;{}m", ansi256_index(rgb)),
        ColorDepth::Ansi16 => {
            let index = ansi16_index(rgb);
            if index < 8 {
                format!("\x1b[{}m", 30 + index)
            } else {
                format!("\x1b[{}m", 90 + index - 8)
            }
        }
    }
}

/// Background SGR code for a (possibly unset) colour at a given depth.
pub fn bg_code(color: Option<Rgb>, depth: ColorDepth) -> String {
    let Some(rgb) = color else {
        return String::new();
    };
    match depth {
        ColorDepth::TrueColor => format!("\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b),
        ColorDepth::Ansi256 => format!("\x1b[48;5;{}m", ansi256_index(rgb)),
        ColorDepth::Ansi16 => {
            let index = ansi16_index(rgb);
            if index < 8 {
                format!("\x1b[{}m", 40 + index)
            } else {
                format!("\x1b[{}m", 100 + index - 8)
            }
        }
    }
}

/// SGR code for a style bitfield, empty when no flags are set.
pub fn style_code(style: Style) -> String {
    if style.is_empty() {
        return String::new();
    }
    let mut code = String::from("\x1b[");
    let mut first = true;
    let mut emit = |flag: Style, n: u8| {
        if style.contains(flag) {
            if !first {
                code.push(';');
            }
            code.push_str(&n.to_string());
            first = false;
        }
    };
    emit(Style::BOLD, 1);
    emit(Style::DIM, 2);
    emit(Style::ITALIC, 3);
    emit(Style::UNDERLINE, 4);
    emit(Style::BLINK, 5);
    emit(Style::INVERSE, 7);
    emit(Style::HIDDEN, 8);
    emit(Style::STRIKETHROUGH, 9);
    code.push('m');
    code
}

// =============================================================================
// Degradation
// =============================================================================

/// The six cube levels of the xterm 256-colour palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// Reference values for the 16 ANSI base colours (8 standard + 8 bright).
const ANSI16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Nearest cube level index for one channel.
#[inline]
fn cube_level(channel: u8) -> u8 {
    let mut best = 0u8;
    let mut best_distance = u32::MAX;
    for (i, &level) in CUBE_LEVELS.iter().enumerate() {
        let d = (channel as i32 - level as i32).unsigned_abs();
        if d < best_distance {
            best_distance = d;
            best = i as u8;
        }
    }
    best
}

/// Degrade to the 256-colour palette: nearest of the 216-entry cube and the
/// 24-step grayscale ramp, whichever is closer. Ties go to the cube, so pure
/// black lands on index 16 rather than the ramp.
pub fn ansi256_index(rgb: Rgb) -> u8 {
    let (rl, gl, bl) = (cube_level(rgb.r), cube_level(rgb.g), cube_level(rgb.b));
    let cube_index = 16 + 36 * rl + 6 * gl + bl;
    let cube_rgb = Rgb::new(
        CUBE_LEVELS[rl as usize],
        CUBE_LEVELS[gl as usize],
        CUBE_LEVELS[bl as usize],
    );

    // Grayscale ramp: indices 232..=255 cover 8, 18, ... 238.
    let gray = ((rgb.r as u16 + rgb.g as u16 + rgb.b as u16) / 3) as u8;
    let step = if gray < 8 {
        0
    } else if gray > 238 {
        23
    } else {
        (gray as u16 - 8 + 5) as u8 / 10
    };
    let gray_value = 8 + step * 10;
    let gray_rgb = Rgb::new(gray_value, gray_value, gray_value);

    if rgb.distance(gray_rgb) < rgb.distance(cube_rgb) {
        232 + step
    } else {
        cube_index
    }
}

/// Degrade to the 16 ANSI base colours by nearest reference match.
pub fn ansi16_index(rgb: Rgb) -> u8 {
    let mut best = 0u8;
    let mut best_distance = u32::MAX;
    for (i, &reference) in ANSI16.iter().enumerate() {
        let d = rgb.distance(reference);
        if d < best_distance {
            best_distance = d;
            best = i as u8;
        }
    }
    best
}
