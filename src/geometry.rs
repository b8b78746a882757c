//! Geometry resolution for named regions.
//!
//! A [`Geometry`] is a declarative rectangle description: any combination of
//! explicit bounds (`x..xn`, `y..yn`), dimensions (`width`, `height`), a
//! `centred` flag, and a `maximised` flag. [`Geometry::resolve`] turns it
//! into a concrete [`Rect`] against the parent extent, clamped so the result
//! always lies inside `[1, parent_width] x [1, parent_height]`.
//!
//! Coordinates are 1-based and inclusive, matching the terminal's own cursor
//! addressing. Degenerate sizes resolve to [`Rect::EMPTY`], never an error.

use crate::terminal::Extent;

/// A coordinate or dimension input: a fixed value, or a callable re-evaluated
/// at resolve time to support terminal-size-relative constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    Fixed(u16),
    Dynamic(fn() -> u16),
}

impl Coord {
    #[inline]
    fn value(self) -> u16 {
        match self {
            Self::Fixed(v) => v,
            Self::Dynamic(f) => f(),
        }
    }
}

impl From<u16> for Coord {
    fn from(value: u16) -> Self {
        Self::Fixed(value)
    }
}

/// A resolved, clamped rectangle. `x..=xn` and `y..=yn` are inclusive
/// 1-based ranges; an empty rectangle has `xn < x` or `yn < y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub xn: u16,
    pub yn: u16,
}

impl Rect {
    /// The canonical empty rectangle.
    pub const EMPTY: Self = Self { x: 1, y: 1, xn: 0, yn: 0 };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.xn < self.x || self.yn < self.y
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        if self.is_empty() { 0 } else { self.xn - self.x + 1 }
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        if self.is_empty() { 0 } else { self.yn - self.y + 1 }
    }

    /// Row coordinate directly above the rectangle.
    #[inline]
    pub const fn north(&self) -> u16 {
        self.y.saturating_sub(1)
    }

    /// Row coordinate directly below the rectangle.
    #[inline]
    pub const fn south(&self) -> u16 {
        self.yn + 1
    }

    /// Column coordinate directly left of the rectangle.
    #[inline]
    pub const fn west(&self) -> u16 {
        self.x.saturating_sub(1)
    }

    /// Column coordinate directly right of the rectangle.
    #[inline]
    pub const fn east(&self) -> u16 {
        self.xn + 1
    }

    /// Ordered rows the rectangle covers.
    pub fn rows(&self) -> impl Iterator<Item = u16> + use<> {
        self.y..=self.yn
    }

    /// Ordered columns the rectangle covers.
    pub fn columns(&self) -> impl Iterator<Item = u16> + use<> {
        self.x..=self.xn
    }

    /// Convert an absolute row to a 0-based offset within the rectangle,
    /// clamping out-of-range rows to the nearest edge.
    pub fn row_index(&self, row: u16) -> usize {
        if self.is_empty() {
            return 0;
        }
        (row.clamp(self.y, self.yn) - self.y) as usize
    }

    /// Convert an absolute column to a 0-based offset within the rectangle,
    /// clamping out-of-range columns to the nearest edge.
    pub fn col_index(&self, col: u16) -> usize {
        if self.is_empty() {
            return 0;
        }
        (col.clamp(self.x, self.xn) - self.x) as usize
    }
}

/// Declarative geometry for one named region.
///
/// Resolution order per axis:
/// 1. `maximised` wins outright: the rectangle is the full parent extent.
/// 2. Explicit bounds (`x` and `xn`) take precedence; dimensions are derived.
/// 3. `centred` with a known dimension centres within the parent.
/// 4. Otherwise the explicit origin (default 1) extends by the dimension,
///    or to the parent edge when no dimension is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geometry {
    pub x: Option<Coord>,
    pub y: Option<Coord>,
    pub xn: Option<Coord>,
    pub yn: Option<Coord>,
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub centred: bool,
    pub maximised: bool,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin.
    pub fn at(mut self, x: impl Into<Coord>, y: impl Into<Coord>) -> Self {
        self.x = Some(x.into());
        self.y = Some(y.into());
        self
    }

    /// Set the dimensions.
    pub fn size(mut self, width: impl Into<Coord>, height: impl Into<Coord>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    /// Set explicit far bounds. These take precedence over dimensions.
    pub fn to(mut self, xn: impl Into<Coord>, yn: impl Into<Coord>) -> Self {
        self.xn = Some(xn.into());
        self.yn = Some(yn.into());
        self
    }

    pub fn centred(mut self, centred: bool) -> Self {
        self.centred = centred;
        self
    }

    /// Resolve against the parent extent.
    pub fn resolve(&self, parent: Extent) -> Rect {
        if parent.is_empty() {
            return Rect::EMPTY;
        }
        if self.maximised {
            return Rect { x: 1, y: 1, xn: parent.width, yn: parent.height };
        }

        let (x, xn) = resolve_axis(
            self.x.map(Coord::value),
            self.xn.map(Coord::value),
            self.width.map(Coord::value),
            self.centred,
            parent.width,
        );
        let (y, yn) = resolve_axis(
            self.y.map(Coord::value),
            self.yn.map(Coord::value),
            self.height.map(Coord::value),
            self.centred,
            parent.height,
        );

        let rect = Rect { x, y, xn, yn };
        if rect.is_empty() { Rect::EMPTY } else { rect }
    }

    /// Maximise. Idempotent; the declared constraints are kept so that
    /// [`Self::unmaximise`] can restore them against the current extent.
    pub fn maximise(&self) -> Self {
        if self.maximised {
            return *self;
        }
        Self { maximised: true, ..*self }
    }

    /// Restore the declared constraints. The caller re-resolves against the
    /// *current* extent, so a resize while maximised is honoured on restore.
    pub fn unmaximise(&self) -> Self {
        if !self.maximised {
            return *self;
        }
        Self { maximised: false, ..*self }
    }

    pub fn move_up(&self, parent: Extent) -> Self {
        let rect = self.resolve(parent);
        if rect.is_empty() || rect.y <= 1 {
            tracing::trace!(?rect, "move_up rejected at top edge");
            return *self;
        }
        self.pinned(rect.x, rect.y - 1, rect.xn, rect.yn - 1)
    }

    pub fn move_down(&self, parent: Extent) -> Self {
        let rect = self.resolve(parent);
        if rect.is_empty() || rect.yn + 1 > parent.height {
            tracing::trace!(?rect, "move_down rejected at bottom edge");
            return *self;
        }
        self.pinned(rect.x, rect.y + 1, rect.xn, rect.yn + 1)
    }

    pub fn move_left(&self, parent: Extent) -> Self {
        let rect = self.resolve(parent);
        if rect.is_empty() || rect.x <= 1 {
            tracing::trace!(?rect, "move_left rejected at left edge");
            return *self;
        }
        self.pinned(rect.x - 1, rect.y, rect.xn - 1, rect.yn)
    }

    pub fn move_right(&self, parent: Extent) -> Self {
        let rect = self.resolve(parent);
        if rect.is_empty() || rect.xn + 1 > parent.width {
            tracing::trace!(?rect, "move_right rejected at right edge");
            return *self;
        }
        self.pinned(rect.x + 1, rect.y, rect.xn + 1, rect.yn)
    }

    /// Relocate to the top-left corner, preserving size.
    pub fn move_origin(&self, parent: Extent) -> Self {
        let rect = self.resolve(parent);
        if rect.is_empty() {
            return *self;
        }
        self.pinned(1, 1, rect.width(), rect.height())
    }

    /// A moved geometry pins the resolved rectangle as explicit bounds and
    /// drops `centred`/`maximised`, so further resolves stay where the user
    /// put it.
    fn pinned(&self, x: u16, y: u16, xn: u16, yn: u16) -> Self {
        Self {
            x: Some(Coord::Fixed(x)),
            y: Some(Coord::Fixed(y)),
            xn: Some(Coord::Fixed(xn)),
            yn: Some(Coord::Fixed(yn)),
            width: None,
            height: None,
            centred: false,
            maximised: false,
        }
    }
}

/// Resolve one axis to a clamped inclusive 1-based range.
fn resolve_axis(
    start: Option<u16>,
    end: Option<u16>,
    length: Option<u16>,
    centred: bool,
    parent: u16,
) -> (u16, u16) {
    let (start, end) = match (start, end, length) {
        // Explicit bounds win; the dimension is derived from them.
        (Some(s), Some(e), _) => (s, e),
        (_, _, Some(len)) if centred => {
            if len == 0 {
                return (1, 0);
            }
            let s = ((parent.saturating_sub(len)) / 2).max(1);
            (s, s + len - 1)
        }
        (Some(s), None, Some(len)) => {
            if len == 0 {
                return (1, 0);
            }
            (s, s.saturating_add(len - 1))
        }
        (Some(s), None, None) => (s, parent),
        (None, Some(e), Some(len)) => {
            if len == 0 {
                return (1, 0);
            }
            (e.saturating_sub(len - 1).max(1), e)
        }
        (None, Some(e), None) => (1, e),
        (None, None, Some(len)) => {
            if len == 0 {
                return (1, 0);
            }
            (1, len)
        }
        (None, None, None) => (1, parent),
    };

    let start = start.clamp(1, parent);
    let end = end.min(parent);
    (start, end)
}
