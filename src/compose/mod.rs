//! The view-composition tree.
//!
//! A [`Composition`] is the full tree of regions making up one screen:
//!
//! ```text
//! Composition -> Region (named, geometry, z-order)
//!                  -> Line (one terminal row)
//!                       -> Stream (styled text fragment)
//! ```
//!
//! Colour and style cascade top-down: every node carries optional values and
//! the flattener resolves stream -> line -> region -> default, first present
//! value per channel wins. The tree itself is inert data; flattening it into
//! cells lives in [`flatten`], the optional wordwrap pre-pass in [`wrap`].

pub mod flatten;
pub mod wrap;

pub use flatten::compose;

use crate::color::{Colors, Style};
use crate::geometry::Geometry;

/// A styled text fragment, the leaf of the view tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    pub text: String,
    pub colors: Colors,
    pub style: Option<Style>,
}

impl Stream {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }
}

impl<S: Into<String>> From<S> for Stream {
    fn from(text: S) -> Self {
        Self::new(text)
    }
}

/// One row of a region: an ordered run of streams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub streams: Vec<Stream>,
    pub colors: Colors,
    pub style: Option<Style>,
}

impl Line {
    pub fn new(streams: Vec<Stream>) -> Self {
        Self { streams, ..Self::default() }
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn push(&mut self, stream: impl Into<Stream>) {
        self.streams.push(stream.into());
    }
}

impl<S: Into<Stream>> From<S> for Line {
    fn from(stream: S) -> Self {
        Self::new(vec![stream.into()])
    }
}

/// A named rectangular area with its own buffered content.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    pub geometry: Geometry,
    pub colors: Colors,
    pub style: Option<Style>,
    pub visible: bool,
    pub cursor_visible: bool,
    pub zindex: i16,
    pub group: Option<String>,
    /// Re-break streams at whitespace before truncation.
    pub wrap: bool,
    pub lines: Vec<Line>,
}

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            geometry: Geometry::default(),
            colors: Colors::default(),
            style: None,
            visible: true,
            cursor_visible: false,
            zindex: 0,
            group: None,
            wrap: false,
            lines: Vec::new(),
        }
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn zindex(mut self, zindex: i16) -> Self {
        self.zindex = zindex;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Show the hardware cursor while this region is visible.
    pub fn cursor(mut self, visible: bool) -> Self {
        self.cursor_visible = visible;
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn line(mut self, line: impl Into<Line>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }
}

/// The full tree of regions for one screen. Regions keep declaration order;
/// the flattener sorts ascending by z-index (stable for ties) so higher
/// regions overwrite lower ones at overlapping cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    regions: Vec<Region>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn with(mut self, region: Region) -> Self {
        self.push(region);
        self
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Regions in paint order: ascending z-index, declaration order for ties.
    pub fn paint_order(&self) -> Vec<&Region> {
        let mut ordered: Vec<&Region> = self.regions.iter().collect();
        ordered.sort_by_key(|region| region.zindex);
        ordered
    }
}

/// Resolve the cascade for one leaf: stream beats line beats region.
pub(crate) fn cascade(stream: &Stream, line: &Line, region: &Region) -> (Colors, Style) {
    let colors = stream.colors.or(line.colors).or(region.colors);
    let style = stream
        .style
        .or(line.style)
        .or(region.style)
        .unwrap_or_default();
    (colors, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_cascade_prefers_nearest_ancestor() {
        let region = Region::new("main")
            .colors(Colors::new(Some(Rgb::new(1, 1, 1)), Some(Rgb::new(2, 2, 2))))
            .style(Style::DIM);
        let line = Line::new(vec![]).colors(Colors::fg(Rgb::new(3, 3, 3)));
        let stream = Stream::new("x").style(Style::BOLD);

        let (colors, style) = cascade(&stream, &line, &region);
        assert_eq!(colors.fg, Some(Rgb::new(3, 3, 3))); // line wins over region
        assert_eq!(colors.bg, Some(Rgb::new(2, 2, 2))); // region fills the gap
        assert_eq!(style, Style::BOLD); // stream wins outright
    }

    #[test]
    fn test_cascade_defaults_when_nothing_set() {
        let (colors, style) = cascade(&Stream::new("x"), &Line::default(), &Region::new("r"));
        assert_eq!(colors, Colors::default());
        assert_eq!(style, Style::empty());
    }

    #[test]
    fn test_paint_order_is_stable_for_equal_zindex() {
        let composition = Composition::new()
            .with(Region::new("top").zindex(5))
            .with(Region::new("a"))
            .with(Region::new("b"))
            .with(Region::new("under").zindex(-1));
        let names: Vec<&str> = composition
            .paint_order()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["under", "a", "b", "top"]);
    }

    #[test]
    fn test_line_from_str_builds_single_stream() {
        let line: Line = "hello".into();
        assert_eq!(line.streams.len(), 1);
        assert_eq!(line.streams[0].text, "hello");
    }
}
