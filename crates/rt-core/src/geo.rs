//! Map coordinates.
//!
//! Cities sit on an integer pixel grid of the board image, so `Coord` is an
//! `i32` pair rather than a geographic lat/lon.  Distances are plain
//! Euclidean in that grid.

/// A city position on the map grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in grid units.
    pub fn distance(self, other: Coord) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of the map area that the region lines are drawn across.
///
/// Coordinates are expected in `0..=width` × `0..=height`, though nothing
/// breaks for points outside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapBounds {
    pub width:  u32,
    pub height: u32,
}

impl MapBounds {
    /// The board image the shipped European network is placed on.
    pub const EUROPE: MapBounds = MapBounds { width: 1200, height: 760 };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Horizontal midpoint (may be fractional for odd widths).
    #[inline]
    pub fn mid_x(self) -> f64 {
        self.width as f64 / 2.0
    }

    #[inline]
    pub fn mid_y(self) -> f64 {
        self.height as f64 / 2.0
    }

    /// Reflect `c` through the centre of the map.
    ///
    /// Reflections of points far outside the map are clamped to the `i32`
    /// grid.
    pub fn mirror(self, c: Coord) -> Coord {
        let flip = |extent: u32, v: i32| {
            let m = i64::from(extent) - i64::from(v);
            i32::try_from(m).unwrap_or(if m < 0 { i32::MIN } else { i32::MAX })
        };
        Coord::new(flip(self.width, c.x), flip(self.height, c.y))
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        MapBounds::EUROPE
    }
}
