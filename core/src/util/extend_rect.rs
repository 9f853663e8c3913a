use geo::{Coord, Rect};

/// Trait to grow rectangles so they cover further coordinates
///
/// # Examples
///
/// ```rust
/// use geo::{coord, Rect};
/// use geoscan_core::util::extend_rect::ExtendRect;
///
/// let mut bb = Rect::new(
///     coord! { x: 68.859, y: 22.733 },
///     coord! { x: 68.859, y: 22.733 }
/// );
///
/// bb.extend_coord(coord! { x: 68.859, y: 24.733 });
/// bb.extend_coord(coord! { x: 70.859, y: 23.0 });
/// assert_eq!(bb.min().x, 68.859);
/// assert_eq!(bb.min().y, 22.733);
/// assert_eq!(bb.max().x, 70.859);
/// assert_eq!(bb.max().y, 24.733);
/// ```
pub trait ExtendRect {
    /// Extends the rectangle so it covers the given coordinate
    fn extend_coord(&mut self, c: Coord);
}

impl ExtendRect for Rect {
    fn extend_coord(&mut self, c: Coord) {
        let min = self.min();
        self.set_min((min.x.min(c.x), min.y.min(c.y)));
        let max = self.max();
        self.set_max((max.x.max(c.x), max.y.max(c.y)));
    }
}

/// Computes the bounding rectangle of the given coordinates. Returns `None`
/// if there are none.
pub fn bounding_rect(coords: impl IntoIterator<Item = Coord>) -> Option<Rect> {
    let mut coords = coords.into_iter();
    let first = coords.next()?;
    let mut rect = Rect::new(first, first);
    for c in coords {
        rect.extend_coord(c);
    }
    Some(rect)
}
