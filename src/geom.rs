use euclid::TypedPoint2D;
use euclid::TypedRect;
use euclid::TypedSize2D;

use ::parse::map::BareVertex;

pub struct MapSpace;
pub type Coord = i32;
pub type Point = TypedPoint2D<Coord, MapSpace>;
pub type Rect = TypedRect<Coord, MapSpace>;
pub type Size = TypedSize2D<Coord, MapSpace>;

/// Smallest rectangle containing every vertex.  Coordinates are widened first, so a level
/// spanning the whole 16-bit range still has a representable size.
pub fn bounds(vertices: &[BareVertex]) -> Option<Rect> {
    let first = vertices.first()?;
    let (mut min_x, mut min_y) = (first.x as Coord, first.y as Coord);
    let (mut max_x, mut max_y) = (min_x, min_y);
    for vertex in &vertices[1..] {
        min_x = min_x.min(vertex.x as Coord);
        min_y = min_y.min(vertex.y as Coord);
        max_x = max_x.max(vertex.x as Coord);
        max_y = max_y.max(vertex.y as Coord);
    }
    Some(Rect::new(Point::new(min_x, min_y), Size::new(max_x - min_x, max_y - min_y)))
}
