use serde_derive::{Deserialize, Serialize};

/// A position in font units (or, after a transform, in pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }

    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(f64::from(p.x), f64::from(p.y))
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Point::new(p.x as f32, p.y as f32)
    }
}

/// One point of a contour as a font stores it: a position, and whether it lies on the outline
/// (`on_curve`) or is a quadratic control point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    pub x: f32,
    pub y: f32,
    pub on_curve: bool,
}

impl ContourPoint {
    pub const fn on(x: f32, y: f32) -> Self {
        ContourPoint { x, y, on_curve: true }
    }

    pub const fn off(x: f32, y: f32) -> Self {
        ContourPoint { x, y, on_curve: false }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The on-curve point implied between two consecutive off-curve points.
    pub fn midpoint(a: &ContourPoint, b: &ContourPoint) -> ContourPoint {
        let m = Point::midpoint(a.position(), b.position());
        ContourPoint::on(m.x, m.y)
    }
}

/// Axis-aligned extents, named the way font tables name them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    /// The smallest box holding every point, or `None` if there are none.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Option<BoundingBox> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => BoundingBox { x_min: p.x, y_min: p.y, x_max: p.x, y_max: p.y },
                Some(b) => BoundingBox {
                    x_min: b.x_min.min(p.x),
                    y_min: b.y_min.min(p.y),
                    x_max: b.x_max.max(p.x),
                    y_max: b.y_max.max(p.y),
                },
            })
        })
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_on_curve() {
        let m = ContourPoint::midpoint(&ContourPoint::off(10.0, 10.0), &ContourPoint::off(20.0, 0.0));
        assert_eq!(m, ContourPoint::on(15.0, 5.0));
    }

    #[test]
    fn bounding_box_of_points() {
        let b = BoundingBox::from_points(vec![
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(b, BoundingBox { x_min: -2.0, y_min: -1.0, x_max: 3.0, y_max: 4.0 });
        assert_eq!(b.width(), 5.0);
        assert_eq!(b.height(), 5.0);
        assert_eq!(BoundingBox::from_points(Vec::new()), None);
    }

    #[test]
    fn union_covers_both_boxes() {
        let a = BoundingBox { x_min: 0.0, y_min: 0.0, x_max: 10.0, y_max: 5.0 };
        let b = BoundingBox { x_min: -3.0, y_min: 2.0, x_max: 4.0, y_max: 8.0 };
        let expected = BoundingBox { x_min: -3.0, y_min: 0.0, x_max: 10.0, y_max: 8.0 };
        assert_eq!(a.union(&b), expected);
        assert_eq!(b.union(&a), expected);
    }

    #[test]
    fn converts_to_and_from_kurbo() {
        let k: kurbo::Point = Point::new(1.5, -2.0).into();
        assert_eq!(k, kurbo::Point::new(1.5, -2.0));
        assert_eq!(Point::from(k), Point::new(1.5, -2.0));
    }
}
