//! Placing glyphs on screen: the pan/zoom camera of the inspector and the fitting math of the
//! gallery. Transforms are `kurbo::Affine`, in canvas order `[a, b, c, d, e, f]`:
//!
//! ```text
//! x' = a * x + c * y + e
//! y' = b * x + d * y + f
//! ```

use kurbo::Affine;

use crate::contour::Contour;
use crate::point::{ContourPoint, Point};

/// Singular transforms have no inverse; this is how close to zero the determinant may get.
const SINGULAR_DETERMINANT: f64 = 1e-12;

pub fn transform_point(matrix: Affine, p: Point) -> Point {
    (matrix * kurbo::Point::from(p)).into()
}

/// `None` for a singular transform.
pub fn inverse_transform_point(matrix: Affine, p: Point) -> Option<Point> {
    if matrix.determinant().abs() <= SINGULAR_DETERMINANT {
        return None;
    }
    Some(transform_point(matrix.inverse(), p))
}

pub fn transform_contour(matrix: Affine, contour: &[ContourPoint]) -> Contour {
    contour
        .iter()
        .map(|point| {
            let p = transform_point(matrix, point.position());
            ContourPoint { x: p.x, y: p.y, on_curve: point.on_curve }
        })
        .collect::<Vec<_>>()
        .into()
}

/// How much one unit of mouse-wheel delta zooms.
const ZOOM_PER_WHEEL_UNIT: f32 = 0.0008;
/// A single wheel event never shrinks the view by more than this factor.
const MIN_ZOOM_FACTOR: f32 = 0.05;

/// The view onto a glyph: font units scaled by `scale` with y pointing up, shifted by
/// `translation` screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub scale: f32,
    pub translation: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Camera { scale: 1.0, translation: Point::default() }
    }
}

impl Camera {
    pub fn new(scale: f32, translation: Point) -> Self {
        Camera { scale, translation }
    }

    /// Font space to screen space: `[s, 0, 0, -s, tx, ty]`.
    pub fn matrix(&self) -> Affine {
        let s = f64::from(self.scale);
        Affine::new([
            s,
            0.0,
            0.0,
            -s,
            f64::from(self.translation.x),
            f64::from(self.translation.y),
        ])
    }

    pub fn to_screen(&self, p: Point) -> Point {
        transform_point(self.matrix(), p)
    }

    pub fn to_font(&self, p: Point) -> Option<Point> {
        inverse_transform_point(self.matrix(), p)
    }

    /// Drag by `delta` screen pixels.
    pub fn pan(&mut self, delta: Point) {
        self.translation = self.translation + delta;
    }

    /// Zooms by one wheel event of `wheel_delta` (positive zooms out), keeping the font-space
    /// point under `cursor` where it is on screen.
    pub fn zoom_at(&mut self, cursor: Point, wheel_delta: f32) {
        let local = match self.to_font(cursor) {
            Some(local) => local,
            None => return,
        };
        let factor = (1.0 - wheel_delta * ZOOM_PER_WHEEL_UNIT).max(MIN_ZOOM_FACTOR);
        self.scale *= factor;
        let moved = self.to_screen(local);
        self.translation = self.translation - (moved - cursor);
    }
}

/// The scale that makes `rect` (width, height) fit inside `available`, limited by whichever side
/// is tighter. `None` if `rect` has no extent along that side.
pub fn fit_scale(rect: (f32, f32), available: (f32, f32)) -> Option<f32> {
    let aspect = rect.1 / rect.0;
    let available_aspect = available.1 / available.0;
    let scale = if aspect < available_aspect {
        available.0 / rect.0
    } else {
        available.1 / rect.1
    };
    if scale.is_finite() && scale > 0.0 {
        Some(scale)
    } else {
        None
    }
}

/// Offset that centers `rect` inside `available`.
pub fn centering(rect: (f32, f32), available: (f32, f32)) -> Point {
    Point::new((available.0 - rect.0) / 2.0, (available.1 - rect.1) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn canvas_order_coefficients() {
        // Shear terms land where a canvas `setTransform(a, b, c, d, e, f)` puts them.
        let m = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(transform_point(m, Point::new(1.0, 1.0)), Point::new(9.0, 12.0));
    }

    #[test]
    fn inverse_round_trips() {
        let m = Affine::new([2.0, 0.5, -1.0, 3.0, 7.0, -4.0]);
        let p = Point::new(3.5, -2.0);
        let back = inverse_transform_point(m, transform_point(m, p)).unwrap();
        assert!(close(back, p), "{:?}", back);
        let singular = Affine::new([1.0, 2.0, 2.0, 4.0, 0.0, 0.0]);
        assert_eq!(inverse_transform_point(singular, p), None);
    }

    #[test]
    fn camera_flips_y() {
        let camera = Camera::new(2.0, Point::new(100.0, 200.0));
        assert_eq!(camera.to_screen(Point::new(10.0, 10.0)), Point::new(120.0, 180.0));
        assert_eq!(camera.to_font(Point::new(120.0, 180.0)), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn zoom_keeps_point_under_cursor() {
        let mut camera = Camera::new(0.5, Point::new(40.0, 300.0));
        let cursor = Point::new(123.0, 77.0);
        let before = camera.to_font(cursor).unwrap();
        camera.zoom_at(cursor, -250.0);
        assert!((camera.scale - 0.6).abs() < 1e-6);
        assert!(close(camera.to_screen(before), cursor));
        // A huge wheel delta must not flip or collapse the view.
        camera.zoom_at(cursor, 1e6);
        assert!(camera.scale > 0.0);
    }

    #[test]
    fn pan_moves_translation() {
        let mut camera = Camera::default();
        camera.pan(Point::new(5.0, -3.0));
        camera.pan(Point::new(1.0, 1.0));
        assert_eq!(camera.translation, Point::new(6.0, -2.0));
    }

    #[test]
    fn fit_and_center() {
        // Tall glyph in a square: height decides.
        assert_eq!(fit_scale((50.0, 200.0), (90.0, 90.0)), Some(0.45));
        // Wide glyph: width decides.
        assert_eq!(fit_scale((180.0, 45.0), (90.0, 90.0)), Some(0.5));
        assert_eq!(fit_scale((0.0, 0.0), (90.0, 90.0)), None);
        assert_eq!(centering((60.0, 100.0), (100.0, 100.0)), Point::new(20.0, 0.0));
    }

    #[test]
    fn transform_contour_keeps_flags() {
        let contour = vec![ContourPoint::on(1.0, 2.0), ContourPoint::off(3.0, 4.0)];
        let moved = transform_contour(Affine::translate((1.0, 1.0)), &contour);
        assert_eq!(
            moved.points(),
            &[ContourPoint::on(2.0, 3.0), ContourPoint::off(4.0, 5.0)]
        );
    }
}
