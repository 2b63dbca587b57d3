//! Making TrueType's implied on-curve points explicit, and taking them out again.
//!
//! TrueType lets a contour have two off-curve points in a row; the on-curve point halfway between
//! them is implied. A renderer has to put those points back before it can split the contour into
//! quadratic segments. Because a contour is a loop, the pair (last point, first point) is
//! consecutive as well, which is why [`intersperse`] finishes with a look at that boundary.

use itertools::Itertools;
use log::debug;

use crate::error::OutlineError;
use crate::point::{BoundingBox, ContourPoint};

/// One closed loop of a glyph outline. The point after the last one is the first one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Contour(pub Vec<ContourPoint>);

impl Contour {
    pub fn points(&self) -> &[ContourPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.0.iter().map(ContourPoint::position))
    }
}

impl From<Vec<ContourPoint>> for Contour {
    fn from(points: Vec<ContourPoint>) -> Self {
        Contour(points)
    }
}

/// Inserts the implied on-curve points of `contour`, so that every off-curve point ends up between
/// two on-curve points, and makes the result start on-curve.
///
/// First a forward scan: wherever an original point and its predecessor are both off-curve, their
/// midpoint is inserted between them. Then the closing edge (last point → first point):
///
/// - first point on-curve: nothing to do.
/// - first off-curve, last on-curve: the last point moves to the front.
/// - first off-curve, last off-curve: their midpoint is put in front.
///
/// The result is at least as long as the input. The only error is an empty contour.
pub fn intersperse(contour: &[ContourPoint]) -> Result<Vec<ContourPoint>, OutlineError> {
    let first = contour.first().ok_or(OutlineError::EmptyContour)?;
    let mut points = Vec::with_capacity(contour.len() + 1);
    points.push(*first);
    for (previous, point) in contour.iter().tuple_windows() {
        if !previous.on_curve && !point.on_curve {
            points.push(ContourPoint::midpoint(previous, point));
        }
        points.push(*point);
    }

    // `points[0]` is still `contour[0]`: the scan never inserts in front of it.
    if !points[0].on_curve {
        let last = points[points.len() - 1];
        if last.on_curve {
            points.rotate_right(1);
        } else {
            let implied = ContourPoint::midpoint(&last, &points[0]);
            points.insert(0, implied);
        }
    }
    debug!(
        "Interspersed contour of {} points into {} points",
        contour.len(),
        points.len()
    );
    Ok(points)
}

/// Checks what [`intersperse`] guarantees: the sequence is non-empty, starts on-curve, and no two
/// circularly consecutive points are both off-curve.
pub fn check_interspersed(points: &[ContourPoint]) -> Result<(), OutlineError> {
    let first = points.first().ok_or(OutlineError::EmptyContour)?;
    if !first.on_curve {
        return Err(OutlineError::MalformedContour { index: 0 });
    }
    let n = points.len();
    match (0..n).find(|&i| !points[i].on_curve && !points[(i + 1) % n].on_curve) {
        Some(index) => Err(OutlineError::MalformedContour { index }),
        None => Ok(()),
    }
}

const IMPLIED_TOLERANCE: f32 = 1e-3;

/// Removes every on-curve point that sits exactly halfway between its two off-curve neighbours,
/// i.e. the points TrueType would leave implied.
///
/// Libraries that hand out ready-made segments (such as `ttf-parser`'s outline builder) have
/// already made these points explicit; this gets back to what the `glyf` table stores. Contours of
/// fewer than three points are returned as they are.
pub fn drop_implied_on_curve(points: &[ContourPoint]) -> Vec<ContourPoint> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }
    let is_implied = |i: usize| {
        let point = &points[i];
        let previous = &points[(i + n - 1) % n];
        let next = &points[(i + 1) % n];
        if point.on_curve && !previous.on_curve && !next.on_curve {
            let m = ContourPoint::midpoint(previous, next);
            (m.x - point.x).abs() <= IMPLIED_TOLERANCE && (m.y - point.y).abs() <= IMPLIED_TOLERANCE
        } else {
            false
        }
    };
    (0..n).filter(|&i| !is_implied(i)).map(|i| points[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(x: f32, y: f32) -> ContourPoint {
        ContourPoint::on(x, y)
    }

    fn off(x: f32, y: f32) -> ContourPoint {
        ContourPoint::off(x, y)
    }

    #[test]
    fn well_formed_contour_is_unchanged() {
        let contour = vec![on(0.0, 0.0), off(10.0, 10.0), on(20.0, 0.0), on(10.0, -10.0)];
        assert_eq!(intersperse(&contour).unwrap(), contour);
    }

    #[test]
    fn midpoint_between_interior_off_curve_points() {
        let contour = vec![on(0.0, 0.0), off(10.0, 10.0), off(20.0, 0.0), on(30.0, 10.0)];
        assert_eq!(
            intersperse(&contour).unwrap(),
            vec![
                on(0.0, 0.0),
                off(10.0, 10.0),
                on(15.0, 5.0),
                off(20.0, 0.0),
                on(30.0, 10.0)
            ]
        );
    }

    #[test]
    fn starts_off_curve_ends_on_curve_rotates() {
        let contour = vec![off(0.0, 10.0), on(10.0, 0.0), on(0.0, 0.0)];
        assert_eq!(
            intersperse(&contour).unwrap(),
            vec![on(0.0, 0.0), off(0.0, 10.0), on(10.0, 0.0)]
        );
    }

    #[test]
    fn starts_and_ends_off_curve_prepends_midpoint() {
        let contour = vec![off(0.0, 0.0), on(10.0, 0.0), off(20.0, 0.0)];
        assert_eq!(
            intersperse(&contour).unwrap(),
            vec![on(10.0, 0.0), off(0.0, 0.0), on(10.0, 0.0), off(20.0, 0.0)]
        );
    }

    #[test]
    fn all_off_curve_circle() {
        let contour = vec![off(0.0, 10.0), off(10.0, 0.0), off(0.0, -10.0), off(-10.0, 0.0)];
        let points = intersperse(&contour).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(points[0], on(-5.0, 5.0));
        assert_eq!(points[1], off(0.0, 10.0));
        assert_eq!(points[2], on(5.0, 5.0));
        assert!(check_interspersed(&points).is_ok());
    }

    #[test]
    fn single_point_contours() {
        assert_eq!(intersperse(&[on(3.0, 4.0)]).unwrap(), vec![on(3.0, 4.0)]);
        assert_eq!(
            intersperse(&[off(3.0, 4.0)]).unwrap(),
            vec![on(3.0, 4.0), off(3.0, 4.0)]
        );
    }

    #[test]
    fn length_grows_by_at_most_one_at_the_boundary() {
        let contours = vec![
            vec![on(0.0, 0.0), on(1.0, 0.0), on(1.0, 1.0)],
            vec![off(0.0, 0.0), on(1.0, 0.0), on(1.0, 1.0)],
            vec![off(0.0, 0.0), on(1.0, 0.0), off(1.0, 1.0)],
            vec![on(0.0, 0.0), off(1.0, 0.0), on(1.0, 1.0), off(0.0, 1.0)],
        ];
        for contour in contours {
            let n = intersperse(&contour).unwrap().len();
            assert!(n == contour.len() || n == contour.len() + 1, "{:?}", contour);
        }
    }

    #[test]
    fn empty_contour_is_rejected() {
        assert_eq!(intersperse(&[]), Err(OutlineError::EmptyContour));
        assert_eq!(check_interspersed(&[]), Err(OutlineError::EmptyContour));
    }

    #[test]
    fn check_finds_consecutive_off_curve_points() {
        assert_eq!(
            check_interspersed(&[on(0.0, 0.0), off(1.0, 1.0), off(2.0, 0.0)]),
            Err(OutlineError::MalformedContour { index: 1 })
        );
        assert_eq!(
            check_interspersed(&[off(1.0, 1.0), on(0.0, 0.0)]),
            Err(OutlineError::MalformedContour { index: 0 })
        );
        // The pair (last, first) wraps around.
        assert_eq!(
            check_interspersed(&[on(0.0, 0.0), off(1.0, 1.0), on(2.0, 0.0), off(3.0, 3.0)]),
            Ok(())
        );
    }

    #[test]
    fn drop_implied_undoes_intersperse() {
        let contour = vec![on(0.0, 0.0), off(10.0, 10.0), off(20.0, 0.0), on(30.0, 10.0)];
        let explicit = intersperse(&contour).unwrap();
        assert_eq!(drop_implied_on_curve(&explicit), contour);
    }

    #[test]
    fn drop_implied_keeps_real_on_curve_points() {
        let contour = vec![on(0.0, 0.0), off(10.0, 10.0), on(16.0, 5.0), off(20.0, 0.0)];
        assert_eq!(drop_implied_on_curve(&contour), contour);
    }
}
