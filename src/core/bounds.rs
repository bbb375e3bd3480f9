use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box in world or local space.
///
/// An `Aabb` is an ephemeral, derived value: it is recomputed from geometry
/// on demand and never cached, so it cannot go stale when a transform or a
/// mesh changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Folds an iterator of points into their enclosing box.
    ///
    /// Returns `None` for an empty iterator; a single point yields a
    /// zero-size (degenerate) box.
    ///
    /// The fold uses IEEE min/max, so a NaN coordinate is ignored when at
    /// least one other point supplied a finite value for that axis. A box
    /// that still ends up non-finite is caught by [`Aabb::is_degenerate`].
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self::new(first, first);
        for p in iter {
            aabb.expand(&p);
        }
        Some(aabb)
    }

    /// Grows the box to include `point`.
    pub fn expand(&mut self, point: &Point3<f32>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Smallest box enclosing both operands.
    pub fn union(&self, other: &Aabb) -> Aabb {
        let mut result = *self;
        result.expand(&other.min);
        result.expand(&other.max);
        result
    }

    /// Componentwise extent (`max - min`).
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest of the three extents.
    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// True when the box cannot anchor a fit: all extents zero, or any
    /// extent NaN/infinite.
    ///
    /// Each extent is checked individually; `max_dimension` alone would
    /// hide a NaN axis because IEEE max ignores NaN operands.
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        let finite = size.x.is_finite() && size.y.is_finite() && size.z.is_finite();
        !(finite && self.max_dimension() > 0.0)
    }

    /// Maps the box through a uniform scale followed by a translation,
    /// the exact transform order the fit engine prescribes.
    pub fn scaled_translated(&self, scale: f32, translation: &Vector3<f32>) -> Aabb {
        Aabb::new(
            (self.min * scale) + translation,
            (self.max * scale) + translation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_points_folds_min_max() {
        let aabb = Aabb::from_points(vec![
            Point3::new(1.0, -2.0, 0.5),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 4.0, 3.0));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn size_center_max_dimension() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 1.0));
        assert_eq!(aabb.size(), Vector3::new(2.0, 4.0, 1.0));
        assert_eq!(aabb.center(), Point3::new(1.0, 2.0, 0.5));
        assert_relative_eq!(aabb.max_dimension(), 4.0);
    }

    #[test]
    fn union_encloses_both() {
        let a = Aabb::new(Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(0.0, -3.0, 0.5), Point3::new(4.0, 0.5, 0.75));
        let u = a.union(&b);
        assert_eq!(u.min, Point3::new(-1.0, -3.0, 0.0));
        assert_eq!(u.max, Point3::new(4.0, 1.0, 1.0));
    }

    #[test]
    fn degenerate_detection() {
        let point = Aabb::new(Point3::origin(), Point3::origin());
        assert!(point.is_degenerate());

        let nan = Aabb::new(Point3::new(f32::NAN, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(nan.is_degenerate());

        // A flat box is fine as long as one extent is non-zero.
        let flat = Aabb::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0));
        assert!(!flat.is_degenerate());
    }

    #[test]
    fn single_nan_axis_is_degenerate() {
        // The other two extents are finite, so a bare max-dimension check
        // would let these boxes through.
        let nan_y = Aabb::new(Point3::new(0.0, f32::NAN, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(nan_y.is_degenerate());

        let nan_max = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, f32::NAN));
        assert!(nan_max.is_degenerate());

        let inf_x = Aabb::new(Point3::origin(), Point3::new(f32::INFINITY, 1.0, 1.0));
        assert!(inf_x.is_degenerate());
    }

    #[test]
    fn scaled_translated_applies_scale_then_offset() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 1.0));
        let mapped = aabb.scaled_translated(0.25, &Vector3::new(-0.25, -0.5, -0.125));
        assert_relative_eq!(mapped.center().coords.norm(), 0.0, epsilon = 1e-6);
        assert_eq!(mapped.size(), Vector3::new(0.5, 1.0, 0.25));
    }
}
