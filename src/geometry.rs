//! Segment intersection and axis-aligned boxes for the collision passes.

use crate::float::Float;
use crate::vec::Vec2;

/// A line segment between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment<F: Float> {
    pub start: Vec2<F>,
    pub end: Vec2<F>,
}

impl<F: Float> Segment<F> {
    pub fn new(start: Vec2<F>, end: Vec2<F>) -> Self {
        Segment { start, end }
    }

    /// Intersection point with `other`, if the two segments cross.
    pub fn intersection(&self, other: &Segment<F>) -> Option<Vec2<F>> {
        segment_intersection(self.start, self.end, other.start, other.end)
    }

    pub fn aabb(&self) -> Aabb<F> {
        Aabb::new(self.start.min(self.end), self.start.max(self.end))
    }
}

/// Intersection of segment `a -> b` with segment `c -> d`.
///
/// Uses the parametric form `a + t*r` / `c + u*s` with `r = b - a`,
/// `s = d - c`. Parallel and collinear segments (`r x s` near zero) never
/// intersect, even when collinear ones overlap. Endpoints count as touching:
/// both `t` and `u` are accepted on the closed interval `[0, 1]`.
pub fn segment_intersection<F: Float>(
    a: Vec2<F>,
    b: Vec2<F>,
    c: Vec2<F>,
    d: Vec2<F>,
) -> Option<Vec2<F>> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.is_near_zero(F::epsilon()) {
        return None;
    }

    let ac = c - a;
    let t = ac.cross(s) / denom;
    let u = ac.cross(r) / denom;

    let zero = F::zero();
    let one = F::one();
    if t >= zero && t <= one && u >= zero && u <= one {
        Some(a + r.scale(t))
    } else {
        None
    }
}

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Aabb<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>) -> Self {
        Aabb { min, max }
    }

    /// An inverted box that any `include` call replaces.
    pub fn empty() -> Self {
        let inf = F::infinity();
        Aabb {
            min: Vec2::new(inf, inf),
            max: Vec2::new(-inf, -inf),
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points<I: IntoIterator<Item = Vec2<F>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Aabb::new(first, first);
        for p in iter {
            aabb.include(p);
        }
        Some(aabb)
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Vec2<F>) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Boxes that only touch on an edge count as overlapping.
    pub fn overlaps(&self, other: &Aabb<F>) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn contains(&self, p: Vec2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_diagonals_meet_in_the_middle() {
        let hit = segment_intersection(
            Vec2::new(0.0f64, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        );
        assert_eq!(hit, Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn touching_endpoint_counts() {
        let hit = segment_intersection(
            Vec2::new(0.0f32, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
        );
        assert_eq!(hit, Some(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn short_segment_falls_short() {
        let hit = segment_intersection(
            Vec2::new(0.0f32, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn aabb_from_points_and_overlap() {
        let a = Aabb::from_points([Vec2::new(0.0f32, 0.0), Vec2::new(2.0, 1.0)]).unwrap();
        let b = Aabb::from_points([Vec2::new(2.0f32, 1.0), Vec2::new(3.0, 3.0)]).unwrap();
        let c = Aabb::from_points([Vec2::new(5.0f32, 5.0)]).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.contains(Vec2::new(1.0, 0.5)));
        assert!(Aabb::<f32>::from_points(core::iter::empty()).is_none());
    }

    #[test]
    fn empty_box_grows_to_first_point() {
        let mut aabb = Aabb::<f64>::empty();
        aabb.include(Vec2::new(1.0, -1.0));
        assert_eq!(aabb.min, Vec2::new(1.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(1.0, -1.0));
    }
}
