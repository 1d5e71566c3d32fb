//! Damped springs connecting two points of the same body.

use crate::float::Float;
use crate::mode::IntegrationMode;
use crate::point::Point;

/// A damped distance spring between two point indices of one body.
///
/// The resting length is taken from the endpoints' distance when the spring
/// is created (or when the body is initialized) and is not changed by the
/// simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
}

impl<F: Float> Spring<F> {
    /// A spring whose resting length has not been measured yet.
    pub fn unmeasured(a: usize, b: usize) -> Self {
        Spring { a, b, rest_length: F::zero() }
    }

    /// A spring at rest at the endpoints' current distance.
    pub fn between(a: usize, b: usize, points: &[Point<F>]) -> Self {
        let mut spring = Spring::unmeasured(a, b);
        spring.measure(points);
        spring
    }

    /// Re-derive the resting length from the current endpoint positions.
    pub fn measure(&mut self, points: &[Point<F>]) {
        self.rest_length = points[self.a].position.distance(points[self.b].position);
    }

    /// Whether this spring joins `i` and `j`, in either order.
    pub fn connects(&self, i: usize, j: usize) -> bool {
        (self.a == i && self.b == j) || (self.a == j && self.b == i)
    }

    pub fn touches(&self, i: usize) -> bool {
        self.a == i || self.b == i
    }

    /// Hooke restoring force plus axial damping, as felt by endpoint `a`.
    ///
    /// Endpoint `b` feels the exact negation. Coincident endpoints have no
    /// axis, and produce zero force.
    pub fn force(
        &self,
        points: &[Point<F>],
        stiffness: F,
        damping: F,
        dt: F,
        mode: IntegrationMode,
    ) -> crate::vec::Vec2<F> {
        debug_assert!(self.a != self.b, "spring endpoints must differ");
        debug_assert!(
            self.a < points.len() && self.b < points.len(),
            "spring endpoint out of range"
        );
        let pa = &points[self.a];
        let pb = &points[self.b];

        let diff = pa.position - pb.position;
        let distance = diff.length();
        if distance.is_near_zero(F::epsilon()) {
            return crate::vec::Vec2::zero();
        }
        let direction = diff.scale(F::one() / distance);

        let extension = distance - self.rest_length;
        let restoring = direction.scale(-stiffness * extension);

        let relative_velocity = pa.velocity(mode, dt) - pb.velocity(mode, dt);
        let damping_force = direction.scale(-damping * relative_velocity.dot(direction));

        restoring + damping_force
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec2;

    fn pair(a: Vec2<f64>, b: Vec2<f64>) -> [Point<f64>; 2] {
        [Point::new(a), Point::new(b)]
    }

    #[test]
    fn between_measures_rest_length() {
        let points = pair(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        let spring = Spring::between(0, 1, &points);
        assert_eq!(spring.rest_length, 5.0);
    }

    #[test]
    fn stretched_spring_pulls_a_towards_b() {
        let points = pair(Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0));
        let spring = Spring { a: 0, b: 1, rest_length: 1.0 };
        let f = spring.force(&points, 10.0, 0.0, 0.1, IntegrationMode::Euler);
        assert_eq!(f, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let points = pair(Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0));
        let spring = Spring { a: 0, b: 1, rest_length: 1.0 };
        let f = spring.force(&points, 4.0, 0.0, 0.1, IntegrationMode::Euler);
        assert_eq!(f, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn coincident_endpoints_give_zero_force() {
        let points = pair(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0));
        let spring = Spring { a: 0, b: 1, rest_length: 1.0 };
        let f = spring.force(&points, 100.0, 5.0, 0.1, IntegrationMode::Verlet);
        assert_eq!(f, Vec2::zero());
    }

    #[test]
    fn damping_uses_mode_specific_velocity() {
        let mut points = pair(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        // A drifts away from B at 1 unit/s, visible only through Verlet history.
        points[0].previous_position = Vec2::new(0.1, 0.0);
        let spring = Spring { a: 0, b: 1, rest_length: 1.0 };

        let euler = spring.force(&points, 0.0, 1.0, 0.1, IntegrationMode::Euler);
        assert_eq!(euler, Vec2::zero());

        let verlet = spring.force(&points, 0.0, 1.0, 0.1, IntegrationMode::Verlet);
        // vA = (-1, 0), direction = (-1, 0): damping resists separation.
        assert!((verlet.x - 1.0).abs() < 1e-12);
        assert_eq!(verlet.y, 0.0);
    }

    #[test]
    fn connects_is_order_insensitive() {
        let spring = Spring::<f32>::unmeasured(2, 7);
        assert!(spring.connects(7, 2));
        assert!(spring.connects(2, 7));
        assert!(!spring.connects(2, 3));
        assert!(spring.touches(7));
    }
}
