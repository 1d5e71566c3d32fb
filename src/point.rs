//! Point masses: the particles a soft body is made of.

use crate::float::Float;
use crate::mode::IntegrationMode;
use crate::vec::Vec2;

/// A simulated particle.
///
/// Mass lives on the owning body, so a point only carries kinematic state.
/// Under [`IntegrationMode::Euler`] `velocity` is authoritative; under
/// [`IntegrationMode::Verlet`] the velocity is implied by
/// `position - previous_position`. Both integrators keep the other field in
/// step so the mode can be switched between steps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point<F: Float> {
    pub position: Vec2<F>,
    pub previous_position: Vec2<F>,
    pub velocity: Vec2<F>,
    /// Accumulated force for the current sub-step.
    pub force: Vec2<F>,
    /// Only changed through [`Point::pin`] and [`Point::unpin`], so a pinned
    /// point always has a position snapshot.
    pinned: bool,
}

impl<F: Float> Point<F> {
    pub fn new(position: Vec2<F>) -> Self {
        Point {
            position,
            previous_position: position,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            pinned: false,
        }
    }

    pub fn pinned(position: Vec2<F>) -> Self {
        Point { pinned: true, ..Point::new(position) }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn add_force(&mut self, force: Vec2<F>) {
        self.force += force;
    }

    /// Velocity as seen by the given integrator.
    ///
    /// Verlet reconstructs it from position history, so `dt` must be the
    /// sub-step the history was produced with.
    pub fn velocity(&self, mode: IntegrationMode, dt: F) -> Vec2<F> {
        match mode {
            IntegrationMode::Euler => self.velocity,
            IntegrationMode::Verlet => {
                if dt.is_near_zero(F::from_f32(1e-30)) {
                    return Vec2::zero();
                }
                (self.position - self.previous_position).scale(F::one() / dt)
            }
        }
    }

    /// Overwrite the velocity in both representations.
    pub fn set_velocity(&mut self, velocity: Vec2<F>, dt: F) {
        self.velocity = velocity;
        self.previous_position = self.position - velocity.scale(dt);
    }

    /// Advance one sub-step. Pinned points never move.
    pub fn integrate(&mut self, mass: F, dt: F, mode: IntegrationMode) {
        if self.pinned {
            return;
        }
        let acceleration = self.force.scale(F::one() / mass);
        match mode {
            IntegrationMode::Euler => {
                self.velocity += acceleration.scale(dt);
                self.previous_position = self.position;
                self.position += self.velocity.scale(dt);
            }
            IntegrationMode::Verlet => {
                let new_position = self.position.scale(F::two()) - self.previous_position
                    + acceleration.scale(dt * dt);
                self.previous_position = self.position;
                self.position = new_position;
                self.velocity = (self.position - self.previous_position).scale(F::one() / dt);
            }
        }
    }

    /// Kill horizontal motion in both velocity representations.
    pub fn stop_x(&mut self) {
        self.velocity.x = F::zero();
        self.previous_position.x = self.position.x;
    }

    /// Kill vertical motion in both velocity representations.
    pub fn stop_y(&mut self) {
        self.velocity.y = F::zero();
        self.previous_position.y = self.position.y;
    }

    /// Place the point at rest at `position`.
    pub fn teleport(&mut self, position: Vec2<F>) {
        self.position = position;
        self.previous_position = position;
        self.velocity = Vec2::zero();
    }

    /// Pinning freezes the point where it is.
    pub fn pin(&mut self) {
        self.pinned = true;
        self.previous_position = self.position;
        self.velocity = Vec2::zero();
    }

    pub fn unpin(&mut self) {
        self.pinned = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_point_ignores_force() {
        let mut p = Point::pinned(Vec2::new(5.0f32, 5.0));
        p.add_force(Vec2::new(1000.0, 1000.0));
        p.integrate(1.0, 1.0 / 60.0, IntegrationMode::Verlet);
        p.integrate(1.0, 1.0 / 60.0, IntegrationMode::Euler);
        assert_eq!(p.position, Vec2::new(5.0, 5.0));
        assert_eq!(p.previous_position, Vec2::new(5.0, 5.0));
        assert_eq!(p.force, Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn euler_step_is_semi_implicit() {
        let mut p = Point::new(Vec2::new(0.0f64, 0.0));
        p.add_force(Vec2::new(2.0, 0.0));
        p.integrate(2.0, 0.5, IntegrationMode::Euler);
        // v = 0 + (2/2)*0.5 = 0.5, x = 0 + 0.5*0.5
        assert_eq!(p.velocity, Vec2::new(0.5, 0.0));
        assert_eq!(p.position, Vec2::new(0.25, 0.0));
        assert_eq!(p.previous_position, Vec2::zero());
    }

    #[test]
    fn verlet_keeps_implied_and_stored_velocity_in_step() {
        let mut p = Point::new(Vec2::new(0.0f64, 0.0));
        p.previous_position = Vec2::new(-1.0, 0.0);
        p.integrate(1.0, 1.0, IntegrationMode::Verlet);
        assert_eq!(p.position, Vec2::new(1.0, 0.0));
        assert_eq!(p.previous_position, Vec2::new(0.0, 0.0));
        assert_eq!(p.velocity(IntegrationMode::Verlet, 1.0), Vec2::new(1.0, 0.0));
        assert_eq!(p.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn stop_axis_zeroes_both_representations() {
        let mut p = Point::new(Vec2::new(1.0f32, 1.0));
        p.set_velocity(Vec2::new(3.0, -4.0), 0.5);
        p.stop_y();
        assert_eq!(p.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(p.velocity(IntegrationMode::Verlet, 0.5).y, 0.0);
        assert_eq!(p.velocity(IntegrationMode::Verlet, 0.5).x, 3.0);
    }

    #[test]
    fn pin_snapshots_position() {
        let mut p = Point::new(Vec2::new(1.0f32, 1.0));
        p.set_velocity(Vec2::new(1.0, 0.0), 1.0);
        p.pin();
        assert!(p.is_pinned());
        assert_eq!(p.previous_position, p.position);
        assert_eq!(p.velocity, Vec2::zero());
    }
}
