//! Configuration for bodies and the world that steps them.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::geometry::Segment;
use crate::mode::IntegrationMode;
use crate::vec::Vec2;

/// Per-body material parameters.
///
/// # Builder Pattern
/// ```
/// use softbody2d::config::BodyConfig;
///
/// let config: BodyConfig<f32> = BodyConfig::new()
///     .with_point_mass(0.5)
///     .with_stiffness(250.0)
///     .with_damping(2.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyConfig<F: Float> {
    /// Mass of every point in the body. Default: 1.
    pub point_mass: F,
    /// Spring constant shared by every spring. Default: 100.
    pub stiffness: F,
    /// Axial damping coefficient shared by every spring. Default: 1.
    pub damping: F,
}

impl<F: Float> BodyConfig<F> {
    pub fn new() -> Self {
        BodyConfig {
            point_mass: F::one(),
            stiffness: F::from_f32(100.0),
            damping: F::one(),
        }
    }

    pub fn with_point_mass(mut self, point_mass: F) -> Self {
        self.point_mass = point_mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.point_mass.is_finite() && self.point_mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(self.stiffness.is_finite() && self.stiffness >= F::zero()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        if !(self.damping.is_finite() && self.damping >= F::zero()) {
            return Err(PhysicsError::InvalidDamping);
        }
        Ok(())
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// The walls points are kept inside of.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds<F: Float> {
    pub ground_y: F,
    pub ceiling_y: F,
    pub left_x: F,
    pub right_x: F,
}

impl<F: Float> Bounds<F> {
    pub fn new(ground_y: F, ceiling_y: F, left_x: F, right_x: F) -> Self {
        Bounds { ground_y, ceiling_y, left_x, right_x }
    }

    /// A box no finite point can leave.
    pub fn unbounded() -> Self {
        let inf = F::infinity();
        Bounds { ground_y: -inf, ceiling_y: inf, left_x: -inf, right_x: inf }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        // NaN edges fail both comparisons.
        if self.ground_y <= self.ceiling_y && self.left_x <= self.right_x {
            Ok(())
        } else {
            Err(PhysicsError::InvalidBounds)
        }
    }

    /// The four walls as segments: ground, ceiling, left, right.
    pub fn outline(&self) -> [Segment<F>; 4] {
        let bottom_left = Vec2::new(self.left_x, self.ground_y);
        let bottom_right = Vec2::new(self.right_x, self.ground_y);
        let top_left = Vec2::new(self.left_x, self.ceiling_y);
        let top_right = Vec2::new(self.right_x, self.ceiling_y);
        [
            Segment::new(bottom_left, bottom_right),
            Segment::new(top_left, top_right),
            Segment::new(bottom_left, top_left),
            Segment::new(bottom_right, top_right),
        ]
    }
}

impl<F: Float> Default for Bounds<F> {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// World-wide simulation settings.
///
/// # Builder Pattern
/// ```
/// use softbody2d::config::{Bounds, WorldConfig};
/// use softbody2d::IntegrationMode;
///
/// let config: WorldConfig<f32> = WorldConfig::new()
///     .with_gravity(9.81)
///     .with_bounds(Bounds::new(0.0, 20.0, -10.0, 10.0))
///     .with_mode(IntegrationMode::Verlet)
///     .with_sub_steps(8)
///     .with_inter_body_collisions(true);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    /// Whether gravity is applied. Default: false.
    pub use_gravity: bool,
    /// Downward gravitational acceleration. Default: 9.81.
    pub gravity: F,
    /// Walls every point is clamped into. Default: unbounded.
    pub bounds: Bounds<F>,
    /// Integrator used by every body. Default: Euler.
    pub mode: IntegrationMode,
    /// Number of sub-steps per `step` call. Default: 1.
    pub sub_steps: usize,
    /// Points collide with other points of the same body. Default: false.
    pub intra_body_collisions: bool,
    /// Points collide with springs of other bodies. Default: false.
    pub inter_body_collisions: bool,
    /// Radius of every point for same-body collisions. Default: 0.1.
    pub collision_radius: F,
    /// How far past the crossing a point is pushed back, as a fraction of
    /// the correction. Default: 0.01.
    pub overshoot: F,
}

impl<F: Float> WorldConfig<F> {
    pub fn new() -> Self {
        WorldConfig {
            use_gravity: false,
            gravity: F::from_f32(9.81),
            bounds: Bounds::unbounded(),
            mode: IntegrationMode::Euler,
            sub_steps: 1,
            intra_body_collisions: false,
            inter_body_collisions: false,
            collision_radius: F::from_f32(0.1),
            overshoot: F::from_f32(0.01),
        }
    }

    /// Enable gravity with the given downward acceleration.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.use_gravity = true;
        self.gravity = gravity;
        self
    }

    pub fn without_gravity(mut self) -> Self {
        self.use_gravity = false;
        self
    }

    pub fn with_bounds(mut self, bounds: Bounds<F>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_mode(mut self, mode: IntegrationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the number of sub-steps (at least one).
    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn with_intra_body_collisions(mut self, enabled: bool) -> Self {
        self.intra_body_collisions = enabled;
        self
    }

    pub fn with_inter_body_collisions(mut self, enabled: bool) -> Self {
        self.inter_body_collisions = enabled;
        self
    }

    pub fn with_collision_radius(mut self, radius: F) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn with_overshoot(mut self, overshoot: F) -> Self {
        self.overshoot = overshoot;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        self.bounds.validate()?;
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidGravity);
        }
        if !(self.overshoot.is_finite() && self.overshoot >= F::zero()) {
            return Err(PhysicsError::InvalidOvershoot);
        }
        if !(self.collision_radius.is_finite() && self.collision_radius >= F::zero()) {
            return Err(PhysicsError::InvalidCollisionRadius);
        }
        Ok(())
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
