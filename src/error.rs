//! Error types for physics operations.

use thiserror::Error;

/// Errors reported when building or editing bodies, or driving the world.
///
/// The per-step physics itself is infallible; these cover the inputs handed to it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Spring stiffness must be non-negative and finite.
    #[error("spring stiffness must be non-negative and finite")]
    InvalidStiffness,
    /// Spring damping must be non-negative and finite.
    #[error("spring damping must be non-negative and finite")]
    InvalidDamping,
    /// Time steps must be positive and finite.
    #[error("time step must be positive and finite")]
    InvalidTimeStep,
    /// Point index is out of bounds.
    #[error("point index {index} out of bounds (count: {count})")]
    PointOutOfBounds { index: usize, count: usize },
    /// Spring index is out of bounds.
    #[error("spring index {index} out of bounds (count: {count})")]
    SpringOutOfBounds { index: usize, count: usize },
    /// A spring cannot connect a point to itself.
    #[error("spring connects point {index} to itself")]
    DegenerateSpring { index: usize },
    /// Gravity must be finite.
    #[error("gravity must be finite")]
    InvalidGravity,
    /// The inter-body overshoot factor must be non-negative and finite.
    #[error("overshoot must be non-negative and finite")]
    InvalidOvershoot,
    /// Bounding box edges are inverted.
    #[error("bounding box must have ground <= ceiling and left wall <= right wall")]
    InvalidBounds,
    /// Collision radius must be non-negative and finite.
    #[error("collision radius must be non-negative and finite")]
    InvalidCollisionRadius,
    /// The handle does not name a registered body.
    #[error("no body registered under handle {0}")]
    UnknownBody(u64),
    /// Shape builders need enough points to enclose an area.
    #[error("shape needs at least 3 segments")]
    InsufficientSegments,
}
