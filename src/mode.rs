//! Integration scheme selection.

/// Which time integrator advances the points, and therefore which per-point
/// field carries the authoritative velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationMode {
    /// Semi-implicit Euler: velocity is stored on the point.
    #[default]
    Euler,
    /// Position Verlet: velocity is implied by `position - previous_position`.
    Verlet,
}
