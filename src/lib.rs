//! 2D mass-spring soft bodies for games and interactive tools.
//!
//! `softbody2d` simulates deformable bodies made of point masses joined by
//! damped springs. A [`World`] owns the registered bodies and advances them
//! with a fixed, sub-stepped pipeline; the host supplies the tick length.
//!
//! # Features
//!
//! - **Two integrators**: semi-implicit Euler or position Verlet, picked at runtime
//! - **Damped springs**: Hooke restoring force plus damping along the spring axis
//! - **Bounding box**: ground, ceiling and walls with velocity stopping
//! - **Self-collision**: point-vs-point separation inside one body
//! - **Body-vs-body collision**: swept point-vs-spring tests between bodies
//! - **Topology editing**: add/remove points and springs with dense re-indexing
//! - **Observable**: Monitor each pipeline stage via the `StepObserver` trait
//! - **`no_std` compatible**: Needs only `alloc`. The default `std` feature
//!   adds structured logging through `ftlog`; disable it for embedded and
//!   WASM targets
//!
//! # Example
//! ```
//! use softbody2d::{Body, BodyConfig, Bounds, Vec2, World, WorldConfig};
//!
//! let config = WorldConfig::new()
//!     .with_gravity(9.81)
//!     .with_bounds(Bounds::new(0.0, 20.0, -10.0, 10.0))
//!     .with_sub_steps(8);
//! let mut world: World<f32> = World::new(config).unwrap();
//! let ball = Body::circle(BodyConfig::new(), Vec2::new(0.0, 5.0), 1.0, 12).unwrap();
//! let handle = world.register(ball);
//!
//! for _ in 0..60 {
//!     world.step(1.0 / 60.0).unwrap();
//! }
//! assert!(world.body(handle).unwrap().centroid().y < 5.0);
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod logging;

pub mod float;
pub mod vec;
pub mod geometry;
pub mod mode;
pub mod point;
pub mod spring;
pub mod body;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use geometry::{segment_intersection, Aabb, Segment};
pub use mode::IntegrationMode;
pub use point::Point;
pub use spring::Spring;
pub use body::{Body, SpringToggle};
pub use world::{BodyHandle, StepStats, World};
pub use config::{BodyConfig, Bounds, WorldConfig};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::PhysicsError;
