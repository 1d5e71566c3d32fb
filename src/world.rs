//! The world: owns registered bodies and runs the sub-stepped pipeline.

use crate::body::Body;
use crate::config::{Bounds, WorldConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::geometry::{Aabb, Segment};
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::point::Point;
use crate::vec::Vec2;
use alloc::vec::Vec;
use core::fmt;

/// Stable name for a body registered with a [`World`].
///
/// Handles are never reused, so a handle to an unregistered body stays dead.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(u64);

impl BodyHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Corrections applied during one [`World::step`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub sub_steps: usize,
    /// Points pushed back out of another body's springs.
    pub inter_body_contacts: usize,
    /// Same-body point pairs pushed apart.
    pub intra_body_contacts: usize,
    /// Points clamped into the bounding box.
    pub bounds_contacts: usize,
}

/// Steps every registered body through a fixed pipeline.
///
/// Each sub-step runs, across all bodies and in this order: force reset,
/// gravity, spring forces, integration, body-vs-body collision, same-body
/// collision, bounding box clamp. Bodies never see the world; the world
/// hands each stage the parameters it needs.
pub struct World<F: Float> {
    bodies: Vec<(BodyHandle, Body<F>)>,
    next_id: u64,
    config: WorldConfig<F>,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Result<Self, PhysicsError> {
        config.validate()?;
        log_info!(
            "created world: mode {:?}, {} sub-steps, gravity {}",
            config.mode,
            config.sub_steps,
            if config.use_gravity { config.gravity } else { F::zero() }
        );
        Ok(World { bodies: Vec::new(), next_id: 0, config })
    }

    /// Add a body to the simulation. It takes part in every later step.
    ///
    /// The world owns the body from here on, so a body cannot be registered
    /// twice.
    pub fn register(&mut self, body: Body<F>) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        log_info!(
            "registered body {} with {} points and {} springs",
            handle,
            body.point_count(),
            body.spring_count()
        );
        self.bodies.push((handle, body));
        handle
    }

    /// Take a body out of the simulation, preserving the order of the rest.
    pub fn unregister(&mut self, handle: BodyHandle) -> Result<Body<F>, PhysicsError> {
        let index = self.index_of(handle)?;
        log_info!("unregistered body {}", handle);
        Ok(self.bodies.remove(index).1)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body<F>> {
        self.bodies.iter().find(|(h, _)| *h == handle).map(|(_, b)| b)
    }

    /// Mutable access for topology edits between steps.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body<F>> {
        self.bodies.iter_mut().find(|(h, _)| *h == handle).map(|(_, b)| b)
    }

    /// Registered bodies in registration order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body<F>)> {
        self.bodies.iter().map(|(h, b)| (*h, b))
    }

    pub fn handles(&self) -> Vec<BodyHandle> {
        self.bodies.iter().map(|(h, _)| *h).collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn config(&self) -> &WorldConfig<F> {
        &self.config
    }

    /// Settings may be changed between steps; `step` re-validates them.
    pub fn config_mut(&mut self) -> &mut WorldConfig<F> {
        &mut self.config
    }

    fn index_of(&self, handle: BodyHandle) -> Result<usize, PhysicsError> {
        self.bodies
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(PhysicsError::UnknownBody(handle.0))
    }

    /// Advance the simulation by one host tick.
    pub fn step(&mut self, dt: F) -> Result<StepStats, PhysicsError> {
        self.step_observed(dt, &mut NoOpStepObserver)
    }

    /// Advance the simulation by one host tick, reporting each stage.
    ///
    /// `dt` is split into `sub_steps` equal sub-steps. An invalid `dt`, world
    /// configuration or body configuration is rejected before any body is
    /// touched.
    pub fn step_observed<O: StepObserver>(
        &mut self,
        dt: F,
        observer: &mut O,
    ) -> Result<StepStats, PhysicsError> {
        if !(dt.is_finite() && dt > F::zero()) {
            log_warn!("rejected step with dt {}", dt);
            return Err(PhysicsError::InvalidTimeStep);
        }
        self.config.validate()?;
        for (handle, body) in self.bodies.iter() {
            if let Err(err) = body.config().validate() {
                log_warn!("rejected step: body {} has invalid config: {}", handle, err);
                return Err(err);
            }
        }

        let sub_steps = self.config.sub_steps.max(1);
        let sub_dt = dt / F::from_usize(sub_steps);
        if !(sub_dt > F::zero()) {
            log_warn!("rejected step: dt {} vanishes over {} sub-steps", dt, sub_steps);
            return Err(PhysicsError::InvalidTimeStep);
        }

        let mut stats = StepStats { sub_steps, ..StepStats::default() };
        for sub in 0..sub_steps {
            observer.on_sub_step_begin(sub);

            self.reset_forces();
            if self.config.use_gravity {
                self.apply_gravity();
            }
            self.apply_spring_forces(sub_dt);
            observer.on_forces_accumulated();

            self.integrate(sub_dt);
            observer.on_integrate();

            if self.config.inter_body_collisions {
                let contacts = self.resolve_inter_body_collisions();
                stats.inter_body_contacts += contacts;
                observer.on_inter_body_contacts(contacts);
            }
            if self.config.intra_body_collisions {
                let contacts = self.resolve_intra_body_collisions(sub_dt);
                stats.intra_body_contacts += contacts;
                observer.on_intra_body_contacts(contacts);
            }
            let clamped = self.resolve_world_bounds_collisions();
            stats.bounds_contacts += clamped;
            observer.on_bounds_contacts(clamped);

            log_trace!("sub-step {} done, {} points clamped", sub, clamped);
            observer.on_sub_step_complete(sub);
        }
        observer.on_step_complete();

        log_debug!(
            "stepped {} bodies: {} x {}, contacts inter {} intra {} bounds {}",
            self.bodies.len(),
            sub_steps,
            sub_dt,
            stats.inter_body_contacts,
            stats.intra_body_contacts,
            stats.bounds_contacts
        );
        Ok(stats)
    }

    // ----------------------------------------------------------------------
    // Pipeline stages
    // ----------------------------------------------------------------------

    pub fn reset_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces();
        }
    }

    /// Add each point's weight, `point_mass * g`, pointing down.
    pub fn apply_gravity(&mut self) {
        let g = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            let weight = Vec2::down().scale(body.config().point_mass * g);
            body.add_force(weight);
        }
    }

    pub fn apply_spring_forces(&mut self, dt: F) {
        let mode = self.config.mode;
        for (_, body) in self.bodies.iter_mut() {
            body.apply_spring_forces(dt, mode);
        }
    }

    pub fn integrate(&mut self, dt: F) {
        let mode = self.config.mode;
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt, mode);
        }
    }

    /// Push points of each body back out of the springs of every other body.
    ///
    /// For every ordered pair of distinct bodies, each point's motion over
    /// the last sub-step is swept against each spring of the other body. The
    /// spring's own motion is removed by shifting the point's start by the
    /// average displacement of the spring's endpoints. Returns the number of
    /// corrections.
    pub fn resolve_inter_body_collisions(&mut self) -> usize {
        let overshoot = self.config.overshoot;
        let n = self.bodies.len();
        let mut contacts = 0;
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (body, other) = pair_mut(&mut self.bodies, i, j);
                contacts += push_out_of_springs(&mut body.1, &other.1, overshoot);
            }
        }
        contacts
    }

    pub fn resolve_intra_body_collisions(&mut self, dt: F) -> usize {
        let WorldConfig { collision_radius, mode, .. } = self.config;
        self.bodies
            .iter_mut()
            .map(|(_, body)| body.resolve_intra_collisions(dt, collision_radius, mode))
            .sum()
    }

    /// Clamp every unpinned point into the bounding box, stopping its motion
    /// across each wall it touched. Returns the number of points clamped.
    pub fn resolve_world_bounds_collisions(&mut self) -> usize {
        let bounds = self.config.bounds;
        let mut clamped = 0;
        for (_, body) in self.bodies.iter_mut() {
            for p in body.points_mut() {
                if clamp_into(&bounds, p) {
                    clamped += 1;
                }
            }
        }
        clamped
    }
}

impl<F: Float> Default for World<F> {
    fn default() -> Self {
        World { bodies: Vec::new(), next_id: 0, config: WorldConfig::new() }
    }
}

/// Mutable access to `items[i]` alongside shared access to `items[j]`.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &T) {
    debug_assert!(i != j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &lo[j])
    }
}

fn push_out_of_springs<F: Float>(body: &mut Body<F>, other: &Body<F>, overshoot: F) -> usize {
    if other.spring_count() == 0 {
        return 0;
    }
    let (Some(other_box), Some(motion)) = (other.aabb(), other.displacement_aabb()) else {
        return 0;
    };
    let others = other.points();
    let mut contacts = 0;

    for p in body.points_mut() {
        if p.is_pinned() {
            continue;
        }
        // Every sweep start is previous_position plus some average spring
        // motion, which lies inside `motion`.
        let mut reach = Aabb::empty();
        reach.include(p.position);
        reach.include(p.previous_position + motion.min);
        reach.include(p.previous_position + motion.max);
        if !reach.overlaps(&other_box) {
            continue;
        }

        for spring in other.springs() {
            let (a, b) = (&others[spring.a], &others[spring.b]);
            let spring_motion = ((a.position - a.previous_position)
                + (b.position - b.previous_position))
                .scale(F::half());
            let sweep = Segment::new(p.previous_position + spring_motion, p.position);
            let edge = Segment::new(a.position, b.position);
            if !sweep.aabb().overlaps(&edge.aabb()) {
                continue;
            }
            if let Some(hit) = sweep.intersection(&edge) {
                let correction = hit - p.position;
                p.teleport(p.position + correction.scale(F::one() + overshoot));
                contacts += 1;
            }
        }
    }
    contacts
}

/// Returns whether the point was outside any wall.
fn clamp_into<F: Float>(bounds: &Bounds<F>, p: &mut Point<F>) -> bool {
    if p.is_pinned() {
        return false;
    }
    let mut hit = false;
    if p.position.y < bounds.ground_y {
        p.position.y = bounds.ground_y;
        p.stop_y();
        hit = true;
    }
    if p.position.y > bounds.ceiling_y {
        p.position.y = bounds.ceiling_y;
        p.stop_y();
        hit = true;
    }
    if p.position.x < bounds.left_x {
        p.position.x = bounds.left_x;
        p.stop_x();
        hit = true;
    }
    if p.position.x > bounds.right_x {
        p.position.x = bounds.right_x;
        p.stop_x();
        hit = true;
    }
    hit
}
