//! Mass-spring soft bodies.

use crate::config::BodyConfig;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::geometry::{Aabb, Segment};
use crate::mode::IntegrationMode;
use crate::point::Point;
use crate::spring::Spring;
use crate::vec::Vec2;
use alloc::vec::Vec;

/// Outcome of [`Body::toggle_spring`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringToggle {
    /// A new spring was created at this index.
    Added(usize),
    /// The spring joining the pair was removed.
    Removed,
}

/// A deformable body: point masses joined by damped springs.
///
/// Points and springs live in dense vectors; springs refer to points by
/// index. Every edit keeps those indices valid, so the per-step physics can
/// index without checks.
#[derive(Clone, Debug)]
pub struct Body<F: Float> {
    points: Vec<Point<F>>,
    springs: Vec<Spring<F>>,
    config: BodyConfig<F>,
}

impl<F: Float> Body<F> {
    /// Build and initialize a body from authored points and spring index pairs.
    pub fn new(
        config: BodyConfig<F>,
        points: Vec<Point<F>>,
        springs: &[(usize, usize)],
    ) -> Result<Self, PhysicsError> {
        config.validate()?;
        let mut body = Body {
            points,
            springs: Vec::with_capacity(springs.len()),
            config,
        };
        for &(a, b) in springs {
            body.check_pair(a, b)?;
            body.springs.push(Spring::unmeasured(a, b));
        }
        body.initialize();
        Ok(body)
    }

    /// Create a ring of points with edge springs and cross braces between
    /// opposite points.
    pub fn circle(
        config: BodyConfig<F>,
        center: Vec2<F>,
        radius: F,
        segments: usize,
    ) -> Result<Self, PhysicsError> {
        if segments < 3 {
            return Err(PhysicsError::InsufficientSegments);
        }
        let two_pi = F::two() * F::pi();
        let points = (0..segments)
            .map(|i| {
                let angle = two_pi * F::from_usize(i) / F::from_usize(segments);
                Point::new(Vec2::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ))
            })
            .collect();

        let mut springs: Vec<(usize, usize)> =
            (0..segments).map(|i| (i, (i + 1) % segments)).collect();
        if segments >= 4 {
            let half = segments / 2;
            springs.extend((0..half).map(|i| (i, i + half)));
        }

        Self::new(config, points, &springs)
    }

    /// Create a box of four corner points, braced along both diagonals.
    pub fn rectangle(
        config: BodyConfig<F>,
        center: Vec2<F>,
        width: F,
        height: F,
    ) -> Result<Self, PhysicsError> {
        let half_w = width * F::half();
        let half_h = height * F::half();
        let points = Vec::from([
            Point::new(Vec2::new(center.x - half_w, center.y - half_h)),
            Point::new(Vec2::new(center.x + half_w, center.y - half_h)),
            Point::new(Vec2::new(center.x + half_w, center.y + half_h)),
            Point::new(Vec2::new(center.x - half_w, center.y + half_h)),
        ]);
        Self::new(config, points, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)])
    }

    /// Snapshot the authored state as the starting state: previous positions
    /// match current ones, forces are cleared and every resting length is
    /// re-measured.
    pub fn initialize(&mut self) {
        for p in self.points.iter_mut() {
            p.previous_position = p.position;
            p.force = Vec2::zero();
        }
        for s in self.springs.iter_mut() {
            s.measure(&self.points);
        }
    }

    pub fn reset_forces(&mut self) {
        for p in self.points.iter_mut() {
            p.force = Vec2::zero();
        }
    }

    /// Add `force` to every point, pinned ones included.
    pub fn add_force(&mut self, force: Vec2<F>) {
        for p in self.points.iter_mut() {
            p.add_force(force);
        }
    }

    /// Accumulate every spring's force on its endpoints, equal and opposite.
    ///
    /// Under Verlet the damping term reads velocity from position history, so
    /// this must run after the previous integration and before the next one.
    pub fn apply_spring_forces(&mut self, dt: F, mode: IntegrationMode) {
        let BodyConfig { stiffness, damping, .. } = self.config;
        for spring in self.springs.iter() {
            let force = spring.force(&self.points, stiffness, damping, dt, mode);
            self.points[spring.a].force += force;
            self.points[spring.b].force -= force;
        }
    }

    /// Advance every unpinned point by one sub-step.
    pub fn integrate(&mut self, dt: F, mode: IntegrationMode) {
        let mass = self.config.point_mass;
        for p in self.points.iter_mut() {
            p.integrate(mass, dt, mode);
        }
    }

    /// Push apart every pair of points closer than two collision radii and
    /// remove their velocity along the contact normal.
    ///
    /// An unpinned point next to a pinned one takes the whole correction.
    /// Returns the number of pairs that were separated.
    pub fn resolve_intra_collisions(&mut self, dt: F, radius: F, mode: IntegrationMode) -> usize {
        let min_dist = F::two() * radius;
        let min_dist_sq = min_dist * min_dist;
        let n = self.points.len();
        let mut contacts = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                let diff = self.points[j].position - self.points[i].position;
                let dist_sq = diff.length_sq();
                if dist_sq >= min_dist_sq {
                    continue;
                }
                let (pinned_i, pinned_j) = (self.points[i].is_pinned(), self.points[j].is_pinned());
                if pinned_i && pinned_j {
                    continue;
                }
                let dist = dist_sq.sqrt();
                // Coincident points have no contact normal.
                if dist.is_near_zero(F::epsilon()) {
                    continue;
                }
                let normal = diff.scale(F::one() / dist);
                let overlap = min_dist - dist;

                match (pinned_i, pinned_j) {
                    (false, false) => {
                        let offset = normal.scale(overlap * F::half());
                        self.points[i].position -= offset;
                        self.points[j].position += offset;
                    }
                    (true, _) => self.points[j].position += normal.scale(overlap),
                    (_, true) => self.points[i].position -= normal.scale(overlap),
                }

                for k in [i, j] {
                    let p = &mut self.points[k];
                    if p.is_pinned() {
                        continue;
                    }
                    let v = p.velocity(mode, dt);
                    let tangential = v - normal.scale(v.dot(normal));
                    p.set_velocity(tangential, dt);
                }
                contacts += 1;
            }
        }
        contacts
    }

    // ----------------------------------------------------------------------
    // Topology editing (between steps only)
    // ----------------------------------------------------------------------

    /// Append a free point. Existing springs are untouched.
    pub fn add_point(&mut self, position: Vec2<F>) -> usize {
        self.points.push(Point::new(position));
        self.points.len() - 1
    }

    pub fn add_pinned_point(&mut self, position: Vec2<F>) -> usize {
        self.points.push(Point::pinned(position));
        self.points.len() - 1
    }

    /// Remove a point, every spring attached to it, and shift the remaining
    /// spring indices down so they stay dense.
    pub fn remove_point(&mut self, index: usize) -> Result<Point<F>, PhysicsError> {
        self.check_point(index)?;
        self.springs.retain(|s| !s.touches(index));
        for s in self.springs.iter_mut() {
            if s.a > index {
                s.a -= 1;
            }
            if s.b > index {
                s.b -= 1;
            }
        }
        Ok(self.points.remove(index))
    }

    /// Connect two points, at rest at their current distance.
    ///
    /// If a spring already joins the pair, its index is returned instead.
    pub fn add_spring(&mut self, a: usize, b: usize) -> Result<usize, PhysicsError> {
        self.check_pair(a, b)?;
        if let Some(existing) = self.spring_between(a, b) {
            return Ok(existing);
        }
        self.springs.push(Spring::between(a, b, &self.points));
        Ok(self.springs.len() - 1)
    }

    pub fn remove_spring(&mut self, index: usize) -> Result<Spring<F>, PhysicsError> {
        let count = self.springs.len();
        if index >= count {
            log_warn!("rejected removal of spring {} (count: {})", index, count);
            return Err(PhysicsError::SpringOutOfBounds { index, count });
        }
        Ok(self.springs.remove(index))
    }

    /// Index of the spring joining `a` and `b`, in either order.
    pub fn spring_between(&self, a: usize, b: usize) -> Option<usize> {
        self.springs.iter().position(|s| s.connects(a, b))
    }

    /// Remove the spring joining `a` and `b`, or create one if there is none.
    pub fn toggle_spring(&mut self, a: usize, b: usize) -> Result<SpringToggle, PhysicsError> {
        self.check_pair(a, b)?;
        match self.spring_between(a, b) {
            Some(index) => {
                self.springs.remove(index);
                Ok(SpringToggle::Removed)
            }
            None => self.add_spring(a, b).map(SpringToggle::Added),
        }
    }

    pub fn set_pinned(&mut self, index: usize, pinned: bool) -> Result<(), PhysicsError> {
        self.check_point(index)?;
        let p = &mut self.points[index];
        if pinned {
            p.pin();
        } else {
            p.unpin();
        }
        Ok(())
    }

    /// Flip a point's pinned flag, returning the new value.
    pub fn toggle_pin(&mut self, index: usize) -> Result<bool, PhysicsError> {
        self.check_point(index)?;
        let pinned = !self.points[index].is_pinned();
        self.set_pinned(index, pinned)?;
        Ok(pinned)
    }

    /// Place a point at rest at `position`, pinned or not.
    pub fn move_point(&mut self, index: usize, position: Vec2<F>) -> Result<(), PhysicsError> {
        self.check_point(index)?;
        self.points[index].teleport(position);
        Ok(())
    }

    /// Give a point a velocity, written to both representations so either
    /// integrator picks it up. Pinned points stay at rest.
    pub fn set_velocity(
        &mut self,
        index: usize,
        velocity: Vec2<F>,
        dt: F,
    ) -> Result<(), PhysicsError> {
        self.check_point(index)?;
        let p = &mut self.points[index];
        if !p.is_pinned() {
            p.set_velocity(velocity, dt);
        }
        Ok(())
    }

    fn check_point(&self, index: usize) -> Result<(), PhysicsError> {
        let count = self.points.len();
        if index >= count {
            log_warn!("rejected edit of point {} (count: {})", index, count);
            return Err(PhysicsError::PointOutOfBounds { index, count });
        }
        Ok(())
    }

    fn check_pair(&self, a: usize, b: usize) -> Result<(), PhysicsError> {
        self.check_point(a)?;
        self.check_point(b)?;
        if a == b {
            log_warn!("rejected spring from point {} to itself", a);
            return Err(PhysicsError::DegenerateSpring { index: a });
        }
        Ok(())
    }

    // ----------------------------------------------------------------------
    // Read-only views
    // ----------------------------------------------------------------------

    pub fn points(&self) -> &[Point<F>] {
        &self.points
    }

    pub fn springs(&self) -> &[Spring<F>] {
        &self.springs
    }

    pub fn point(&self, index: usize) -> Option<&Point<F>> {
        self.points.get(index)
    }

    /// Direct access to a point's kinematic state between steps.
    ///
    /// Pinning goes through [`Body::set_pinned`] or [`Point::pin`]; writing
    /// `position` or `previous_position` here bypasses the snapshot that
    /// pinning and [`Body::move_point`] take.
    pub fn point_mut(&mut self, index: usize) -> Option<&mut Point<F>> {
        self.points.get_mut(index)
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point<F>] {
        &mut self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn config(&self) -> &BodyConfig<F> {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BodyConfig<F> {
        &mut self.config
    }

    pub fn positions(&self) -> Vec<Vec2<F>> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Each spring as the segment between its endpoints' current positions.
    pub fn spring_segments(&self) -> Vec<Segment<F>> {
        self.springs
            .iter()
            .map(|s| Segment::new(self.points[s.a].position, self.points[s.b].position))
            .collect()
    }

    /// Average point position.
    pub fn centroid(&self) -> Vec2<F> {
        if self.points.is_empty() {
            return Vec2::zero();
        }
        let n = F::from_usize(self.points.len());
        let mut sum = Vec2::zero();
        for p in &self.points {
            sum += p.position;
        }
        sum.scale(F::one() / n)
    }

    /// Box around every current point position.
    pub fn aabb(&self) -> Option<Aabb<F>> {
        Aabb::from_points(self.points.iter().map(|p| p.position))
    }

    /// Box around every point's displacement over the last sub-step.
    pub fn displacement_aabb(&self) -> Option<Aabb<F>> {
        Aabb::from_points(self.points.iter().map(|p| p.position - p.previous_position))
    }
}
