use crate::collision::{apply_collision, pair_collision_exists};
use crate::config::GroupSpec;
use crate::error::{Error, Result};
use crate::group::ParticleGroup;
use crate::histogram::SpeedHistogram;
use crate::particle::Particle;
use glam::DVec2;
use log::{info, trace};
use rand::Rng;

/// A rectangular container holding several particle groups.
///
/// Positions inside the groups are relative to the container; `top_left`
/// only tells a renderer where the container sits on screen.
#[derive(Debug, Clone)]
pub struct SimulationSpace {
    top_left: DVec2,
    width: u32,
    height: u32,
    groups: Vec<ParticleGroup>,
}

impl SimulationSpace {
    /// Build one randomly placed group per distinct `(mass, radius)` in `specs`.
    ///
    /// Groups are ordered by mass, then radius; a later spec repeating an
    /// earlier kind is ignored. Each group's positional bound is the container
    /// dimension minus one diameter and its max initial speed is `radius / mass`.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if a particle's diameter exceeds the container.
    pub fn new<R: Rng>(
        top_left: DVec2,
        specs: &[GroupSpec],
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<Self> {
        let mut kinds = specs.to_vec();
        kinds.sort_by_key(GroupSpec::kind_key);
        kinds.dedup_by_key(|spec| spec.kind_key());

        let mut groups = Vec::with_capacity(kinds.len());
        for spec in &kinds {
            let diameter = 2.0 * f64::from(spec.radius);
            let max_x = f64::from(width) - diameter;
            let max_y = f64::from(height) - diameter;
            if max_x < 0.0 || max_y < 0.0 {
                return Err(Error::InvalidParam(format!(
                    "particles of radius {} do not fit in a {width}x{height} container",
                    spec.radius
                )));
            }
            let max_speed = f64::from(spec.radius) / f64::from(spec.mass.max(1));
            groups.push(ParticleGroup::new(
                spec.count,
                spec.mass,
                spec.radius,
                spec.tag,
                max_x,
                max_y,
                max_speed,
                rng,
            )?);
        }

        let space = Self::from_groups(top_left, groups, width, height);
        info!(
            "simulation space {width}x{height}: {} groups, {} particles",
            space.groups.len(),
            space.particle_count()
        );
        Ok(space)
    }

    /// Build a space around groups constructed elsewhere, kept in the given order.
    pub fn from_groups(
        top_left: DVec2,
        groups: Vec<ParticleGroup>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            top_left,
            width,
            height,
            groups,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Walls are handled first, then collisions between every pair of
    /// particles across all groups, then positions move. Returns the number of
    /// particle pairs whose velocities were resolved.
    ///
    /// Errors:
    /// - `Error::CoincidentCenters` from the collision resolution.
    pub fn tick(&mut self) -> Result<usize> {
        for group in &mut self.groups {
            group.handle_wall_collisions();
        }

        let collisions = self.resolve_collisions()?;

        for group in &mut self.groups {
            group.integrate_positions();
        }

        trace!("tick resolved {collisions} collisions");
        Ok(collisions)
    }

    /// Resolve pairwise collisions over the particles of every group, in
    /// group order then member order.
    ///
    /// A particle hit by an earlier one this tick is no longer taken as the
    /// current particle, but it can still be hit again. A current particle
    /// keeps scanning after its first hit, and every pair sees the velocities
    /// left by the pairs before it, so three or more particles colliding at
    /// once resolve in index order rather than simultaneously.
    fn resolve_collisions(&mut self) -> Result<usize> {
        let mut flat: Vec<&mut Particle> = self
            .groups
            .iter_mut()
            .flat_map(|g| g.particles_mut().iter_mut())
            .collect();
        let n = flat.len();
        let mut resolved = vec![false; n];
        let mut collisions = 0usize;

        for i in 0..n {
            if resolved[i] {
                continue;
            }
            for j in 0..n {
                if j == i || !pair_collision_exists(&*flat[i], &*flat[j]) {
                    continue;
                }
                let (current, other) = pair_mut(&mut flat, i, j);
                apply_collision(current, other)?;
                resolved[j] = true;
                collisions += 1;
            }
        }
        Ok(collisions)
    }

    /// Every particle, group by group, for drawing or analysis.
    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.groups.iter().flat_map(|g| g.particles().iter())
    }

    pub fn particle_count(&self) -> usize {
        self.groups.iter().map(ParticleGroup::len).sum()
    }

    pub fn groups(&self) -> &[ParticleGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Result<&ParticleGroup> {
        let len = self.groups.len();
        self.groups
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn group_mut(&mut self, index: usize) -> Result<&mut ParticleGroup> {
        let len = self.groups.len();
        self.groups
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// One histogram per group, in group order.
    ///
    /// Fails with [`Error::EmptyGroup`] if any group has no particles.
    pub fn histograms(&self, bucket_count: usize) -> Result<Vec<SpeedHistogram>> {
        self.groups
            .iter()
            .map(|g| SpeedHistogram::compute(g, bucket_count))
            .collect()
    }

    /// Total kinetic energy of all groups (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.groups.iter().map(ParticleGroup::kinetic_energy).sum()
    }

    pub fn top_left(&self) -> DVec2 {
        self.top_left
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Two distinct mutable elements of `items`, in argument order.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
