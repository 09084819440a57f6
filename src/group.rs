use crate::collision::wall_reflection;
use crate::error::{Error, Result};
use crate::particle::{Particle, Tag};
use glam::DVec2;
use log::debug;
use rand::Rng;
use rayon::prelude::*;

/// A homogeneous set of particles sharing mass, radius and tag.
///
/// `max_x`/`max_y` bound the particles' top-left-normalized positions; the
/// container walls sit at 0 and at these bounds.
#[derive(Debug, Clone)]
pub struct ParticleGroup {
    particles: Vec<Particle>,
    mass: u32,
    radius: u32,
    tag: Tag,
    max_x: f64,
    max_y: f64,
    max_speed: f64,
}

impl ParticleGroup {
    /// Create a group of `count` particles placed uniformly in `[0, max_x] x [0, max_y]`.
    ///
    /// One velocity is drawn for the whole group, each component uniform in
    /// `[-max_speed, max_speed]`, so every member moves identically until its
    /// first collision.
    ///
    /// Errors:
    /// - `Error::InvalidParam` on zero mass/radius or negative/non-finite bounds or speed.
    #[allow(clippy::too_many_arguments)]
    pub fn new<R: Rng>(
        count: usize,
        mass: u32,
        radius: u32,
        tag: Tag,
        max_x: f64,
        max_y: f64,
        max_speed: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let mut group = Self::empty(mass, radius, tag, max_x, max_y, max_speed)?;

        let velocity = DVec2::new(
            rng.random_range(-max_speed..=max_speed),
            rng.random_range(-max_speed..=max_speed),
        );
        group.particles.reserve(count);
        for _ in 0..count {
            let position = DVec2::new(
                rng.random_range(0.0..=max_x),
                rng.random_range(0.0..=max_y),
            );
            group
                .particles
                .push(Particle::new(position, velocity, mass, radius, tag)?);
        }

        debug!(
            "built group of {count} (mass {mass}, radius {radius}) with shared velocity ({:.3}, {:.3})",
            velocity.x, velocity.y
        );
        Ok(group)
    }

    /// Create a group with no particles.
    pub fn empty(
        mass: u32,
        radius: u32,
        tag: Tag,
        max_x: f64,
        max_y: f64,
        max_speed: f64,
    ) -> Result<Self> {
        if mass == 0 {
            return Err(Error::InvalidParam("mass must be > 0".into()));
        }
        if radius == 0 {
            return Err(Error::InvalidParam("radius must be > 0".into()));
        }
        if !max_x.is_finite() || !max_y.is_finite() || max_x < 0.0 || max_y < 0.0 {
            return Err(Error::InvalidParam(format!(
                "group bounds must be finite and >= 0, got ({max_x}, {max_y})"
            )));
        }
        if !max_speed.is_finite() || max_speed < 0.0 {
            return Err(Error::InvalidParam(
                "max_speed must be finite and >= 0".into(),
            ));
        }
        Ok(Self {
            particles: Vec::new(),
            mass,
            radius,
            tag,
            max_x,
            max_y,
            max_speed,
        })
    }

    /// Reflect every member moving into a wall it touches or has crossed.
    pub fn handle_wall_collisions(&mut self) {
        let bounds = self.bounds();
        self.particles.par_iter_mut().for_each(|p| {
            p.velocity = wall_reflection(p, bounds);
        });
    }

    /// Advance every member by one tick: `position += velocity`.
    pub fn integrate_positions(&mut self) {
        self.particles.par_iter_mut().for_each(|p| {
            p.position += p.velocity;
        });
    }

    /// Append a particle.
    ///
    /// Errors:
    /// - `Error::MismatchedParticle` if its mass, radius or tag differ from the group's.
    pub fn add(&mut self, particle: Particle) -> Result<()> {
        if particle.mass() != self.mass
            || particle.radius() != self.radius
            || particle.tag() != self.tag
        {
            return Err(Error::MismatchedParticle {
                mass: particle.mass(),
                radius: particle.radius(),
                group_mass: self.mass,
                group_radius: self.radius,
            });
        }
        self.particles.push(particle);
        Ok(())
    }

    /// Remove every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn get(&self, index: usize) -> Result<&Particle> {
        let len = self.particles.len();
        self.particles
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Particle> {
        let len = self.particles.len();
        self.particles
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the members. Only position and velocity are writable.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn mass(&self) -> u32 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Largest legal position on each axis.
    #[inline]
    pub fn bounds(&self) -> DVec2 {
        DVec2::new(self.max_x, self.max_y)
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    #[inline]
    pub fn kind_key(&self) -> (u32, u32) {
        (self.mass, self.radius)
    }

    /// Total kinetic energy of the members (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}
