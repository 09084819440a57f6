use crate::error::{Error, Result};
use eframe::egui::Color32;
use glam::DVec2;

/// Display attribute carried by every particle. Opaque to the physics.
pub type Tag = Color32;

/// A circular gas particle.
///
/// Position is the top-left corner of the particle's bounding square, so a
/// particle of radius `r` at `position` is drawn centred on `position + (r, r)`.
/// Only `position` and `velocity` change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in container coordinates.
    pub position: DVec2,
    /// Displacement per tick.
    pub velocity: DVec2,
    mass: u32,
    radius: u32,
    tag: Tag,
}

impl Particle {
    /// Create a new particle after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `mass` or `radius` is zero, or either vector is NaN/inf.
    pub fn new(position: DVec2, velocity: DVec2, mass: u32, radius: u32, tag: Tag) -> Result<Self> {
        if mass == 0 {
            return Err(Error::InvalidParam("mass must be > 0".into()));
        }
        if radius == 0 {
            return Err(Error::InvalidParam("radius must be > 0".into()));
        }
        if !position.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !velocity.is_finite() {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        Ok(Self {
            position,
            velocity,
            mass,
            radius,
            tag,
        })
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

    /// Magnitude of the velocity.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * f64::from(self.mass) * self.velocity.length_squared()
    }

    /// Key that identifies the particle's kind: mass first, then radius.
    #[inline]
    pub fn kind_key(&self) -> (u32, u32) {
        (self.mass, self.radius)
    }
}
