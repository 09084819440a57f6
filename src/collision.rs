//! Pure collision math shared by groups and the simulation space.
//!
//! Nothing here mutates except [`apply_collision`], which writes the result
//! of [`resolve_collision`] back into the two particles.

use crate::error::{Error, Result};
use crate::particle::Particle;
use glam::DVec2;

/// Velocity of `particle` after reflecting off the container walls.
///
/// `bounds` is the largest legal position on each axis; the smallest is 0.
/// Each axis is checked on its own, so a particle in a corner can flip both
/// components. The position is not clamped back inside.
pub fn wall_reflection(particle: &Particle, bounds: DVec2) -> DVec2 {
    let DVec2 { x, y } = particle.position;
    let mut v = particle.velocity;

    if (x <= 0.0 && v.x < 0.0) || (x >= bounds.x && v.x > 0.0) {
        v.x = -v.x;
    }
    if (y <= 0.0 && v.y < 0.0) || (y >= bounds.y && v.y > 0.0) {
        v.y = -v.y;
    }
    v
}

/// True when `a` and `b` touch or overlap and are closing on each other.
///
/// Uses current positions only; a fast, small particle can pass through
/// another between two ticks.
pub fn pair_collision_exists(a: &Particle, b: &Particle) -> bool {
    let dx = a.position - b.position;
    let dv = a.velocity - b.velocity;
    let reach = f64::from(a.radius()) + f64::from(b.radius());
    dx.length() <= reach && dv.dot(dx) < 0.0
}

/// Post-collision velocities `(v_a', v_b')` of a 2D elastic collision.
///
/// Errors:
/// - `Error::CoincidentCenters` if both particles sit at the same position.
pub fn resolve_collision(a: &Particle, b: &Particle) -> Result<(DVec2, DVec2)> {
    let dx = a.position - b.position;
    let dist_sq = dx.length_squared();
    if dist_sq == 0.0 {
        return Err(Error::CoincidentCenters);
    }

    let (ma, mb) = (f64::from(a.mass()), f64::from(b.mass()));
    let dv = a.velocity - b.velocity;
    // (v_a - v_b)·(x_a - x_b) == (v_b - v_a)·(x_b - x_a), so one projection serves both sides
    let proj = dv.dot(dx) / dist_sq;

    let va = a.velocity - (2.0 * mb / (ma + mb)) * proj * dx;
    let vb = b.velocity - (2.0 * ma / (ma + mb)) * proj * (-dx);
    Ok((va, vb))
}

/// Resolve a collision between `a` and `b` in place.
pub fn apply_collision(a: &mut Particle, b: &mut Particle) -> Result<()> {
    let (va, vb) = resolve_collision(a, b)?;
    a.velocity = va;
    b.velocity = vb;
    Ok(())
}
