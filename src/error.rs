use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the simulation core.
///
/// The core never catches or retries these; they surface to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction or query parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Index past the end of a particle, group or bucket list.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A histogram was requested for a group with no particles.
    #[error("cannot compute a speed histogram of an empty group")]
    EmptyGroup,

    /// A particle whose mass, radius or tag differs from its group's.
    #[error(
        "particle (mass {mass}, radius {radius}) does not match group (mass {group_mass}, radius {group_radius}) or its tag"
    )]
    MismatchedParticle {
        mass: u32,
        radius: u32,
        group_mass: u32,
        group_radius: u32,
    },

    /// Two colliding particles share the same centre; the collision normal is undefined.
    #[error("numerical error: collision between particles with coincident centres")]
    CoincidentCenters,
}
