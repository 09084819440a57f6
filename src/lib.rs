//! # Ideal gas simulator
//!
//! Elastic collisions between groups of circular particles in a rectangular
//! container. Each tick reflects particles off the walls, resolves every
//! colliding pair across all groups, then moves every particle by its
//! velocity. Per-group speed histograms show the velocity distribution.
//!
//! The viewer in `main.rs` is a thin eframe shell around [`SimulationSpace`].

pub mod collision;
pub mod config;
pub mod error;
pub mod group;
pub mod histogram;
pub mod particle;
pub mod space;

pub use config::{GroupSpec, SimulationParams};
pub use error::{Error, Result};
pub use group::ParticleGroup;
pub use histogram::{HistogramGeometry, SpeedHistogram};
pub use particle::{Particle, Tag};
pub use space::SimulationSpace;
