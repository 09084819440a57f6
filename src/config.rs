//! Default construction parameters for the simulation and its viewer.
//!
//! Nothing here is reloaded at runtime: the viewer copies [`SimulationParams`]
//! into its side panel and rebuilds the space from it on reset.

use crate::particle::Tag;
use eframe::egui::Color32;

// ===================================================================================
// Default Constants
// ===================================================================================

pub const DEFAULT_WINDOW_SIZE: f32 = 1000.0;
pub const DEFAULT_MARGIN: f32 = 50.0;
pub const DEFAULT_CONTAINER_WIDTH: u32 = 600;
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 800;
pub const DEFAULT_HISTOGRAM_WIDTH: f32 = 250.0;
pub const DEFAULT_HISTOGRAM_HEIGHT: f32 = 200.0;
pub const DEFAULT_NUM_BUCKETS: usize = 10;
pub const DEFAULT_Y_INTERVAL_PIXELS: f32 = 2.0;

pub const SMALL_PARTICLE: GroupSpec = GroupSpec {
    count: 200,
    mass: 2,
    radius: 5,
    tag: Color32::YELLOW,
};
pub const MID_PARTICLE: GroupSpec = GroupSpec {
    count: 75,
    mass: 5,
    radius: 10,
    tag: Color32::from_rgb(255, 0, 255),
};
pub const BIG_PARTICLE: GroupSpec = GroupSpec {
    count: 30,
    mass: 15,
    radius: 15,
    tag: Color32::from_rgb(0, 255, 255),
};

/// Prototype attributes and population of one particle group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSpec {
    pub count: usize,
    pub mass: u32,
    pub radius: u32,
    pub tag: Tag,
}

impl GroupSpec {
    /// Key that identifies the group's kind: mass first, then radius.
    #[inline]
    pub fn kind_key(&self) -> (u32, u32) {
        (self.mass, self.radius)
    }
}

/// Parameters fixed when a simulation is (re)built.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub container_width: u32,
    pub container_height: u32,
    pub margin: f32,
    pub groups: Vec<GroupSpec>,
    pub num_buckets: usize,
    pub histogram_width: f32,
    pub histogram_height: f32,
    pub y_interval_pixels: f32,
    /// Seed for particle placement; `None` draws a fresh seed per reset.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            margin: DEFAULT_MARGIN,
            groups: vec![SMALL_PARTICLE, MID_PARTICLE, BIG_PARTICLE],
            num_buckets: DEFAULT_NUM_BUCKETS,
            histogram_width: DEFAULT_HISTOGRAM_WIDTH,
            histogram_height: DEFAULT_HISTOGRAM_HEIGHT,
            y_interval_pixels: DEFAULT_Y_INTERVAL_PIXELS,
            seed: None,
        }
    }
}
