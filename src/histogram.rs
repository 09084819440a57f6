//! Speed distribution of one particle group.
//!
//! A [`SpeedHistogram`] is a snapshot: it is computed from the group's
//! current velocities and never updated afterwards. Recompute it every frame.

use crate::error::{Error, Result};
use crate::group::ParticleGroup;
use eframe::egui::{Pos2, Rect, pos2};

/// Sorted speeds of a group binned into equal-width buckets spanning
/// `[min_speed, max_speed]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedHistogram {
    speeds: Vec<f64>,
    bucket_limits: Vec<f64>,
    counts: Vec<usize>,
}

impl SpeedHistogram {
    /// Bin the speeds of every particle in `group` into `bucket_count` buckets.
    ///
    /// Bucket `i` holds speeds in `(limit[i-1], limit[i]]`, with bucket 0 also
    /// taking the minimum. When every particle has the same speed the width is
    /// zero and all of them land in bucket 0.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `bucket_count` is zero.
    /// - `Error::EmptyGroup` if the group has no particles.
    pub fn compute(group: &ParticleGroup, bucket_count: usize) -> Result<Self> {
        if bucket_count == 0 {
            return Err(Error::InvalidParam("bucket_count must be > 0".into()));
        }

        let mut speeds: Vec<f64> = group.particles().iter().map(|p| p.speed()).collect();
        speeds.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (speeds.first(), speeds.last()) else {
            return Err(Error::EmptyGroup);
        };

        let width = (max - min) / bucket_count as f64;
        let mut bucket_limits: Vec<f64> = (0..bucket_count)
            .map(|i| min + (i + 1) as f64 * width)
            .collect();
        // min + n * ((max - min) / n) can round below max
        if let Some(last) = bucket_limits.last_mut() {
            *last = max;
        }

        let mut counts = vec![0usize; bucket_count];
        let mut bucket = 0usize;
        // speeds are sorted, so the first fitting bucket never moves backwards
        for &speed in &speeds {
            while bucket + 1 < bucket_count && speed > bucket_limits[bucket] {
                bucket += 1;
            }
            counts[bucket] += 1;
        }

        Ok(Self {
            speeds,
            bucket_limits,
            counts,
        })
    }

    /// Speed at `index` in ascending order.
    pub fn speed_at(&self, index: usize) -> Result<f64> {
        lookup(&self.speeds, index)
    }

    /// Upper speed limit of bucket `index`.
    pub fn bucket_limit_at(&self, index: usize) -> Result<f64> {
        lookup(&self.bucket_limits, index)
    }

    /// Number of particles in bucket `index`.
    pub fn count_at(&self, index: usize) -> Result<usize> {
        lookup(&self.counts, index)
    }

    pub fn speeds(&self) -> &[f64] {
        &self.speeds
    }

    pub fn bucket_limits(&self) -> &[f64] {
        &self.bucket_limits
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of binned particles.
    pub fn total(&self) -> usize {
        self.speeds.len()
    }

    pub fn min_speed(&self) -> f64 {
        self.speeds[0]
    }

    pub fn max_speed(&self) -> f64 {
        self.speeds[self.speeds.len() - 1]
    }

    /// Lower edge of bucket `index` (the previous limit, or the minimum speed).
    pub fn bucket_floor(&self, index: usize) -> Result<f64> {
        match index {
            0 => Ok(self.min_speed()),
            _ => self.bucket_limit_at(index - 1),
        }
    }
}

fn lookup<T: Copy>(values: &[T], index: usize) -> Result<T> {
    values.get(index).copied().ok_or(Error::IndexOutOfRange {
        index,
        len: values.len(),
    })
}

/// Pixel layout of a histogram chart. Has no effect on the binning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramGeometry {
    /// Top-left corner of the chart box.
    pub top_left: Pos2,
    pub width: f32,
    pub height: f32,
    /// Space reserved around the box for axis labels.
    pub margin: f32,
    /// Bar height per particle.
    pub y_interval_pixels: f32,
}

impl HistogramGeometry {
    /// Bottom-right corner of the chart box.
    pub fn bottom_right(&self) -> Pos2 {
        self.top_left + eframe::egui::vec2(self.width, self.height)
    }

    pub fn frame(&self) -> Rect {
        Rect::from_min_max(self.top_left, self.bottom_right())
    }

    /// One rectangle per bucket, left to right, standing on the bottom edge.
    ///
    /// Bars are a whole number of pixels wide, so a width that does not divide
    /// evenly leaves a gap on the right.
    pub fn bars(&self, histogram: &SpeedHistogram) -> Vec<Rect> {
        let bar_width = (self.width / histogram.bucket_count() as f32).floor();
        let bottom = self.top_left.y + self.height;
        histogram
            .counts()
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let left = self.top_left.x + i as f32 * bar_width;
                let top = bottom - count as f32 * self.y_interval_pixels;
                Rect::from_min_max(pos2(left, top), pos2(left + bar_width, bottom))
            })
            .collect()
    }
}
