//! Arc-length sampling of the profile line.
//!
//! Sampling depends only on the line geometry and the step, never on the
//! timestep, so one pass can be shared across every timestep of a dataset.

use crate::geom::{Point, Polyline, Vector};

/// A single sample along the profile line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    /// Arc-length offset from the line start.
    pub offset: f64,
    /// Position at the offset.
    pub point: Point,
    /// Unit normal of the segment containing the offset.
    pub normal: Vector,
}

/// Lazy iterator over profile samples.
///
/// Offsets start at `step / 2` and advance by `step` while they stay below
/// the total arc length. The half-step inset avoids a degenerate sample
/// exactly at the start vertex. Samples that land on a zero-length segment
/// are skipped rather than failing the traversal.
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    line: &'a Polyline,
    length: f64,
    step: f64,
    offset: f64,
}

/// Sample a polyline at a fixed arc-length step.
///
/// An iterator over zero samples is returned when the step is not positive
/// or the line has no length; the caller is expected to have validated its
/// inputs already.
pub fn sample(line: &Polyline, step: f64) -> Samples<'_> {
    let length = line.length();
    let offset = if step > 0.0 { step / 2.0 } else { f64::INFINITY };
    Samples {
        line,
        length,
        step,
        offset,
    }
}

impl Iterator for Samples<'_> {
    type Item = ProfileSample;

    fn next(&mut self) -> Option<ProfileSample> {
        while self.offset < self.length {
            let offset = self.offset;
            self.offset += self.step;

            let Some(location) = self.line.locate(offset) else {
                continue;
            };
            let Some(direction) = self.line.segment_direction(location.segment) else {
                continue;
            };
            // Coincident vertices leave the normal undefined; skip the sample.
            let Some(normal) = direction.perpendicular().normalized() else {
                continue;
            };

            return Some(ProfileSample {
                offset,
                point: location.point,
                normal,
            });
        }
        None
    }
}
