//! The flux time series handed to the plotting consumer.

use time::OffsetDateTime;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// One flux value with its absolute timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxPoint {
    /// Absolute time of the timestep.
    pub time: OffsetDateTime,
    /// Net flux across the profile line, possibly NaN.
    pub value: f64,
}

impl FluxPoint {
    /// Create a new flux point.
    pub fn new(time: OffsetDateTime, value: f64) -> Self {
        Self { time, value }
    }
}

/// Flux values in timestep order.
///
/// A fresh series is built on every computation and replaces the previous
/// one; nothing is cached across invocations. Timestamps are expected to be
/// non-decreasing since they follow the dataset's timestep order, but a
/// misbehaving provider only degrades time lookups to a linear scan.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxSeries {
    points: Vec<FluxPoint>,
    monotonic: bool,
}

impl Default for FluxSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl FluxSeries {
    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            monotonic: true,
        }
    }

    /// Create an empty series with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            monotonic: true,
        }
    }

    /// Append a point in timestep order.
    pub fn push(&mut self, point: FluxPoint) {
        if let Some(last) = self.points.last() {
            if point.time < last.time {
                self.monotonic = false;
            }
        }
        self.points.push(point);
    }

    /// Access all points as a slice.
    pub fn points(&self) -> &[FluxPoint] {
        &self.points
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if there are no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check whether timestamps are non-decreasing.
    pub fn is_monotonic(&self) -> bool {
        self.monotonic
    }

    /// Timestamps of the first and last point.
    pub fn time_bounds(&self) -> Option<(OffsetDateTime, OffsetDateTime)> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some((first.time, last.time))
    }

    /// Range covering all finite flux values.
    pub fn value_bounds(&self) -> Option<Range> {
        let mut bounds: Option<Range> = None;
        for point in &self.points {
            if !point.value.is_finite() {
                continue;
            }
            match bounds.as_mut() {
                None => bounds = Some(Range::new(point.value, point.value)),
                Some(range) => range.expand_to_include(point.value),
            }
        }
        bounds
    }

    /// Find the index of the point nearest to a time.
    ///
    /// Supports the host's time cursor: the map canvas time maps onto the
    /// closest computed timestep.
    pub fn nearest_index_by_time(&self, time: OffsetDateTime) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }
        if !self.monotonic {
            return self.nearest_index_linear(time);
        }

        let lower = self.lower_bound(time);
        if lower == 0 {
            return Some(0);
        }
        if lower >= self.points.len() {
            return Some(self.points.len() - 1);
        }
        let left = lower - 1;
        let right = lower;
        let left_distance = (self.points[left].time - time).abs();
        let right_distance = (self.points[right].time - time).abs();
        if left_distance <= right_distance {
            Some(left)
        } else {
            Some(right)
        }
    }

    /// Split the series into runs of finite values.
    ///
    /// Consumers draw each run as a connected line and leave a gap between
    /// runs, instead of interpolating across undefined timesteps.
    pub fn finite_runs(&self) -> impl Iterator<Item = &[FluxPoint]> {
        self.points
            .split(|point| !point.value.is_finite())
            .filter(|run| !run.is_empty())
    }

    fn lower_bound(&self, target: OffsetDateTime) -> usize {
        let mut left = 0;
        let mut right = self.points.len();
        while left < right {
            let mid = (left + right) / 2;
            if self.points[mid].time < target {
                left = mid + 1;
            } else {
                right = mid;
            }
        }
        left
    }

    fn nearest_index_linear(&self, time: OffsetDateTime) -> Option<usize> {
        let mut best_index = None;
        let mut best_distance = None;
        for (index, point) in self.points.iter().enumerate() {
            let distance = (point.time - time).abs();
            if best_distance.is_none_or(|best| distance < best) {
                best_distance = Some(distance);
                best_index = Some(index);
            }
        }
        best_index
    }
}

impl FromIterator<FluxPoint> for FluxSeries {
    fn from_iter<I: IntoIterator<Item = FluxPoint>>(iter: I) -> Self {
        let mut series = Self::new();
        for point in iter {
            series.push(point);
        }
        series
    }
}
