//! Flux integration across the profile line.
//!
//! For every timestep of the selected vector dataset the integrator projects
//! the sampled velocities onto the profile normals and accumulates
//! `projection * depth * step` over the samples: a midpoint-rule
//! approximation of the line integral of volumetric flux.

use thiserror::Error;

use crate::field::MeshSource;
use crate::geom::Polyline;
use crate::sampler::{self, ProfileSample};
use crate::series::{FluxPoint, FluxSeries};

/// Safety bound on the number of samples along one profile.
///
/// A tiny step over a long line would otherwise produce an unbounded amount
/// of work from a single misconfigured setting.
pub const MAX_SAMPLE_COUNT: f64 = 10_000.0;

/// Reasons a flux computation is rejected before it starts.
///
/// All of these are input problems, not runtime failures: the graceful entry
/// point maps them to an empty series so the host shows nothing instead of
/// stale data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FluxError {
    /// The sampling step must be strictly positive.
    #[error("profile step must be positive, got {step}")]
    NonPositiveStep {
        /// The rejected step value.
        step: f64,
    },
    /// The profile line is missing or has zero length.
    #[error("profile line has no length")]
    EmptyProfile,
    /// The line length divided by the step exceeds [`MAX_SAMPLE_COUNT`].
    #[error("step {step} over a line of length {length} exceeds the sample bound")]
    TooManySamples {
        /// Total line length.
        length: f64,
        /// The rejected step value.
        step: f64,
    },
    /// The selected vector group is not present on the mesh.
    #[error("unknown vector dataset group `{0}`")]
    UnknownVectorGroup(String),
    /// The selected scalar group is not present on the mesh.
    #[error("unknown scalar dataset group `{0}`")]
    UnknownScalarGroup(String),
}

/// Inputs for one flux computation.
///
/// The host assembles this from its current UI state: the drawn line, the
/// persisted step setting, and the two dataset names selected in its
/// pickers. Everything is borrowed; the computation owns nothing.
#[derive(Debug, Clone, Copy)]
pub struct FluxRequest<'a> {
    /// The profile line to integrate across.
    pub profile: &'a Polyline,
    /// Arc-length sampling step in mesh coordinate units.
    pub step: f64,
    /// Name of the vector (velocity) dataset group.
    pub vector_group: &'a str,
    /// Name of the scalar (depth) dataset group.
    pub scalar_group: &'a str,
}

/// Compute the flux series, degrading invalid input to an empty series.
///
/// This is the entry point hosts call from UI triggers (line finished,
/// dataset changed, step changed). It never returns an error; rejected
/// preconditions are logged and yield an empty series.
pub fn compute_flux_series(source: &dyn MeshSource, request: &FluxRequest<'_>) -> FluxSeries {
    match try_compute_flux_series(source, request) {
        Ok(series) => series,
        Err(error) => {
            log::warn!("flux computation skipped: {error}");
            FluxSeries::new()
        }
    }
}

/// Compute the flux series, surfacing precondition failures.
pub fn try_compute_flux_series(
    source: &dyn MeshSource,
    request: &FluxRequest<'_>,
) -> Result<FluxSeries, FluxError> {
    let step = request.step;
    if step <= 0.0 {
        return Err(FluxError::NonPositiveStep { step });
    }
    let length = request.profile.length();
    if length <= 0.0 {
        return Err(FluxError::EmptyProfile);
    }
    if length / step > MAX_SAMPLE_COUNT {
        return Err(FluxError::TooManySamples { length, step });
    }

    let vector = source
        .vector_group(request.vector_group)
        .ok_or_else(|| FluxError::UnknownVectorGroup(request.vector_group.to_owned()))?;
    let scalar = source
        .scalar_group(request.scalar_group)
        .ok_or_else(|| FluxError::UnknownScalarGroup(request.scalar_group.to_owned()))?;

    // Geometry does not change between timesteps; sample the line once.
    let samples: Vec<ProfileSample> = sampler::sample(request.profile, step).collect();

    let reference = vector.reference_time();
    let timestep_count = vector.timestep_count();
    let mut series = FluxSeries::with_capacity(timestep_count);

    for timestep in 0..timestep_count {
        let time = reference + vector.timestep_offset(timestep);
        let mut sum = 0.0;

        for sample in &samples {
            // A no-data velocity contributes nothing, but the depth lookup
            // still happens: both fields are evaluated at every sample.
            let projection = match vector.evaluate(timestep, sample.point) {
                Some(velocity) => sample.normal.dot(velocity),
                None => 0.0,
            };
            let depth = scalar.evaluate(timestep, sample.point).unwrap_or(f64::NAN);

            let contribution = projection * depth * step;
            if !contribution.is_nan() {
                sum += contribution;
            }
        }

        series.push(FluxPoint::new(time, sum));
    }

    log::debug!(
        "flux series computed: {} timesteps, {} samples, step {}",
        series.len(),
        samples.len(),
        step
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{DatasetGroup, GroupKind, ScalarDataset, VectorDataset};
    use crate::geom::{Point, Vector};
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    const REFERENCE: OffsetDateTime = datetime!(2024-03-01 00:00 UTC);

    struct TestVector {
        count: usize,
        value: fn(usize, Point) -> Option<Vector>,
    }

    struct TestScalar {
        count: usize,
        value: fn(usize, Point) -> Option<f64>,
    }

    impl DatasetGroup for TestVector {
        fn timestep_count(&self) -> usize {
            self.count
        }

        fn timestep_offset(&self, timestep: usize) -> Duration {
            Duration::minutes(timestep as i64)
        }

        fn reference_time(&self) -> OffsetDateTime {
            REFERENCE
        }
    }

    impl VectorDataset for TestVector {
        fn evaluate(&self, timestep: usize, point: Point) -> Option<Vector> {
            (self.value)(timestep, point)
        }
    }

    impl DatasetGroup for TestScalar {
        fn timestep_count(&self) -> usize {
            self.count
        }

        fn timestep_offset(&self, timestep: usize) -> Duration {
            Duration::minutes(timestep as i64)
        }

        fn reference_time(&self) -> OffsetDateTime {
            REFERENCE
        }
    }

    impl ScalarDataset for TestScalar {
        fn evaluate(&self, timestep: usize, point: Point) -> Option<f64> {
            (self.value)(timestep, point)
        }
    }

    struct TestSource {
        vector: TestVector,
        scalar: TestScalar,
    }

    impl MeshSource for TestSource {
        fn group_names(&self, kind: GroupKind) -> Vec<String> {
            match kind {
                GroupKind::Vector => vec!["velocity".to_owned()],
                GroupKind::Scalar => vec!["depth".to_owned()],
            }
        }

        fn vector_group(&self, name: &str) -> Option<&dyn VectorDataset> {
            (name == "velocity").then_some(&self.vector as &dyn VectorDataset)
        }

        fn scalar_group(&self, name: &str) -> Option<&dyn ScalarDataset> {
            (name == "depth").then_some(&self.scalar as &dyn ScalarDataset)
        }
    }

    fn uniform_source(timesteps: usize) -> TestSource {
        TestSource {
            vector: TestVector {
                count: timesteps,
                value: |_, _| Some(Vector::new(2.0, 0.0)),
            },
            scalar: TestScalar {
                count: timesteps,
                value: |_, _| Some(3.0),
            },
        }
    }

    fn vertical_line() -> Polyline {
        Polyline::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 10.0)])
    }

    fn request<'a>(profile: &'a Polyline, step: f64) -> FluxRequest<'a> {
        FluxRequest {
            profile,
            step,
            vector_group: "velocity",
            scalar_group: "depth",
        }
    }

    #[test]
    fn uniform_field_over_vertical_line() {
        let line = vertical_line();
        let source = uniform_source(3);
        let series = try_compute_flux_series(&source, &request(&line, 1.0)).unwrap();

        // 10 samples, each |projection| * depth * step = 2 * 3 * 1.
        assert_eq!(series.len(), 3);
        for point in series.points() {
            assert!((point.value.abs() - 60.0).abs() < 1e-9);
        }
        // Left-of-travel normal for an upward line points to negative X.
        assert!(series.points()[0].value < 0.0);
    }

    #[test]
    fn timestamps_follow_reference_time() {
        let line = vertical_line();
        let source = uniform_source(3);
        let series = try_compute_flux_series(&source, &request(&line, 1.0)).unwrap();

        for (index, point) in series.points().iter().enumerate() {
            assert_eq!(point.time, REFERENCE + Duration::minutes(index as i64));
        }
        assert!(series.is_monotonic());
    }

    #[test]
    fn non_positive_step_is_rejected() {
        let line = vertical_line();
        let source = uniform_source(1);
        let result = try_compute_flux_series(&source, &request(&line, 0.0));
        assert_eq!(result, Err(FluxError::NonPositiveStep { step: 0.0 }));
        assert!(compute_flux_series(&source, &request(&line, 0.0)).is_empty());
        assert!(compute_flux_series(&source, &request(&line, -0.5)).is_empty());
    }

    #[test]
    fn zero_length_profile_is_rejected() {
        let line = Polyline::new(vec![Point::new(2.0, 2.0), Point::new(2.0, 2.0)]);
        let source = uniform_source(4);
        let result = try_compute_flux_series(&source, &request(&line, 0.5));
        assert_eq!(result, Err(FluxError::EmptyProfile));
        assert!(compute_flux_series(&source, &request(&line, 0.5)).is_empty());
    }

    #[test]
    fn sample_bound_rejects_tiny_steps_before_sampling() {
        let line = vertical_line();
        let source = uniform_source(1);
        let result = try_compute_flux_series(&source, &request(&line, 0.0001));
        assert!(matches!(result, Err(FluxError::TooManySamples { .. })));
        assert!(compute_flux_series(&source, &request(&line, 0.0001)).is_empty());
    }

    #[test]
    fn unknown_group_names_are_rejected() {
        let line = vertical_line();
        let source = uniform_source(1);

        let missing_vector = FluxRequest {
            vector_group: "discharge",
            ..request(&line, 1.0)
        };
        assert_eq!(
            try_compute_flux_series(&source, &missing_vector),
            Err(FluxError::UnknownVectorGroup("discharge".to_owned()))
        );

        let missing_scalar = FluxRequest {
            scalar_group: "bed level",
            ..request(&line, 1.0)
        };
        assert_eq!(
            try_compute_flux_series(&source, &missing_scalar),
            Err(FluxError::UnknownScalarGroup("bed level".to_owned()))
        );
    }

    #[test]
    fn series_length_matches_timestep_count() {
        let line = vertical_line();
        let source = uniform_source(7);
        let series = try_compute_flux_series(&source, &request(&line, 2.0)).unwrap();
        assert_eq!(series.len(), 7);
    }

    #[test]
    fn all_no_data_vector_yields_exact_zero() {
        let line = vertical_line();
        let source = TestSource {
            vector: TestVector {
                count: 2,
                value: |_, _| None,
            },
            scalar: TestScalar {
                count: 2,
                value: |_, _| Some(3.0),
            },
        };
        let series = try_compute_flux_series(&source, &request(&line, 1.0)).unwrap();
        assert_eq!(series.len(), 2);
        for point in series.points() {
            assert_eq!(point.value, 0.0);
        }
    }

    #[test]
    fn missing_depth_is_absorbed_as_zero_contribution() {
        let line = vertical_line();
        let source = TestSource {
            vector: TestVector {
                count: 1,
                value: |_, _| Some(Vector::new(2.0, 0.0)),
            },
            scalar: TestScalar {
                count: 1,
                value: |_, _| None,
            },
        };
        let series = try_compute_flux_series(&source, &request(&line, 1.0)).unwrap();
        assert_eq!(series.points()[0].value, 0.0);
    }

    #[test]
    fn partial_no_data_sums_remaining_samples() {
        let line = vertical_line();
        let source = TestSource {
            vector: TestVector {
                count: 1,
                // Data only over the lower half of the line.
                value: |_, point| (point.y < 5.0).then_some(Vector::new(2.0, 0.0)),
            },
            scalar: TestScalar {
                count: 1,
                value: |_, _| Some(3.0),
            },
        };
        let series = try_compute_flux_series(&source, &request(&line, 1.0)).unwrap();
        // 5 of the 10 samples contribute 2 * 3 * 1 each.
        assert!((series.points()[0].value.abs() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn source_lists_groups_by_kind() {
        let source = uniform_source(1);
        assert_eq!(source.group_names(GroupKind::Vector), ["velocity"]);
        assert_eq!(source.group_names(GroupKind::Scalar), ["depth"]);
    }
}
