//! Contracts implemented by the host's mesh data provider.
//!
//! The crate never reads mesh files or interpolates mesh values itself; it
//! asks the host for point-sampled values through these traits. "No data"
//! (a point outside the mesh extent, or a missing value) is expressed as
//! `None` and stays distinguishable from a valid zero.

use time::{Duration, OffsetDateTime};

use crate::geom::{Point, Vector};

/// Whether a dataset group carries vector or scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Two-component values, such as velocity.
    Vector,
    /// Single-component values, such as depth.
    Scalar,
}

/// Shared time structure of a dataset group.
///
/// Every group exposes its timesteps relative to one absolute reference
/// time. Implementations must answer `timestep_offset` for every index below
/// `timestep_count`.
pub trait DatasetGroup {
    /// Number of timesteps in the group.
    fn timestep_count(&self) -> usize;

    /// Offset of a timestep relative to the reference time.
    fn timestep_offset(&self, timestep: usize) -> Duration;

    /// Absolute reference time of the group.
    fn reference_time(&self) -> OffsetDateTime;
}

/// A time-indexed vector field defined over the mesh.
pub trait VectorDataset: DatasetGroup {
    /// Point-sample the field, or `None` where there is no data.
    fn evaluate(&self, timestep: usize, point: Point) -> Option<Vector>;
}

/// A time-indexed scalar field defined over the mesh.
pub trait ScalarDataset: DatasetGroup {
    /// Point-sample the field, or `None` where there is no data.
    fn evaluate(&self, timestep: usize, point: Point) -> Option<f64>;
}

/// The host's view of one mesh and its dataset groups.
///
/// Group names are the human-visible names the host shows in its dataset
/// pickers; resolution by name fails softly with `None` so a stale selection
/// degrades to an empty result instead of an error.
pub trait MeshSource {
    /// Names of the groups of the given kind, in presentation order.
    fn group_names(&self, kind: GroupKind) -> Vec<String>;

    /// Resolve a vector group by name.
    fn vector_group(&self, name: &str) -> Option<&dyn VectorDataset>;

    /// Resolve a scalar group by name.
    fn scalar_group(&self, name: &str) -> Option<&dyn ScalarDataset>;
}
