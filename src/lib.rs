//! mesh_flux computes a flux time series through a user-drawn profile line
//! over time-varying mesh datasets. The host map application owns drawing,
//! dataset selection, persistence, and plotting; this crate owns sampling,
//! field contracts, integration, and the output series.

#![forbid(unsafe_code)]

pub mod config;
pub mod field;
pub mod flux;
pub mod geom;
pub mod sampler;
pub mod series;

pub use config::{DEFAULT_STEP, ProfileConfig};
pub use field::{DatasetGroup, GroupKind, MeshSource, ScalarDataset, VectorDataset};
pub use flux::{
    FluxError, FluxRequest, MAX_SAMPLE_COUNT, compute_flux_series, try_compute_flux_series,
};
pub use geom::{Location, Point, Polyline, Vector};
pub use sampler::{ProfileSample, Samples, sample};
pub use series::{FluxPoint, FluxSeries, Range};
