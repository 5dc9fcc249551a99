//! # trace-contrast
//!
//! Contrast a newly captured profile of smart-card operation traces
//! against a trusted reference capture.
//!
//! For every pipeline of every matched operation, the reference samples
//! yield two Student-t confidence bounds around their mean; each profile
//! measurement is classified against them as `Match`, `Warn` or
//! `Suspicious`, and states aggregate bottom-up (worst child wins) into
//! pipeline, operation and module results. Execution times get two-sided
//! intervals, classified per sample for display. The engine is pure:
//! parsing tool output into datasets and rendering the result tree as
//! HTML are external collaborators.
//!
//! ## Quick start
//!
//! ```
//! use trace_contrast::{
//!     contrast_datasets, ContrastState, Dataset, DistanceSample, MetricDirection, Operation,
//!     PipelineSamples,
//! };
//!
//! let reference = Dataset::new("ref-card").with_operations(vec![Operation::new("ECDH")
//!     .with_pipelines(vec![PipelineSamples::new("corr", MetricDirection::LowerIsBetter)
//!         .with_samples(vec![
//!             DistanceSample::new(1.0),
//!             DistanceSample::new(1.2),
//!             DistanceSample::new(1.1),
//!         ])])]);
//! let profile = Dataset::new("prof-card").with_operations(vec![Operation::new("ECDH")
//!     .with_pipelines(vec![PipelineSamples::new("corr", MetricDirection::LowerIsBetter)
//!         .with_samples(vec![DistanceSample::new(1.05)])])]);
//!
//! let result = contrast_datasets(&reference, &profile)?;
//! assert_eq!(result.state, ContrastState::Match);
//! println!("{}: {}", result.profile, result.state);
//! # Ok::<(), trace_contrast::ContrastError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bounds;
mod dataset;
mod engine;
mod error;
mod result;
mod state;
mod summary;

pub mod output;

pub use bounds::{dispersion, distance_bounds, exec_time_bounds, Bounds, TimeBounds};
pub use dataset::{
    Dataset, DatasetError, DistanceSample, ExecTimeSample, Meta, MetricDirection, Operation,
    PipelineSamples,
};
pub use engine::{contrast_datasets, Comparator, TraceComparer};
pub use error::ContrastError;
pub use result::{
    ComparisonResult, ExecTimeResult, ModuleResult, OperationResult, PipelineResult,
};
pub use state::{aggregate, classify_exec_time, classify_measurement, ContrastState};
pub use summary::SimilarityPercentages;
