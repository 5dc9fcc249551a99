//! The contrast engine: matches a profile dataset against a reference
//! and builds the result tree.
//!
//! A comparison is a single synchronous pass with no I/O: both datasets
//! are read-only for its duration and the returned tree is owned
//! exclusively by the caller, so independent comparisons can run in
//! parallel without locking.

use crate::bounds::{self, TimeBounds};
use crate::dataset::{Dataset, Operation};
use crate::error::ContrastError;
use crate::result::{
    ComparisonResult, ExecTimeResult, ModuleResult, OperationResult, PipelineResult,
};
use crate::state::{classify_exec_time, classify_measurement};

/// Capability interface for comparing two like modules.
///
/// Concrete comparator variants implement this instead of relying on
/// runtime dispatch over module kinds.
pub trait Comparator {
    /// Result type produced by one comparison.
    type Contrast;

    /// Contrast `other` (the profile) against `self` (the reference).
    fn contrast(&self, other: &Self) -> Result<Vec<Self::Contrast>, ContrastError>;
}

/// Comparator over smart-card trace datasets.
#[derive(Debug, Clone)]
pub struct TraceComparer {
    dataset: Dataset,
}

impl TraceComparer {
    /// Wrap a dataset for comparison.
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// The wrapped dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl Comparator for TraceComparer {
    type Contrast = ModuleResult;

    fn contrast(&self, other: &Self) -> Result<Vec<ModuleResult>, ContrastError> {
        contrast_datasets(&self.dataset, &other.dataset).map(|module| vec![module])
    }
}

/// Contrast a profile dataset against a reference dataset.
///
/// Matching policy:
/// - Profile operations with no same-coded reference operation are
///   silently dropped.
/// - A matched operation the profile marks absent yields a forced
///   `Suspicious` result with no pipeline detail.
/// - Reference pipelines the profile never ran are silently skipped;
///   unlike a whole missing operation, a missing pipeline is not
///   penalized.
/// - A reference pipeline or execution-time set with fewer than two
///   samples is rejected with
///   [`ContrastError::InsufficientSample`] rather than classified
///   against undefined bounds.
pub fn contrast_datasets(
    reference: &Dataset,
    profile: &Dataset,
) -> Result<ModuleResult, ContrastError> {
    let mut operations = Vec::new();
    for profile_op in &profile.operations {
        let Some(reference_op) = reference.operation(&profile_op.code) else {
            continue;
        };

        if !profile_op.present {
            operations.push(OperationResult::absent(reference_op.code.clone()));
            continue;
        }

        operations.push(contrast_operation(reference_op, profile_op)?);
    }

    ModuleResult::new(reference.card.clone(), profile.card.clone(), operations)
}

fn contrast_operation(
    reference_op: &Operation,
    profile_op: &Operation,
) -> Result<OperationResult, ContrastError> {
    let mut pipelines = Vec::new();
    for reference_pipeline in &reference_op.pipelines {
        let distances = reference_pipeline.distances();
        let bounds = bounds::distance_bounds(&distances, reference_pipeline.direction).ok_or_else(
            || ContrastError::InsufficientSample {
                scope: format!(
                    "operation {}, pipeline {}",
                    reference_op.code, reference_pipeline.pipeline
                ),
                count: distances.len(),
            },
        )?;

        let Some(profile_pipeline) = profile_op.pipeline(&reference_pipeline.pipeline) else {
            continue;
        };

        let comparisons: Vec<ComparisonResult> = profile_pipeline
            .samples
            .iter()
            .map(|sample| ComparisonResult {
                value: sample.distance,
                source: sample.source.clone(),
                state: classify_measurement(
                    sample.distance,
                    &bounds,
                    reference_pipeline.direction,
                ),
            })
            .collect();

        pipelines.push(PipelineResult::new(
            reference_pipeline.pipeline.clone(),
            reference_pipeline.direction,
            bounds,
            comparisons,
        )?);
    }

    let (time_bounds, exec_times) = contrast_exec_times(reference_op, profile_op)?;
    OperationResult::compared(reference_op.code.clone(), pipelines, time_bounds, exec_times)
}

fn contrast_exec_times(
    reference_op: &Operation,
    profile_op: &Operation,
) -> Result<(Option<TimeBounds>, Vec<ExecTimeResult>), ContrastError> {
    let reference_times = reference_op.exec_time_values();
    if reference_times.is_empty() && profile_op.exec_times.is_empty() {
        return Ok((None, Vec::new()));
    }

    let bounds = bounds::exec_time_bounds(&reference_times).ok_or_else(|| {
        ContrastError::InsufficientSample {
            scope: format!("operation {}, execution times", reference_op.code),
            count: reference_times.len(),
        }
    })?;

    let results = profile_op
        .exec_times
        .iter()
        .map(|sample| ExecTimeResult {
            time: sample.time,
            unit: sample.unit.clone(),
            state: classify_exec_time(sample.time, &bounds),
        })
        .collect();

    Ok((Some(bounds), results))
}
