//! The immutable result tree produced by the contrast engine.
//!
//! Children are fully constructed before their parent aggregates their
//! states; a level with nothing to aggregate fails construction with
//! [`ContrastError::EmptyAggregation`] instead of defaulting. Every
//! invocation of the engine builds a fresh tree, owned exclusively by
//! the caller.

use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, TimeBounds};
use crate::dataset::MetricDirection;
use crate::error::ContrastError;
use crate::state::{self, ContrastState};
use crate::summary::SimilarityPercentages;

/// Outcome of classifying a single profile measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The measured value.
    pub value: f64,
    /// Originating trace-file reference, if the sample carried one.
    pub source: Option<String>,
    /// Classified state of this measurement.
    pub state: ContrastState,
}

/// Results for one pipeline matched between reference and profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Pipeline identifier.
    pub pipeline: String,
    /// Comparison direction of the pipeline's metric.
    pub direction: MetricDirection,
    /// Bounds derived from the reference samples.
    pub bounds: Bounds,
    /// Per-measurement classifications of the profile samples.
    pub comparisons: Vec<ComparisonResult>,
    /// Aggregate state over `comparisons`.
    pub state: ContrastState,
}

impl PipelineResult {
    pub(crate) fn new(
        pipeline: String,
        direction: MetricDirection,
        bounds: Bounds,
        comparisons: Vec<ComparisonResult>,
    ) -> Result<Self, ContrastError> {
        let state = state::aggregate(comparisons.iter().map(|c| c.state)).ok_or_else(|| {
            ContrastError::EmptyAggregation {
                scope: format!("pipeline {}", pipeline),
            }
        })?;
        Ok(Self {
            pipeline,
            direction,
            bounds,
            comparisons,
            state,
        })
    }

    /// Percentage breakdown of this pipeline's comparison states.
    pub fn similarity(&self) -> Result<SimilarityPercentages, ContrastError> {
        SimilarityPercentages::from_states(self.comparisons.iter().map(|c| c.state)).ok_or_else(
            || ContrastError::EmptyAggregation {
                scope: format!("pipeline {}", self.pipeline),
            },
        )
    }
}

/// Classification of one profile execution time.
///
/// Computed for display only; execution-time states are not folded into
/// the operation's aggregate state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecTimeResult {
    /// Measured time, in `unit`.
    pub time: f64,
    /// Time unit as reported by the measurement tool.
    pub unit: String,
    /// Classified state against the reference intervals.
    pub state: ContrastState,
}

/// Results for one operation matched between reference and profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Operation code.
    pub operation: String,
    /// Whether the profile supported the operation. Absent operations
    /// carry no detail and a forced `Suspicious` state.
    pub present: bool,
    /// Per-pipeline results.
    pub pipelines: Vec<PipelineResult>,
    /// Execution-time intervals derived from the reference, when the
    /// reference carried execution-time samples.
    pub time_bounds: Option<TimeBounds>,
    /// Per-sample execution-time classifications of the profile.
    pub exec_times: Vec<ExecTimeResult>,
    /// Aggregate state over `pipelines`.
    pub state: ContrastState,
}

impl OperationResult {
    pub(crate) fn absent(operation: String) -> Self {
        Self {
            operation,
            present: false,
            pipelines: Vec::new(),
            time_bounds: None,
            exec_times: Vec::new(),
            state: ContrastState::Suspicious,
        }
    }

    pub(crate) fn compared(
        operation: String,
        pipelines: Vec<PipelineResult>,
        time_bounds: Option<TimeBounds>,
        exec_times: Vec<ExecTimeResult>,
    ) -> Result<Self, ContrastError> {
        // Pipeline states alone determine the operation's severity;
        // execution-time states stay display-only.
        let state = state::aggregate(pipelines.iter().map(|p| p.state)).ok_or_else(|| {
            ContrastError::EmptyAggregation {
                scope: format!("operation {}", operation),
            }
        })?;
        Ok(Self {
            operation,
            present: true,
            pipelines,
            time_bounds,
            exec_times,
            state,
        })
    }

    /// Percentage breakdown for this operation: the unweighted mean of
    /// its pipelines' breakdowns.
    pub fn similarity(&self) -> Result<SimilarityPercentages, ContrastError> {
        let parts = self
            .pipelines
            .iter()
            .map(|p| p.similarity())
            .collect::<Result<Vec<_>, _>>()?;
        SimilarityPercentages::mean_of(&parts).ok_or_else(|| ContrastError::EmptyAggregation {
            scope: format!("operation {}", self.operation),
        })
    }
}

/// The full result tree of one reference-vs-profile comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleResult {
    /// Card identifier of the reference dataset.
    pub reference: String,
    /// Card identifier of the profile dataset.
    pub profile: String,
    /// Per-operation results, in profile order.
    pub operations: Vec<OperationResult>,
    /// Aggregate state over all operations, absent ones included.
    pub state: ContrastState,
}

impl ModuleResult {
    pub(crate) fn new(
        reference: String,
        profile: String,
        operations: Vec<OperationResult>,
    ) -> Result<Self, ContrastError> {
        let state = state::aggregate(operations.iter().map(|o| o.state)).ok_or_else(|| {
            ContrastError::EmptyAggregation {
                scope: "module".to_string(),
            }
        })?;
        Ok(Self {
            reference,
            profile,
            operations,
            state,
        })
    }

    /// Percentage breakdown for the whole comparison: the unweighted
    /// mean across *present* operations only.
    ///
    /// Absent operations still contribute their forced `Suspicious` to
    /// the aggregate [`state`](Self::state), but are excluded from this
    /// average.
    pub fn similarity(&self) -> Result<SimilarityPercentages, ContrastError> {
        let parts = self
            .operations
            .iter()
            .filter(|o| o.present)
            .map(|o| o.similarity())
            .collect::<Result<Vec<_>, _>>()?;
        SimilarityPercentages::mean_of(&parts).ok_or_else(|| ContrastError::EmptyAggregation {
            scope: "module (no present operations)".to_string(),
        })
    }

    /// Operations ordered worst-first by their suspicious and warn
    /// percentages, for reporting. Absent operations sort first, as a
    /// fully suspicious breakdown.
    pub fn operations_by_severity(&self) -> Vec<&OperationResult> {
        fn severity_key(op: &OperationResult) -> (f64, f64) {
            if !op.present {
                return (100.0, 0.0);
            }
            op.similarity()
                .map(|sp| (sp.suspicious, sp.warned))
                .unwrap_or((0.0, 0.0))
        }

        let mut operations: Vec<&OperationResult> = self.operations.iter().collect();
        operations.sort_by(|a, b| {
            let (sa, wa) = severity_key(a);
            let (sb, wb) = severity_key(b);
            sb.total_cmp(&sa).then(wb.total_cmp(&wa))
        });
        operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ContrastState::{Match, Suspicious, Warn};

    fn bounds() -> Bounds {
        Bounds {
            match_bound: 1.0,
            warn_bound: 2.0,
        }
    }

    fn comparison(state: ContrastState) -> ComparisonResult {
        ComparisonResult {
            value: 0.5,
            source: None,
            state,
        }
    }

    fn pipeline(name: &str, states: &[ContrastState]) -> PipelineResult {
        PipelineResult::new(
            name.to_string(),
            MetricDirection::LowerIsBetter,
            bounds(),
            states.iter().map(|s| comparison(*s)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn pipeline_state_aggregates_comparisons() {
        assert_eq!(pipeline("p", &[Match, Warn, Match]).state, Warn);
        assert_eq!(pipeline("p", &[Match, Suspicious]).state, Suspicious);
    }

    #[test]
    fn empty_pipeline_fails_construction() {
        let err = PipelineResult::new(
            "p".to_string(),
            MetricDirection::LowerIsBetter,
            bounds(),
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContrastError::EmptyAggregation {
                scope: "pipeline p".to_string()
            }
        );
    }

    #[test]
    fn operation_similarity_is_mean_of_pipelines() {
        let op = OperationResult::compared(
            "ECDH".to_string(),
            vec![
                pipeline("a", &[Match, Match]),
                pipeline("b", &[Warn, Suspicious]),
            ],
            None,
            Vec::new(),
        )
        .unwrap();
        let sp = op.similarity().unwrap();
        assert_eq!(sp.matched, 50.0);
        assert_eq!(sp.warned, 25.0);
        assert_eq!(sp.suspicious, 25.0);
    }

    #[test]
    fn absent_operation_is_forced_suspicious_without_detail() {
        let op = OperationResult::absent("RSA".to_string());
        assert!(!op.present);
        assert_eq!(op.state, Suspicious);
        assert!(op.pipelines.is_empty());
        assert!(op.time_bounds.is_none());
        assert!(op.similarity().is_err());
    }

    #[test]
    fn module_similarity_skips_absent_operations() {
        let present = OperationResult::compared(
            "ECDH".to_string(),
            vec![pipeline("a", &[Match])],
            None,
            Vec::new(),
        )
        .unwrap();
        let module = ModuleResult::new(
            "ref".to_string(),
            "prof".to_string(),
            vec![present, OperationResult::absent("RSA".to_string())],
        )
        .unwrap();
        // The absent operation drags the aggregate state down...
        assert_eq!(module.state, Suspicious);
        // ...but not the percentage breakdown.
        let sp = module.similarity().unwrap();
        assert_eq!(sp.matched, 100.0);
    }

    #[test]
    fn module_with_no_operations_fails_construction() {
        let err =
            ModuleResult::new("ref".to_string(), "prof".to_string(), Vec::new()).unwrap_err();
        assert!(matches!(err, ContrastError::EmptyAggregation { .. }));
    }

    #[test]
    fn operations_sort_worst_first() {
        let clean = OperationResult::compared(
            "CLEAN".to_string(),
            vec![pipeline("a", &[Match, Match])],
            None,
            Vec::new(),
        )
        .unwrap();
        let warned = OperationResult::compared(
            "WARNED".to_string(),
            vec![pipeline("a", &[Match, Warn])],
            None,
            Vec::new(),
        )
        .unwrap();
        let module = ModuleResult::new(
            "ref".to_string(),
            "prof".to_string(),
            vec![clean, warned, OperationResult::absent("GONE".to_string())],
        )
        .unwrap();
        let ordered: Vec<&str> = module
            .operations_by_severity()
            .iter()
            .map(|o| o.operation.as_str())
            .collect();
        assert_eq!(ordered, vec!["GONE", "WARNED", "CLEAN"]);
    }
}
