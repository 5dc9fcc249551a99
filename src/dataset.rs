//! Input data model for trace contrasting.
//!
//! Datasets are produced by an external trace-parsing collaborator: one
//! named capture per device run, holding the measured operations with
//! their per-pipeline distance samples and execution times. The engine
//! treats a [`Dataset`] as read-only for the duration of a comparison.

use serde::{Deserialize, Serialize};

/// Comparison direction of a pipeline metric.
///
/// Determines on which side of the reference mean the bounds sit and
/// which way measurement comparisons point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricDirection {
    /// Distance-style metric: smaller values mean closer similarity.
    LowerIsBetter,
    /// Similarity-score metric: larger values mean closer similarity.
    HigherIsBetter,
}

impl std::fmt::Display for MetricDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricDirection::LowerIsBetter => write!(f, "distance"),
            MetricDirection::HigherIsBetter => write!(f, "similarity"),
        }
    }
}

/// One dissimilarity measurement between a profile trace and its
/// reference counterpart, for a single pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceSample {
    /// Measured distance (or similarity score, per the pipeline's
    /// [`MetricDirection`]).
    pub distance: f64,
    /// Originating trace-file reference, carried through for reporting.
    pub source: Option<String>,
}

impl DistanceSample {
    /// Create a sample without a source reference.
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            source: None,
        }
    }

    /// Attach the originating trace-file reference.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// One measured execution time for an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecTimeSample {
    /// Measured time, in `unit`.
    pub time: f64,
    /// Time unit as reported by the measurement tool (e.g. `"ms"`).
    pub unit: String,
}

impl ExecTimeSample {
    /// Create an execution-time sample.
    pub fn new(time: f64, unit: impl Into<String>) -> Self {
        Self {
            time,
            unit: unit.into(),
        }
    }
}

/// Distance samples for one (operation, pipeline) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSamples {
    /// Pipeline identifier, unique within its operation.
    pub pipeline: String,
    /// Comparison direction of this pipeline's metric.
    pub direction: MetricDirection,
    /// Measured samples. At least two are required on the reference side
    /// to derive bounds.
    pub samples: Vec<DistanceSample>,
}

impl PipelineSamples {
    /// Create an empty sample set for a pipeline.
    pub fn new(pipeline: impl Into<String>, direction: MetricDirection) -> Self {
        Self {
            pipeline: pipeline.into(),
            direction,
            samples: Vec::new(),
        }
    }

    /// Set the measured samples.
    pub fn with_samples(mut self, samples: Vec<DistanceSample>) -> Self {
        self.samples = samples;
        self
    }

    /// Raw distance values of all samples.
    pub fn distances(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.distance).collect()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether the sample set is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// One tested cryptographic or functional primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier, unique within its dataset.
    pub code: String,
    /// Whether the device supported and executed this operation. An
    /// operation with `present = false` carries no pipeline data and is
    /// never compared in detail.
    pub present: bool,
    /// Per-pipeline distance samples.
    pub pipelines: Vec<PipelineSamples>,
    /// Measured execution times.
    pub exec_times: Vec<ExecTimeSample>,
}

impl Operation {
    /// Create a present operation with no data yet.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            present: true,
            pipelines: Vec::new(),
            exec_times: Vec::new(),
        }
    }

    /// Create an operation the device did not support.
    pub fn absent(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            present: false,
            pipelines: Vec::new(),
            exec_times: Vec::new(),
        }
    }

    /// Set the pipeline sample sets.
    pub fn with_pipelines(mut self, pipelines: Vec<PipelineSamples>) -> Self {
        self.pipelines = pipelines;
        self
    }

    /// Set the execution-time samples.
    pub fn with_exec_times(mut self, exec_times: Vec<ExecTimeSample>) -> Self {
        self.exec_times = exec_times;
        self
    }

    /// Look up a pipeline sample set by identifier.
    pub fn pipeline(&self, pipeline: &str) -> Option<&PipelineSamples> {
        self.pipelines.iter().find(|p| p.pipeline == pipeline)
    }

    /// Raw execution-time values.
    pub fn exec_time_values(&self) -> Vec<f64> {
        self.exec_times.iter().map(|et| et.time).collect()
    }
}

/// Capture metadata for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Capture date, as reported by the measurement tool.
    pub created: Option<String>,
    /// Operator who ran the capture.
    pub operator: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl Meta {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture date.
    pub fn with_created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }

    /// Set free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A named collection of measured operations from one device run, either
/// the trusted reference capture or a newly measured profile.
///
/// Immutable once constructed; the engine never mutates its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Card identifier of the measured device.
    pub card: String,
    /// Capture metadata.
    pub meta: Meta,
    /// Measured operations.
    pub operations: Vec<Operation>,
}

impl Dataset {
    /// Create an empty dataset for a card.
    pub fn new(card: impl Into<String>) -> Self {
        Self {
            card: card.into(),
            meta: Meta::default(),
            operations: Vec::new(),
        }
    }

    /// Set capture metadata.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the measured operations.
    pub fn with_operations(mut self, operations: Vec<Operation>) -> Self {
        self.operations = operations;
        self
    }

    /// Look up an operation by code.
    pub fn operation(&self, code: &str) -> Option<&Operation> {
        self.operations.iter().find(|o| o.code == code)
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check whether the dataset holds no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Validate the dataset before contrasting.
    ///
    /// Identifier lookups assume unique operation codes and unique
    /// pipeline identifiers within an operation, and the bound estimator
    /// assumes finite sample values.
    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut codes: Vec<&str> = Vec::with_capacity(self.operations.len());
        for operation in &self.operations {
            if codes.contains(&operation.code.as_str()) {
                return Err(DatasetError::DuplicateOperation(operation.code.clone()));
            }
            codes.push(operation.code.as_str());

            let mut pipelines: Vec<&str> = Vec::with_capacity(operation.pipelines.len());
            for pipeline in &operation.pipelines {
                if pipelines.contains(&pipeline.pipeline.as_str()) {
                    return Err(DatasetError::DuplicatePipeline {
                        operation: operation.code.clone(),
                        pipeline: pipeline.pipeline.clone(),
                    });
                }
                pipelines.push(pipeline.pipeline.as_str());

                if pipeline.samples.iter().any(|s| !s.distance.is_finite()) {
                    return Err(DatasetError::NonFiniteSample {
                        operation: operation.code.clone(),
                        pipeline: Some(pipeline.pipeline.clone()),
                    });
                }
            }

            if operation.exec_times.iter().any(|et| !et.time.is_finite()) {
                return Err(DatasetError::NonFiniteSample {
                    operation: operation.code.clone(),
                    pipeline: None,
                });
            }
        }
        Ok(())
    }
}

/// Errors that make a dataset unusable for contrasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// Two operations share the same code.
    DuplicateOperation(String),
    /// Two pipelines within one operation share the same identifier.
    DuplicatePipeline {
        /// Operation holding the duplicates.
        operation: String,
        /// Duplicated pipeline identifier.
        pipeline: String,
    },
    /// A sample value is NaN or infinite.
    NonFiniteSample {
        /// Operation holding the sample.
        operation: String,
        /// Pipeline holding the sample, or `None` for an execution time.
        pipeline: Option<String>,
    },
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::DuplicateOperation(code) => {
                write!(f, "duplicate operation code {}", code)
            }
            DatasetError::DuplicatePipeline {
                operation,
                pipeline,
            } => write!(
                f,
                "duplicate pipeline {} in operation {}",
                pipeline, operation
            ),
            DatasetError::NonFiniteSample {
                operation,
                pipeline: Some(pipeline),
            } => write!(
                f,
                "non-finite sample in operation {}, pipeline {}",
                operation, pipeline
            ),
            DatasetError::NonFiniteSample {
                operation,
                pipeline: None,
            } => write!(
                f,
                "non-finite execution time in operation {}",
                operation
            ),
        }
    }
}

impl std::error::Error for DatasetError {}
