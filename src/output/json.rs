//! JSON serialization for contrast results.

use crate::result::ModuleResult;

/// Serialize a result tree to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `ModuleResult`).
pub fn to_json(module: &ModuleResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(module)
}

/// Serialize a result tree to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for
/// `ModuleResult`).
pub fn to_json_pretty(module: &ModuleResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(module)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, DistanceSample, MetricDirection, Operation, PipelineSamples};
    use crate::engine::contrast_datasets;

    fn module() -> ModuleResult {
        let reference = Dataset::new("ref-card").with_operations(vec![Operation::new("ECDH")
            .with_pipelines(vec![PipelineSamples::new(
                "corr",
                MetricDirection::LowerIsBetter,
            )
            .with_samples(vec![
                DistanceSample::new(1.0),
                DistanceSample::new(1.2),
                DistanceSample::new(1.1),
            ])])]);
        let profile = Dataset::new("prof-card").with_operations(vec![Operation::new("ECDH")
            .with_pipelines(vec![PipelineSamples::new(
                "corr",
                MetricDirection::LowerIsBetter,
            )
            .with_samples(vec![DistanceSample::new(1.05).with_source("ecdh_01.csv")])])]);
        contrast_datasets(&reference, &profile).unwrap()
    }

    #[test]
    fn json_contains_tree_fields() {
        let json = to_json(&module()).unwrap();
        assert!(json.contains("\"reference\":\"ref-card\""));
        assert!(json.contains("\"operation\":\"ECDH\""));
        assert!(json.contains("\"pipeline\":\"corr\""));
        assert!(json.contains("ecdh_01.csv"));
    }

    #[test]
    fn json_round_trips() {
        let module = module();
        let json = to_json_pretty(&module).unwrap();
        let back: ModuleResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, module);
    }
}
