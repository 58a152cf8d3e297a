use crate::{
    common::*,
    consensus::ConsensusDetection,
    detection::{ModelId, ModelResultSet},
};

/// Statistics reported next to the merged detections of one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub models_used: Vec<ModelId>,
    pub total_detections: usize,
    pub consensus_detections: usize,
    pub single_detections: usize,
    /// Percentage of output groups confirmed by two or more models.
    pub consensus_rate: f64,
    /// Number of raw detections each model returned.
    pub individual_results: IndexMap<ModelId, usize>,
    /// True when more than one model took part.
    pub ensemble_ready: bool,
}

impl EnsembleSummary {
    pub fn new(results: &ModelResultSet, detections: &[ConsensusDetection]) -> Self {
        let total_detections = detections.len();
        let consensus_detections = detections
            .iter()
            .filter(|detection| detection.is_consensus)
            .count();
        let consensus_rate = if total_detections == 0 {
            0.0
        } else {
            consensus_detections as f64 / total_detections as f64 * 100.0
        };

        Self {
            models_used: results.models().cloned().collect(),
            total_detections,
            consensus_detections,
            single_detections: total_detections - consensus_detections,
            consensus_rate,
            individual_results: results
                .iter()
                .map(|(model, detections)| (model.clone(), detections.len()))
                .collect(),
            ensemble_ready: results.num_models() > 1,
        }
    }
}
