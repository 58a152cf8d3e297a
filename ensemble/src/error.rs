use crate::detection::ModelId;
use thiserror::Error;

/// Invalid arguments rejected by the ensemble.
///
/// An empty input is not an error. It merges into an empty list.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnsembleError {
    #[error("iou_threshold must be in (0, 1], but it is {0}")]
    InvalidIouThreshold(f64),
    #[error("min_confidence must be in [0, 1], but it is {0}")]
    InvalidMinConfidence(f64),
    #[error("weight of model '{model}' must be positive and finite, but it is {weight}")]
    InvalidWeight { model: ModelId, weight: f64 },
    #[error("detection {} of model '{model}' has confidence {confidence} outside [0, 1]", DisplayIndex(.index))]
    InvalidConfidence {
        model: ModelId,
        index: Option<usize>,
        confidence: f64,
    },
    #[error("detection {} of model '{model}' has malformed box {xyxy:?}, expect x1 < x2 and y1 < y2", DisplayIndex(.index))]
    MalformedBox {
        model: ModelId,
        index: Option<usize>,
        xyxy: [f64; 4],
    },
}

struct DisplayIndex<'a>(&'a Option<usize>);

impl std::fmt::Display for DisplayIndex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(index) => write!(f, "#{}", index),
            None => f.write_str("<new>"),
        }
    }
}
