use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RepCounterError {
    #[error("pose has {len} landmarks, but landmark {index} is required")]
    MissingLandmark { index: usize, len: usize },
    #[error("smoothing factor must be in [0, 1), but it is {0}")]
    InvalidSmoothing(f64),
    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),
}
