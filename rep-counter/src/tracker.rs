use crate::{
    common::*,
    counter::{RepCounter, RepEvent, RepPhase},
    error::RepCounterError,
    exercise::Exercise,
    form::{assess_form, FormFeedback},
    pose::Pose,
};

pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.7;

/// Check that `alpha` is a usable smoothing factor, i.e. within `[0, 1)`.
pub fn validate_smoothing(alpha: f64) -> Result<(), RepCounterError> {
    if !(0.0..1.0).contains(&alpha) {
        return Err(RepCounterError::InvalidSmoothing(alpha));
    }
    Ok(())
}

/// The state of an exercise session after one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub metric: f64,
    pub phase: RepPhase,
    pub rep_count: u32,
    pub event: RepEvent,
    pub form: FormFeedback,
}

/// Tracks one person doing one exercise across frames.
///
/// Incoming poses are smoothed against the previous smoothed pose before the
/// exercise metric is read.
#[derive(Debug, Clone)]
pub struct ExerciseTracker {
    exercise: Exercise,
    counter: RepCounter,
    prev: Option<Pose>,
    alpha: f64,
}

impl ExerciseTracker {
    pub fn new(exercise: Exercise, alpha: f64) -> Result<Self, RepCounterError> {
        validate_smoothing(alpha)?;

        Ok(Self {
            exercise,
            counter: RepCounter::new(exercise),
            prev: None,
            alpha,
        })
    }

    pub fn with_target(mut self, target_reps: u32) -> Self {
        self.counter = self.counter.with_target(target_reps);
        self
    }

    pub fn exercise(&self) -> Exercise {
        self.exercise
    }

    pub fn counter(&self) -> &RepCounter {
        &self.counter
    }

    pub fn observe(&mut self, pose: &Pose) -> Result<Observation, RepCounterError> {
        let smoothed = match &self.prev {
            Some(prev) => pose.smooth(prev, self.alpha),
            None => pose.clone(),
        };
        let metric = self.exercise.metric(&smoothed)?;
        let form = assess_form(self.exercise, &smoothed)?;
        self.prev = Some(smoothed);

        let event = self.counter.update(metric);
        Ok(Observation {
            metric,
            phase: self.counter.phase(),
            rep_count: self.counter.rep_count(),
            event,
            form,
        })
    }

    /// Forget the smoothing history and the rep count.
    pub fn reset(&mut self) {
        self.prev = None;
        self.counter.reset();
    }
}
