use crate::{
    common::*,
    exercise::{Exercise, RepRule},
};

/// Movement phase of the repetition state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepPhase {
    Ready,
    Down,
    Up,
}

impl Default for RepPhase {
    fn default() -> Self {
        Self::Ready
    }
}

/// What an [`RepCounter::update`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event", content = "value")]
pub enum RepEvent {
    None,
    Entered(RepPhase),
    Counted(u32),
    Completed(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepCounter {
    rule: Option<RepRule>,
    phase: RepPhase,
    rep_count: u32,
    target_reps: Option<u32>,
    completed: bool,
}

impl RepCounter {
    pub fn new(exercise: Exercise) -> Self {
        Self::from_rule(exercise.rule())
    }

    /// A counter driven by a custom rule. `None` never counts.
    pub fn from_rule(rule: Option<RepRule>) -> Self {
        Self {
            rule,
            phase: RepPhase::Ready,
            rep_count: 0,
            target_reps: None,
            completed: false,
        }
    }

    /// Report [`RepEvent::Completed`] once `target_reps` is reached. Zero means no target.
    pub fn with_target(mut self, target_reps: u32) -> Self {
        self.target_reps = (target_reps > 0).then(|| target_reps);
        self
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    pub fn target_reps(&self) -> Option<u32> {
        self.target_reps
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Feed one metric sample.
    pub fn update(&mut self, metric: f64) -> RepEvent {
        let rule = match &self.rule {
            Some(rule) => *rule,
            None => return RepEvent::None,
        };
        if !metric.is_finite() {
            return RepEvent::None;
        }

        if self.phase != rule.enter_phase && rule.enter.is_crossed_by(metric) {
            debug!("enter {:?} at metric {}", rule.enter_phase, metric);
            self.phase = rule.enter_phase;
            return RepEvent::Entered(rule.enter_phase);
        }

        if self.phase == rule.enter_phase && rule.exit.is_crossed_by(metric) {
            self.phase = rule.exit_phase;
            self.rep_count += 1;
            debug!("rep {} at metric {}", self.rep_count, metric);

            match self.target_reps {
                Some(target) if !self.completed && self.rep_count >= target => {
                    info!("target of {} reps reached", target);
                    self.completed = true;
                    return RepEvent::Completed(self.rep_count);
                }
                _ => return RepEvent::Counted(self.rep_count),
            }
        }

        RepEvent::None
    }

    pub fn reset(&mut self) {
        self.phase = RepPhase::Ready;
        self.rep_count = 0;
        self.completed = false;
    }
}
