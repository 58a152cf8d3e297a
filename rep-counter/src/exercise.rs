use crate::{
    angle::{joint_angle, midpoint},
    common::*,
    counter::RepPhase,
    error::RepCounterError,
    pose::{landmark::*, Pose},
};

/// Supported exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Exercise {
    Pushup,
    Squat,
    LegRaise,
    DumbbellCurl,
    OneArmRow,
    Plank,
}

impl Exercise {
    pub const ALL: [Exercise; 6] = [
        Self::Pushup,
        Self::Squat,
        Self::LegRaise,
        Self::DumbbellCurl,
        Self::OneArmRow,
        Self::Plank,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pushup => "pushup",
            Self::Squat => "squat",
            Self::LegRaise => "leg_raise",
            Self::DumbbellCurl => "dumbbell_curl",
            Self::OneArmRow => "one_arm_row",
            Self::Plank => "plank",
        }
    }

    /// The repetition rule, or `None` for static holds.
    pub fn rule(&self) -> Option<RepRule> {
        use Crossing::*;
        use RepPhase::*;

        let rule = match self {
            // average elbow angle
            Self::Pushup => RepRule::new(Below(100.0), Down, Above(150.0), Up),
            // average knee angle
            Self::Squat => RepRule::new(Below(100.0), Down, Above(160.0), Up),
            // vertical ankle-to-hip distance
            Self::LegRaise => RepRule::new(Below(0.2), Up, Above(0.4), Down),
            // elbow angle of the curling arm
            Self::DumbbellCurl => RepRule::new(Below(50.0), Up, Above(150.0), Down),
            // elbow height above the shoulder of the rowing arm
            Self::OneArmRow => RepRule::new(Above(0.0), Up, Below(-0.1), Down),
            Self::Plank => return None,
        };
        Some(rule)
    }

    /// Read the scalar this exercise's rule is evaluated on. For the plank
    /// it is the shoulder-hip-ankle alignment angle.
    pub fn metric(&self, pose: &Pose) -> Result<f64, RepCounterError> {
        let metric = match self {
            Self::Pushup => {
                let left = joint_angle(
                    pose.xy(LEFT_SHOULDER)?,
                    pose.xy(LEFT_ELBOW)?,
                    pose.xy(LEFT_WRIST)?,
                );
                let right = joint_angle(
                    pose.xy(RIGHT_SHOULDER)?,
                    pose.xy(RIGHT_ELBOW)?,
                    pose.xy(RIGHT_WRIST)?,
                );
                (left + right) / 2.0
            }
            Self::Squat => {
                let left = joint_angle(
                    pose.xy(LEFT_HIP)?,
                    pose.xy(LEFT_KNEE)?,
                    pose.xy(LEFT_ANKLE)?,
                );
                let right = joint_angle(
                    pose.xy(RIGHT_HIP)?,
                    pose.xy(RIGHT_KNEE)?,
                    pose.xy(RIGHT_ANKLE)?,
                );
                (left + right) / 2.0
            }
            Self::LegRaise => {
                let hip = midpoint(pose.xy(LEFT_HIP)?, pose.xy(RIGHT_HIP)?);
                let ankle = midpoint(pose.xy(LEFT_ANKLE)?, pose.xy(RIGHT_ANKLE)?);
                (ankle[1] - hip[1]).abs()
            }
            Self::DumbbellCurl => {
                let left = joint_angle(
                    pose.xy(LEFT_SHOULDER)?,
                    pose.xy(LEFT_ELBOW)?,
                    pose.xy(LEFT_WRIST)?,
                );
                let right = joint_angle(
                    pose.xy(RIGHT_SHOULDER)?,
                    pose.xy(RIGHT_ELBOW)?,
                    pose.xy(RIGHT_WRIST)?,
                );
                left.min(right)
            }
            Self::OneArmRow => {
                let left_elbow = pose.xy(LEFT_ELBOW)?;
                let right_elbow = pose.xy(RIGHT_ELBOW)?;

                // the higher elbow belongs to the rowing arm
                let (shoulder, elbow) = if left_elbow[1] < right_elbow[1] {
                    (pose.xy(LEFT_SHOULDER)?, left_elbow)
                } else {
                    (pose.xy(RIGHT_SHOULDER)?, right_elbow)
                };
                shoulder[1] - elbow[1]
            }
            Self::Plank => {
                let shoulder = midpoint(pose.xy(LEFT_SHOULDER)?, pose.xy(RIGHT_SHOULDER)?);
                let hip = midpoint(pose.xy(LEFT_HIP)?, pose.xy(RIGHT_HIP)?);
                let ankle = midpoint(pose.xy(LEFT_ANKLE)?, pose.xy(RIGHT_ANKLE)?);
                joint_angle(shoulder, hip, ankle)
            }
        };
        Ok(metric)
    }
}

impl Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Exercise {
    type Err = RepCounterError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized = name.trim().to_lowercase().replace(|c| c == '-' || c == ' ', "_");
        Self::ALL
            .into_iter()
            .find(|exercise| exercise.name() == normalized)
            .ok_or_else(|| RepCounterError::UnknownExercise(name.to_string()))
    }
}

/// A threshold on the exercise metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crossing {
    Below(f64),
    Above(f64),
}

impl Crossing {
    pub fn is_crossed_by(&self, metric: f64) -> bool {
        match *self {
            Self::Below(threshold) => metric < threshold,
            Self::Above(threshold) => metric > threshold,
        }
    }
}

/// Two-threshold repetition rule.
///
/// Crossing `enter` moves into `enter_phase`. Crossing `exit` while in
/// `enter_phase` moves into `exit_phase` and completes one repetition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepRule {
    pub enter: Crossing,
    pub enter_phase: RepPhase,
    pub exit: Crossing,
    pub exit_phase: RepPhase,
}

impl RepRule {
    pub fn new(enter: Crossing, enter_phase: RepPhase, exit: Crossing, exit_phase: RepPhase) -> Self {
        Self {
            enter,
            enter_phase,
            exit,
            exit_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::Landmark;
    use approx::assert_abs_diff_eq;

    fn blank_pose() -> Pose {
        (0..NUM_LANDMARKS).map(|_| Landmark::new(0.5, 0.5)).collect()
    }

    fn set(pose: &mut Pose, index: usize, x: f64, y: f64) {
        let mut landmarks = pose.landmarks().to_vec();
        landmarks[index] = Landmark::new(x, y);
        *pose = Pose::new(landmarks);
    }

    #[test]
    fn parse_exercise_names() {
        assert_eq!("squat".parse::<Exercise>().unwrap(), Exercise::Squat);
        assert_eq!("Leg-Raise".parse::<Exercise>().unwrap(), Exercise::LegRaise);
        assert_eq!("one arm row".parse::<Exercise>().unwrap(), Exercise::OneArmRow);
        assert!("burpee".parse::<Exercise>().is_err());
        for exercise in Exercise::ALL {
            assert_eq!(exercise.to_string().parse::<Exercise>().unwrap(), exercise);
        }
    }

    #[test]
    fn plank_has_no_rule() {
        assert!(Exercise::Plank.rule().is_none());
        assert!(Exercise::ALL
            .iter()
            .filter(|exercise| **exercise != Exercise::Plank)
            .all(|exercise| exercise.rule().is_some()));
    }

    #[test]
    fn squat_metric_is_average_knee_angle() {
        let mut pose = blank_pose();
        // left leg bent at 90 degrees, right leg straight
        set(&mut pose, LEFT_HIP, 0.4, 0.5);
        set(&mut pose, LEFT_KNEE, 0.5, 0.5);
        set(&mut pose, LEFT_ANKLE, 0.5, 0.6);
        set(&mut pose, RIGHT_HIP, 0.6, 0.4);
        set(&mut pose, RIGHT_KNEE, 0.6, 0.5);
        set(&mut pose, RIGHT_ANKLE, 0.6, 0.6);

        let metric = Exercise::Squat.metric(&pose).unwrap();
        assert_abs_diff_eq!(metric, 135.0, epsilon = 1e-9);
    }

    #[test]
    fn one_arm_row_follows_higher_elbow() {
        let mut pose = blank_pose();
        set(&mut pose, LEFT_SHOULDER, 0.4, 0.5);
        set(&mut pose, RIGHT_SHOULDER, 0.6, 0.5);
        set(&mut pose, LEFT_ELBOW, 0.4, 0.7);
        set(&mut pose, RIGHT_ELBOW, 0.6, 0.45);

        let metric = Exercise::OneArmRow.metric(&pose).unwrap();
        assert_abs_diff_eq!(metric, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn metric_requires_landmarks() {
        let pose: Pose = (0..5).map(|_| Landmark::new(0.5, 0.5)).collect();
        assert!(matches!(
            Exercise::Pushup.metric(&pose),
            Err(RepCounterError::MissingLandmark { .. })
        ));
    }
}
