//! Per-frame posture assessment.

use crate::{
    angle::{joint_angle, midpoint},
    common::*,
    error::RepCounterError,
    exercise::Exercise,
    pose::{landmark::*, Pose},
};

/// Posture assessment of one frame.
///
/// Angles that cannot be measured come out as NaN and never raise a fault.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFeedback {
    pub is_correct: bool,
    pub messages: Vec<String>,
    /// Named measurements the checks were made on. Angles are in degrees,
    /// distances in normalized image units.
    pub angles: BTreeMap<String, f64>,
    /// Lowest visibility among the landmarks the checks rely on.
    pub confidence: f64,
}

#[derive(Debug, Default)]
struct FormCheck {
    faults: usize,
    messages: Vec<String>,
    angles: BTreeMap<String, f64>,
}

impl FormCheck {
    fn fault(&mut self, message: &str) {
        self.faults += 1;
        self.messages.push(message.to_string());
    }

    fn note(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn measure(&mut self, name: &str, value: f64) {
        self.angles.insert(name.to_string(), value);
    }

    fn finish(mut self, confidence: f64, fallback: Option<&str>) -> FormFeedback {
        if self.messages.is_empty() {
            if let Some(message) = fallback {
                self.note(message);
            }
        }

        FormFeedback {
            is_correct: self.faults == 0,
            messages: self.messages,
            angles: self.angles,
            confidence,
        }
    }
}

fn min_visibility(pose: &Pose, indices: &[usize]) -> Result<f64, RepCounterError> {
    indices.iter().try_fold(f64::INFINITY, |min, &index| {
        Ok(min.min(pose.landmark(index)?.visibility))
    })
}

fn mid(pose: &Pose, left: usize, right: usize) -> Result<[f64; 2], RepCounterError> {
    Ok(midpoint(pose.xy(left)?, pose.xy(right)?))
}

/// Check the posture of `pose` against the form rules of `exercise`.
pub fn assess_form(exercise: Exercise, pose: &Pose) -> Result<FormFeedback, RepCounterError> {
    let mut check = FormCheck::default();

    let feedback = match exercise {
        Exercise::Pushup => {
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
            let elbow = (left + right) / 2.0;
            let alignment = joint_angle(
                mid(pose, LEFT_SHOULDER, RIGHT_SHOULDER)?,
                mid(pose, LEFT_HIP, RIGHT_HIP)?,
                mid(pose, LEFT_ANKLE, RIGHT_ANKLE)?,
            );

            if elbow > 120.0 {
                check.fault("Lower your body further, aim for a 90° elbow angle");
            } else if elbow < 70.0 {
                check.note("Don't go too low, maintain control");
            }
            if (alignment - 180.0).abs() > 15.0 {
                check.fault("Keep your hips up and your body in a straight line");
            }

            check.measure("elbow_angle", elbow);
            check.measure("body_alignment", alignment);
            let confidence = min_visibility(pose, &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST, LEFT_HIP])?;
            check.finish(confidence, None)
        }
        Exercise::Squat => {
            let left_knee = pose.xy(LEFT_KNEE)?;
            let left_ankle = pose.xy(LEFT_ANKLE)?;
            let left = joint_angle(pose.xy(LEFT_HIP)?, left_knee, left_ankle);
            let right = joint_angle(
                pose.xy(RIGHT_HIP)?,
                pose.xy(RIGHT_KNEE)?,
                pose.xy(RIGHT_ANKLE)?,
            );
            let knee = (left + right) / 2.0;
            let shoulder = mid(pose, LEFT_SHOULDER, RIGHT_SHOULDER)?;
            let hip = mid(pose, LEFT_HIP, RIGHT_HIP)?;

            if knee > 110.0 {
                check.fault("Go deeper, aim for a 90° knee angle");
            } else if knee < 70.0 {
                check.note("Don't go too deep, maintain control");
            }
            if left_knee[0] < left_ankle[0] - 0.1 {
                check.fault("Don't let your knees go too far forward");
            }
            if (shoulder[0] - hip[0]).abs() > 0.15 {
                check.fault("Keep your back straight");
            }

            check.measure("knee_angle", knee);
            let confidence = min_visibility(pose, &[LEFT_HIP, LEFT_KNEE, LEFT_ANKLE])?;
            check.finish(confidence, None)
        }
        Exercise::LegRaise => {
            let shoulder = mid(pose, LEFT_SHOULDER, RIGHT_SHOULDER)?;
            let hip = mid(pose, LEFT_HIP, RIGHT_HIP)?;
            let knee = mid(pose, LEFT_KNEE, RIGHT_KNEE)?;
            let ankle = mid(pose, LEFT_ANKLE, RIGHT_ANKLE)?;
            let leg = joint_angle(hip, knee, ankle);
            let elevation = (ankle[1] - hip[1]).abs();

            if (leg - 180.0).abs() > 20.0 {
                check.fault("Keep your legs straight");
            }
            // hips lifting towards the shoulders
            if (hip[1] - shoulder[1]).abs() < 0.2 {
                check.fault("Keep your lower back flat on the ground");
            }

            check.measure("leg_angle", leg);
            check.measure("leg_elevation", elevation);
            let confidence = min_visibility(pose, &[LEFT_HIP, LEFT_ANKLE])?;
            check.finish(confidence, None)
        }
        Exercise::DumbbellCurl => {
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
            let active = left.min(right);

            if active > 160.0 {
                check.note("Start position looks good");
            } else if active < 40.0 {
                check.note("Good contraction at the top");
            } else if (40.0..=160.0).contains(&active) {
                check.note("Keep your upper arm still, don't swing");
            }

            check.measure("left_elbow_angle", left);
            check.measure("right_elbow_angle", right);
            check.measure("active_angle", active);
            let confidence = min_visibility(pose, &[LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST])?;
            check.finish(confidence, Some("Form looks good!"))
        }
        Exercise::OneArmRow => {
            // the higher elbow belongs to the rowing arm
            let (shoulder_index, elbow_index, wrist_index) =
                if pose.xy(LEFT_ELBOW)?[1] < pose.xy(RIGHT_ELBOW)?[1] {
                    (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST)
                } else {
                    (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST)
                };
            let shoulder = pose.xy(shoulder_index)?;
            let elbow = pose.xy(elbow_index)?;
            let elbow_angle = joint_angle(shoulder, elbow, pose.xy(wrist_index)?);
            let back_tilt = (mid(pose, LEFT_SHOULDER, RIGHT_SHOULDER)?[1]
                - mid(pose, LEFT_HIP, RIGHT_HIP)?[1])
                .abs();

            if back_tilt > 0.3 {
                check.fault("Keep your back flat and parallel to the ground");
            }
            if elbow_angle < 120.0 && elbow[1] < shoulder[1] {
                check.note("Good elbow position at the top");
            } else if elbow[1] > shoulder[1] {
                check.fault("Pull your elbow higher, lead with the elbow and not the wrist");
            }

            check.measure("elbow_angle", elbow_angle);
            check.measure("back_tilt", back_tilt);
            let confidence = min_visibility(pose, &[shoulder_index, elbow_index])?;
            check.finish(confidence, Some("Form looks good!"))
        }
        Exercise::Plank => {
            let shoulder = mid(pose, LEFT_SHOULDER, RIGHT_SHOULDER)?;
            let alignment = joint_angle(
                shoulder,
                mid(pose, LEFT_HIP, RIGHT_HIP)?,
                mid(pose, LEFT_ANKLE, RIGHT_ANKLE)?,
            );
            let head = (pose.xy(NOSE)?[0] - shoulder[0]).abs();

            if (alignment - 180.0).abs() > 15.0 {
                check.fault("Raise your hips, keep a straight line");
            }
            if head > 0.15 {
                check.fault("Keep your head neutral, look at the ground");
            }

            check.measure("body_alignment", alignment);
            check.measure("head_alignment", head);
            let confidence = min_visibility(pose, &[LEFT_SHOULDER, LEFT_HIP, LEFT_ANKLE])?;
            check.finish(confidence, Some("Great plank form! Keep holding!"))
        }
    };

    Ok(feedback)
}
