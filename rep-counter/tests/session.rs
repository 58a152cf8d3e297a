use anyhow::Result;
use rep_counter::{
    landmark::*, Exercise, ExerciseTracker, Landmark, Pose, RepEvent, DEFAULT_SMOOTHING_ALPHA,
};

/// Place `joint` at a fixed spot and bend the limb so that the angle at
/// `joint` is `degrees`.
fn bend(landmarks: &mut [Landmark], (outer, joint, end): (usize, usize, usize), x: f64, degrees: f64) {
    let radians = degrees.to_radians();
    landmarks[joint] = Landmark::new(x, 0.5);
    landmarks[end] = Landmark::new(x, 0.7);
    landmarks[outer] = Landmark::new(x + 0.2 * radians.sin(), 0.5 + 0.2 * radians.cos());
}

fn squat_pose(knee_angle: f64) -> Pose {
    let mut landmarks = vec![Landmark::new(0.5, 0.5); NUM_LANDMARKS];
    bend(&mut landmarks, (LEFT_HIP, LEFT_KNEE, LEFT_ANKLE), 0.4, knee_angle);
    bend(&mut landmarks, (RIGHT_HIP, RIGHT_KNEE, RIGHT_ANKLE), 0.6, knee_angle);
    Pose::new(landmarks)
}

fn pushup_pose(elbow_angle: f64) -> Pose {
    let mut landmarks = vec![Landmark::new(0.5, 0.5); NUM_LANDMARKS];
    bend(&mut landmarks, (LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST), 0.3, elbow_angle);
    bend(&mut landmarks, (RIGHT_SHOULDER, RIGHT_ELBOW, RIGHT_WRIST), 0.7, elbow_angle);
    Pose::new(landmarks)
}

fn hold(pose: Pose, frames: usize) -> impl Iterator<Item = Pose> {
    std::iter::repeat(pose).take(frames)
}

#[test]
fn squat_session_with_smoothing() -> Result<()> {
    let mut tracker = ExerciseTracker::new(Exercise::Squat, DEFAULT_SMOOTHING_ALPHA)?.with_target(2);

    let frames = hold(squat_pose(175.0), 10)
        .chain(hold(squat_pose(80.0), 15))
        .chain(hold(squat_pose(175.0), 15))
        .chain(hold(squat_pose(80.0), 15))
        .chain(hold(squat_pose(175.0), 15));

    let mut events = vec![];
    for pose in frames {
        let observation = tracker.observe(&pose)?;
        if observation.event != RepEvent::None {
            events.push(observation.event);
        }
    }

    assert_eq!(tracker.counter().rep_count(), 2);
    assert_eq!(events.last(), Some(&RepEvent::Completed(2)));
    assert_eq!(
        events.iter().filter(|event| matches!(event, RepEvent::Completed(_))).count(),
        1
    );
    Ok(())
}

#[test]
fn pushup_session_without_smoothing() -> Result<()> {
    let mut tracker = ExerciseTracker::new(Exercise::Pushup, 0.0)?;

    // hovering between the thresholds never counts
    for angle in [170.0, 120.0, 140.0, 90.0, 130.0, 145.0, 160.0, 95.0, 155.0] {
        tracker.observe(&pushup_pose(angle))?;
    }
    assert_eq!(tracker.counter().rep_count(), 2);

    tracker.reset();
    assert_eq!(tracker.counter().rep_count(), 0);
    Ok(())
}

#[test]
fn observation_serializes_to_json() -> Result<()> {
    let mut tracker = ExerciseTracker::new(Exercise::Squat, 0.0)?;
    tracker.observe(&squat_pose(170.0))?;
    let observation = tracker.observe(&squat_pose(90.0))?;

    let json = serde_json::to_value(&observation)?;
    assert_eq!(json["phase"], "down");
    assert_eq!(json["rep_count"], 0);
    assert_eq!(json["event"]["event"], "entered");
    assert_eq!(json["event"]["value"], "down");
    // the synthetic hips sit to one side of the shoulders
    assert_eq!(json["form"]["is_correct"], false);
    assert_eq!(json["form"]["messages"][0], "Keep your back straight");
    let knee_angle = json["form"]["angles"]["knee_angle"].as_f64().unwrap();
    assert!((knee_angle - 90.0).abs() < 1e-9);
    assert_eq!(json["form"]["confidence"], 1.0);
    Ok(())
}
