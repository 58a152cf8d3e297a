//! Offline repetition counting over recorded poses.

use crate::{common::*, config::RepsConfig};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepReport {
    pub exercise: Exercise,
    pub frames: Vec<Observation>,
    pub rep_count: u32,
    pub target_reps: Option<u32>,
    pub completed: bool,
}

pub fn count_reps(
    config: &RepsConfig,
    exercise: Exercise,
    target: Option<u32>,
    poses: &[Pose],
) -> Result<RepReport> {
    let tracker = ExerciseTracker::new(exercise, config.smoothing_alpha)?;
    let mut tracker = match target {
        Some(target) => tracker.with_target(target),
        None => tracker,
    };

    let frames = poses
        .iter()
        .enumerate()
        .map(|(index, pose)| {
            tracker
                .observe(pose)
                .with_context(|| format!("invalid pose at frame {}", index))
        })
        .collect::<Result<Vec<_>>>()?;

    let counter = tracker.counter();
    debug!("{} frames, {} reps of {}", frames.len(), counter.rep_count(), exercise);

    Ok(RepReport {
        exercise,
        frames,
        rep_count: counter.rep_count(),
        target_reps: counter.target_reps(),
        completed: counter.is_completed(),
    })
}

pub async fn count_reps_file(
    config: &RepsConfig,
    exercise: Exercise,
    target: Option<u32>,
    input: &Path,
) -> Result<()> {
    let text = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read '{}'", input.display()))?;
    let poses: Vec<Pose> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse '{}'", input.display()))?;

    let report = count_reps(config, exercise, target, &poses)?;
    info!("counted {} reps of {}", report.rep_count, exercise);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
