//! Command line front end of the detection ensemble.

pub mod common;
pub mod config;
pub mod merge;
pub mod reps;

use crate::common::*;

/// What to run with a loaded config.
#[derive(Debug, Clone)]
pub enum Command {
    Merge {
        input: PathBuf,
        output: Option<PathBuf>,
    },
    CountReps {
        exercise: Exercise,
        input: PathBuf,
        target: Option<u32>,
    },
}

pub async fn start(config: Arc<config::Config>, command: Command) -> Result<()> {
    match command {
        Command::Merge { input, output } => {
            merge::merge_file(&config, &input, output.as_deref()).await?;
        }
        Command::CountReps {
            exercise,
            input,
            target,
        } => {
            reps::count_reps_file(&config.reps, exercise, target, &input).await?;
        }
    }

    Ok(())
}
