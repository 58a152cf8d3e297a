use anyhow::{Context, Result};
use ensemble_tool::{config::Config, Command};
use rep_counter::Exercise;
use std::{env, path::PathBuf, sync::Arc};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[derive(Debug, Clone, StructOpt)]
/// Merge detections of multiple models and count exercise repetitions
struct Args {
    #[structopt(long, default_value = "ensemble.json5")]
    /// configuration file
    pub config_file: PathBuf,
    #[structopt(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Clone, StructOpt)]
enum Cmd {
    /// Merge recorded model results image by image
    Merge {
        #[structopt(long)]
        /// JSON list of {name, model_results}
        input: PathBuf,
        #[structopt(long)]
        /// write merged results here instead of stdout
        output: Option<PathBuf>,
    },
    /// Count repetitions over a JSON list of poses
    CountReps {
        #[structopt(long)]
        exercise: Exercise,
        #[structopt(long)]
        input: PathBuf,
        #[structopt(long)]
        /// report completion once this many reps are done
        target: Option<u32>,
    },
}

#[tokio::main]
pub async fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    // parse arguments
    let Args { config_file, cmd } = Args::from_args();
    let config = Arc::new(
        Config::open(&config_file)
            .with_context(|| format!("failed to load config file '{}'", config_file.display()))?,
    );

    let command = match cmd {
        Cmd::Merge { input, output } => Command::Merge { input, output },
        Cmd::CountReps {
            exercise,
            input,
            target,
        } => Command::CountReps {
            exercise,
            input,
            target,
        },
    };
    ensemble_tool::start(config, command).await?;

    Ok(())
}
