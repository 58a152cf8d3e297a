pub use anyhow::{format_err, Context as _, Error, Result};
pub use ensemble::{
    ConsensusDetection, DetectionSources, EnsembleDetector, EnsembleInit, EnsembleSummary,
    ModelId, ModelResultSet, RecordedSource,
};
pub use futures::stream::{self, StreamExt as _, TryStreamExt as _};
pub use once_cell::sync::Lazy;
pub use rep_counter::{Exercise, ExerciseTracker, Observation, Pose};
pub use semver::{Version, VersionReq};
pub use serde::{de::Error as DeserializeError, Deserialize, Deserializer, Serialize};
pub use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
pub use tracing::{debug, info, info_span, Instrument as _};

pub type Fallible<T> = Result<T, Error>;
