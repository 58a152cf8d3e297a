//! Upstream detectors feeding the ensemble.

use crate::{
    common::*,
    detection::{Detection, ModelId, ModelResultSet},
};
use anyhow::{format_err, Result};
use std::collections::HashMap;

/// A model that detects objects in an image.
pub trait DetectionSource: Send + Sync {
    fn model_id(&self) -> &ModelId;

    fn detect(&self, image: &Path) -> Result<Vec<Detection>>;
}

/// The set of detection models, loaded once and shared by every request.
#[derive(Default)]
pub struct DetectionSources {
    sources: Vec<Box<dyn DetectionSource>>,
}

impl DetectionSources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<S>(&mut self, source: S)
    where
        S: DetectionSource + 'static,
    {
        self.sources.push(Box::new(source));
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelId> + '_ {
        self.sources.iter().map(|source| source.model_id())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Run every model on `image`.
    ///
    /// A model that fails is reported and contributes an empty list, so it
    /// still takes part in weight normalization.
    pub fn detect(&self, image: &Path) -> ModelResultSet {
        let mut results = ModelResultSet::new();

        for source in &self.sources {
            let model = source.model_id();
            let detections = match source.detect(image) {
                Ok(detections) => {
                    debug!(
                        "{} found {} objects in '{}'",
                        model,
                        detections.len(),
                        image.display()
                    );
                    detections
                }
                Err(err) => {
                    warn!("{} failed on '{}': {:#}", model, image.display(), err);
                    vec![]
                }
            };
            results.insert(model.clone(), detections);
        }

        results
    }
}

impl fmt::Debug for DetectionSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.models()).finish()
    }
}

/// Replays detections recorded earlier, keyed by image path.
#[derive(Debug, Clone)]
pub struct RecordedSource {
    model: ModelId,
    records: HashMap<PathBuf, Vec<Detection>>,
}

impl RecordedSource {
    pub fn new(model: impl Into<ModelId>) -> Self {
        Self {
            model: model.into(),
            records: HashMap::new(),
        }
    }

    pub fn record<P>(&mut self, image: P, detections: Vec<Detection>)
    where
        P: Into<PathBuf>,
    {
        self.records.insert(image.into(), detections);
    }
}

impl DetectionSource for RecordedSource {
    fn model_id(&self) -> &ModelId {
        &self.model
    }

    fn detect(&self, image: &Path) -> Result<Vec<Detection>> {
        self.records.get(image).cloned().ok_or_else(|| {
            format_err!(
                "no detections recorded for '{}' by {}",
                image.display(),
                self.model
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_source_contributes_empty_list() {
        let apple = Detection::new("best", [0.0, 0.0, 10.0, 10.0], "apple", 0.9).unwrap();

        let mut best = RecordedSource::new("best");
        best.record("fridge.jpg", vec![apple]);
        let yolo = RecordedSource::new("yolo11s");

        let mut sources = DetectionSources::new();
        sources.push(best);
        sources.push(yolo);

        let results = sources.detect(Path::new("fridge.jpg"));
        assert_eq!(results.num_models(), 2);
        assert_eq!(results.get("best").map(<[_]>::len), Some(1));
        assert_eq!(results.get("yolo11s").map(<[_]>::len), Some(0));
    }
}
