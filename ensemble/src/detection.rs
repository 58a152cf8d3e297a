use crate::{common::*, error::EnsembleError};

/// Identifier of a detection model, e.g. `yolo11s`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModelId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModelId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// One object observed by one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(flatten)]
    pub label: Label<TLBR<f64>, String>,
    pub confidence: f64,
    pub source_model: ModelId,
}

impl Detection {
    /// Build a detection from `[x1, y1, x2, y2]` pixel corners.
    pub fn new(
        source_model: impl Into<ModelId>,
        xyxy: [f64; 4],
        class: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, EnsembleError> {
        let source_model = source_model.into();
        let rect = TLBR::try_from_xyxy(xyxy).map_err(|_| EnsembleError::MalformedBox {
            model: source_model.clone(),
            index: None,
            xyxy,
        })?;
        let detection = Self {
            label: Label::new(rect, class.into()),
            confidence,
            source_model,
        };
        detection.validate(None)?;
        Ok(detection)
    }

    pub fn bbox(&self) -> &TLBR<f64> {
        &self.label.rect
    }

    pub fn class_label(&self) -> &str {
        &self.label.class
    }

    /// Reject confidences outside `[0, 1]` and boxes that are not strictly
    /// positive in width and height.
    pub(crate) fn validate(&self, index: Option<usize>) -> Result<(), EnsembleError> {
        let Self {
            ref label,
            confidence,
            ref source_model,
        } = *self;

        if !(0.0..=1.0).contains(&confidence) {
            return Err(EnsembleError::InvalidConfidence {
                model: source_model.clone(),
                index,
                confidence,
            });
        }

        let xyxy = label.rect.xyxy();
        let [x1, y1, x2, y2] = xyxy;
        let finite = xyxy.iter().all(|value| value.is_finite());
        if !(finite && x1 < x2 && y1 < y2) {
            return Err(EnsembleError::MalformedBox {
                model: source_model.clone(),
                index,
                xyxy,
            });
        }

        Ok(())
    }
}

/// A detection as emitted by a single model, before it is attributed to the
/// model that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ModelOutput {
    bbox: TLBR<f64>,
    class: String,
    confidence: f64,
}

/// Per-model detections for one image.
///
/// Models keep their insertion order. Every stored detection carries the id
/// of the model it is filed under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResultSet {
    results: IndexMap<ModelId, Vec<Detection>>,
}

impl ModelResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `detections` under `model`, overwriting their `source_model`.
    ///
    /// Inserting the same model twice appends to its list.
    pub fn insert<I>(&mut self, model: impl Into<ModelId>, detections: I)
    where
        I: IntoIterator<Item = Detection>,
    {
        let model = model.into();
        let entry = self.results.entry(model.clone()).or_default();
        entry.extend(detections.into_iter().map(|mut detection| {
            detection.source_model = model.clone();
            detection
        }));
    }

    pub fn with<I>(mut self, model: impl Into<ModelId>, detections: I) -> Self
    where
        I: IntoIterator<Item = Detection>,
    {
        self.insert(model, detections);
        self
    }

    pub fn get(&self, model: &str) -> Option<&[Detection]> {
        self.results.get(model).map(Vec::as_slice)
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelId> + '_ {
        self.results.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModelId, &[Detection])> + '_ {
        self.results
            .iter()
            .map(|(model, detections)| (model, detections.as_slice()))
    }

    /// All detections, model by model.
    pub fn detections(&self) -> impl Iterator<Item = &Detection> + '_ {
        self.results.values().flatten()
    }

    pub fn num_models(&self) -> usize {
        self.results.len()
    }

    pub fn num_detections(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<M, I> FromIterator<(M, I)> for ModelResultSet
where
    M: Into<ModelId>,
    I: IntoIterator<Item = Detection>,
{
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (M, I)>,
    {
        let mut set = Self::new();
        iter.into_iter()
            .for_each(|(model, detections)| set.insert(model, detections));
        set
    }
}

impl Serialize for ModelResultSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let outputs: IndexMap<&ModelId, Vec<ModelOutput>> = self
            .results
            .iter()
            .map(|(model, detections)| {
                let outputs = detections
                    .iter()
                    .map(|detection| ModelOutput {
                        bbox: detection.label.rect,
                        class: detection.label.class.clone(),
                        confidence: detection.confidence,
                    })
                    .collect();
                (model, outputs)
            })
            .collect();
        outputs.serialize(serializer)
    }
}

/// Deserialized from a `model -> [{bbox, class, confidence}]` map.
impl<'de> Deserialize<'de> for ModelResultSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let outputs = IndexMap::<ModelId, Vec<ModelOutput>>::deserialize(deserializer)?;
        let results = outputs
            .into_iter()
            .map(|(model, outputs)| {
                let detections: Vec<_> = outputs
                    .into_iter()
                    .map(|output| Detection {
                        label: Label::new(output.bbox, output.class),
                        confidence: output.confidence,
                        source_model: model.clone(),
                    })
                    .collect();
                (model, detections)
            })
            .collect();
        Ok(Self { results })
    }
}
