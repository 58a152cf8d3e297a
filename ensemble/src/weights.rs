use crate::{common::*, detection::ModelId, error::EnsembleError};

/// Per-model vote multipliers. Models without an entry weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfidenceWeights {
    weights: IndexMap<ModelId, f64>,
}

impl ConfidenceWeights {
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Weights tuned for the three food detection models: the generic
    /// `yolo11s`, the food-trained `best`, and `best_friged` trained on
    /// refrigerator photos.
    pub fn food_models() -> Self {
        [("yolo11s", 1.0), ("best", 1.2), ("best_friged", 1.1)]
            .into_iter()
            .map(|(model, weight)| (ModelId::from(model), weight))
            .collect::<IndexMap<_, _>>()
            .try_into()
            .unwrap_or_default()
    }

    pub fn insert(&mut self, model: impl Into<ModelId>, weight: f64) -> Result<(), EnsembleError> {
        let model = model.into();
        if !(weight.is_finite() && weight > 0.0) {
            return Err(EnsembleError::InvalidWeight { model, weight });
        }
        self.weights.insert(model, weight);
        Ok(())
    }

    pub fn with(mut self, model: impl Into<ModelId>, weight: f64) -> Result<Self, EnsembleError> {
        self.insert(model, weight)?;
        Ok(self)
    }

    pub fn get(&self, model: &str) -> f64 {
        self.weights
            .get(model)
            .copied()
            .unwrap_or(Self::DEFAULT_WEIGHT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModelId, f64)> + '_ {
        self.weights.iter().map(|(model, &weight)| (model, weight))
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl TryFrom<IndexMap<ModelId, f64>> for ConfidenceWeights {
    type Error = EnsembleError;

    fn try_from(weights: IndexMap<ModelId, f64>) -> Result<Self, Self::Error> {
        weights
            .into_iter()
            .try_fold(Self::new(), |weights, (model, weight)| {
                weights.with(model, weight)
            })
    }
}

impl<'de> Deserialize<'de> for ConfidenceWeights {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let weights = IndexMap::<ModelId, f64>::deserialize(deserializer)?;
        weights.try_into().map_err(D::Error::custom)
    }
}
