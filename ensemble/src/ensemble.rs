use crate::{
    common::*,
    consensus::{weighted_average_box, BoxPolicy, ConsensusDetection},
    detection::{Detection, ModelResultSet},
    error::EnsembleError,
    weights::ConfidenceWeights,
};

/// Ensemble parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleInit {
    /// Same-class boxes whose IoU with a group anchor reaches this value join
    /// the group. Must be in (0, 1].
    pub iou_threshold: f64,
    /// Detections below this confidence are dropped before grouping.
    pub min_confidence: f64,
    pub box_policy: BoxPolicy,
    pub weights: ConfidenceWeights,
}

impl Default for EnsembleInit {
    fn default() -> Self {
        Self {
            iou_threshold: 0.5,
            min_confidence: 0.0,
            box_policy: BoxPolicy::Anchor,
            weights: ConfidenceWeights::new(),
        }
    }
}

impl EnsembleInit {
    pub fn build(self) -> Result<EnsembleDetector, EnsembleError> {
        let Self {
            iou_threshold,
            min_confidence,
            box_policy,
            weights,
        } = self;

        if !(iou_threshold > 0.0 && iou_threshold <= 1.0) {
            return Err(EnsembleError::InvalidIouThreshold(iou_threshold));
        }
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(EnsembleError::InvalidMinConfidence(min_confidence));
        }

        Ok(EnsembleDetector {
            iou_threshold,
            min_confidence,
            box_policy,
            weights,
        })
    }
}

/// Merges per-model detections into consensus detections.
///
/// The detector holds no mutable state. One instance can serve any number of
/// images from any number of threads.
#[derive(Debug, Clone)]
pub struct EnsembleDetector {
    iou_threshold: f64,
    min_confidence: f64,
    box_policy: BoxPolicy,
    weights: ConfidenceWeights,
}

impl EnsembleDetector {
    pub fn iou_threshold(&self) -> f64 {
        self.iou_threshold
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    pub fn box_policy(&self) -> BoxPolicy {
        self.box_policy
    }

    pub fn weights(&self) -> &ConfidenceWeights {
        &self.weights
    }

    /// Group the detections of all models and rank the groups by weighted
    /// confidence, highest first.
    ///
    /// Detections are visited in descending confidence. Each detection not
    /// yet grouped opens a group as its anchor and absorbs every later
    /// ungrouped detection of the same class whose IoU with the anchor box is
    /// at least the threshold. The anchor is never replaced, so members are
    /// only guaranteed to overlap the anchor, not each other.
    pub fn merge(&self, results: &ModelResultSet) -> Result<Vec<ConsensusDetection>, EnsembleError> {
        for (_, detections) in results.iter() {
            detections
                .iter()
                .enumerate()
                .try_for_each(|(index, detection)| detection.validate(Some(index)))?;
        }

        // every model present votes in the denominator, even an empty one
        let total_weight: f64 = results
            .models()
            .map(|model| self.weights.get(model.as_str()))
            .sum();

        let mut candidates: Vec<&Detection> = results
            .detections()
            .filter(|detection| detection.confidence >= self.min_confidence)
            .collect();
        // stable, so ties keep model order
        candidates.sort_by_cached_key(|detection| -r64(detection.confidence));

        let num_candidates = candidates.len();
        let mut grouped = vec![false; num_candidates];
        let mut groups = vec![];

        for anchor_index in 0..num_candidates {
            if grouped[anchor_index] {
                continue;
            }
            grouped[anchor_index] = true;

            let anchor = candidates[anchor_index];
            let mut members = vec![anchor];

            for other_index in (anchor_index + 1)..num_candidates {
                if grouped[other_index] {
                    continue;
                }
                let other = candidates[other_index];

                let matched = anchor
                    .label
                    .class_iou_with(&other.label)
                    .map_or(false, |iou| iou >= self.iou_threshold);

                if matched {
                    trace!(
                        "{} '{}' joins the group anchored by {}",
                        other.source_model,
                        other.label.class,
                        anchor.source_model
                    );
                    grouped[other_index] = true;
                    members.push(other);
                }
            }

            groups.push(self.close_group(members, total_weight));
        }

        groups.sort_by_cached_key(|group| -r64(group.weighted_confidence));

        debug!(
            "merged {} detections from {} models into {} groups ({} consensus)",
            num_candidates,
            results.num_models(),
            groups.len(),
            groups.iter().filter(|group| group.is_consensus).count()
        );

        Ok(groups)
    }

    fn close_group(&self, members: Vec<&Detection>, total_weight: f64) -> ConsensusDetection {
        let anchor = members[0];

        let votes: Vec<f64> = members
            .iter()
            .map(|member| member.confidence * self.weights.get(member.source_model.as_str()))
            .collect();
        let weighted_confidence = votes.iter().sum::<f64>() / total_weight;

        let contributing_models: IndexSet<_> = members
            .iter()
            .map(|member| member.source_model.clone())
            .collect();
        let is_consensus = contributing_models.len() > 1;

        let bbox = match self.box_policy {
            BoxPolicy::Anchor => anchor.label.rect,
            BoxPolicy::WeightedAverage => {
                let rects = members.iter().map(|member| &member.label.rect);
                weighted_average_box(izip!(rects, votes.iter().copied()))
                    .unwrap_or(anchor.label.rect)
            }
        };

        ConsensusDetection {
            bbox,
            class_label: anchor.label.class.clone(),
            weighted_confidence,
            contributing_models,
            is_consensus,
            members: members.into_iter().cloned().collect(),
        }
    }
}
