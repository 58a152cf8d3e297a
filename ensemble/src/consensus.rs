use crate::{common::*, detection::Detection, detection::ModelId};

/// A group of detections judged to be the same object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsensusDetection {
    /// Representative box of the group.
    pub bbox: TLBR<f64>,
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(rename = "confidence")]
    pub weighted_confidence: f64,
    /// Models that contributed a box, in the order they joined the group.
    pub contributing_models: IndexSet<ModelId>,
    pub is_consensus: bool,
    /// Grouped detections, anchor first.
    #[serde(skip)]
    pub members: Vec<Detection>,
}

impl ConsensusDetection {
    /// The highest-confidence member that opened the group.
    pub fn anchor(&self) -> &Detection {
        &self.members[0]
    }

    pub fn num_votes(&self) -> usize {
        self.members.len()
    }
}

/// How the representative box of a group is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxPolicy {
    /// The box of the anchor, i.e. the highest-confidence member.
    Anchor,
    /// Average of member boxes weighted by confidence times model weight.
    WeightedAverage,
}

impl Default for BoxPolicy {
    fn default() -> Self {
        Self::Anchor
    }
}

/// Confidence-weighted mean of `[x1, y1, x2, y2]` corners. Falls back to the
/// first box when every vote is zero.
pub(crate) fn weighted_average_box<'a, I>(votes: I) -> Option<TLBR<f64>>
where
    I: IntoIterator<Item = (&'a TLBR<f64>, f64)>,
{
    let mut first = None;
    let mut total = 0.0;
    let mut sum = [0.0; 4];

    for (rect, vote) in votes {
        first.get_or_insert(*rect);
        total += vote;
        izip!(&mut sum, rect.xyxy()).for_each(|(acc, value)| *acc += value * vote);
    }

    let first = first?;
    if total <= 0.0 {
        return Some(first);
    }

    let xyxy = sum.map(|value| value / total);
    Some(TLBR::try_from_xyxy(xyxy).unwrap_or(first))
}
