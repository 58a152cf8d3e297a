use crate::{common::*, error::RepCounterError};

/// Landmark indices of the 33-point MediaPipe pose topology.
pub mod landmark {
    pub const NOSE: usize = 0;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;

    pub const NUM_LANDMARKS: usize = 33;
}

/// A body keypoint in normalized image coordinates. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility: 1.0,
        }
    }

    pub fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Landmarks of one person in one frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pose {
    landmarks: Vec<Landmark>,
}

impl Pose {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmark(&self, index: usize) -> Result<&Landmark, RepCounterError> {
        self.landmarks
            .get(index)
            .ok_or(RepCounterError::MissingLandmark {
                index,
                len: self.landmarks.len(),
            })
    }

    pub fn xy(&self, index: usize) -> Result<[f64; 2], RepCounterError> {
        Ok(self.landmark(index)?.xy())
    }

    /// Exponential smoothing against the previous frame:
    /// `alpha * prev + (1 - alpha) * self`. Visibility is taken from the
    /// current frame. Landmarks missing from `prev` are kept as they are.
    pub fn smooth(&self, prev: &Pose, alpha: f64) -> Self {
        let landmarks = self
            .landmarks
            .iter()
            .enumerate()
            .map(|(index, cur)| match prev.landmarks.get(index) {
                Some(prev) => Landmark {
                    x: alpha * prev.x + (1.0 - alpha) * cur.x,
                    y: alpha * prev.y + (1.0 - alpha) * cur.y,
                    z: alpha * prev.z + (1.0 - alpha) * cur.z,
                    visibility: cur.visibility,
                },
                None => *cur,
            })
            .collect();
        Self { landmarks }
    }
}

impl FromIterator<Landmark> for Pose {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Landmark>,
    {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn missing_landmark_is_reported() {
        let pose: Pose = (0..12).map(|_| Landmark::new(0.5, 0.5)).collect();
        assert!(pose.landmark(landmark::LEFT_SHOULDER).is_ok());
        assert_eq!(
            pose.landmark(landmark::LEFT_HIP),
            Err(RepCounterError::MissingLandmark { index: 23, len: 12 })
        );
    }

    #[test]
    fn smoothing_blends_with_previous_frame() {
        let prev = Pose::new(vec![Landmark::new(0.0, 1.0)]);
        let cur = Pose::new(vec![
            Landmark {
                visibility: 0.3,
                ..Landmark::new(1.0, 0.0)
            },
            Landmark::new(0.2, 0.2),
        ]);

        let smoothed = cur.smooth(&prev, 0.7);
        let first = smoothed.landmarks()[0];
        assert_abs_diff_eq!(first.x, 0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(first.y, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(first.visibility, 0.3);
        assert_eq!(smoothed.landmarks()[1], Landmark::new(0.2, 0.2));
    }

    #[test]
    fn pose_from_json() {
        let pose: Pose = serde_json::from_str(r#"[{"x": 0.1, "y": 0.2, "visibility": 0.9}]"#).unwrap();
        assert_eq!(pose.xy(0).unwrap(), [0.1, 0.2]);
        assert_eq!(pose.landmarks()[0].z, 0.0);
    }
}
