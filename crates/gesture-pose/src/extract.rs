use crate::types::{PartName, PoseSample};

/// Body parts the gesture rules read
pub const TRACKED_PARTS: [PartName; 5] = [
    PartName::Nose,
    PartName::LeftWrist,
    PartName::RightWrist,
    PartName::LeftShoulder,
    PartName::RightShoulder,
];

/// Vertical coordinates of the tracked parts for one pose.
///
/// Each part is either present with its `y` or absent (never detected, or
/// detected below the minimum confidence). `y()` reads an absent part as `0.0`,
/// which is indistinguishable from a part at the very top of the frame; use
/// `get()` when the difference matters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NormalizedPose {
    ys: [Option<f32>; TRACKED_PARTS.len()],
}

impl NormalizedPose {
    /// Build a pose from explicit per-part values. Untracked parts are ignored.
    pub fn from_parts(parts: &[(PartName, f32)]) -> Self {
        let mut pose = Self::default();
        for &(part, y) in parts {
            if let Some(slot) = slot(part) {
                pose.ys[slot] = Some(y);
            }
        }
        pose
    }

    /// Vertical coordinate, `None` if the part is absent or untracked.
    pub fn get(&self, part: PartName) -> Option<f32> {
        slot(part).and_then(|slot| self.ys[slot])
    }

    /// Vertical coordinate with absent parts reading as `0.0`.
    pub fn y(&self, part: PartName) -> f32 {
        self.get(part).unwrap_or(0.0)
    }

    pub fn is_present(&self, part: PartName) -> bool {
        self.get(part).is_some()
    }
}

fn slot(part: PartName) -> Option<usize> {
    TRACKED_PARTS.iter().position(|&tracked| tracked == part)
}

/// Reduce a pose to the tracked parts' vertical coordinates.
///
/// When a part appears more than once the last keypoint wins, even if an
/// earlier duplicate had higher confidence. A winning keypoint with
/// `confidence < min_confidence` leaves the part absent.
pub fn extract(pose: &PoseSample, min_confidence: f32) -> NormalizedPose {
    let mut latest = [None; TRACKED_PARTS.len()];
    for keypoint in &pose.keypoints {
        if let Some(slot) = slot(keypoint.part) {
            latest[slot] = Some(keypoint);
        }
    }

    let mut normalized = NormalizedPose::default();
    for (value, keypoint) in normalized.ys.iter_mut().zip(latest) {
        *value = keypoint
            .filter(|kp| kp.confidence >= min_confidence)
            .map(|kp| kp.position.y);
    }
    normalized
}
