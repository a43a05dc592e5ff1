use crate::GestureError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of body parts in the PoseNet keypoint set
pub const POSENET_PART_COUNT: usize = 17;

/// PoseNet body part names, in PoseNet index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartName {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl PartName {
    pub const ALL: [PartName; POSENET_PART_COUNT] = [
        PartName::Nose,
        PartName::LeftEye,
        PartName::RightEye,
        PartName::LeftEar,
        PartName::RightEar,
        PartName::LeftShoulder,
        PartName::RightShoulder,
        PartName::LeftElbow,
        PartName::RightElbow,
        PartName::LeftWrist,
        PartName::RightWrist,
        PartName::LeftHip,
        PartName::RightHip,
        PartName::LeftKnee,
        PartName::RightKnee,
        PartName::LeftAnkle,
        PartName::RightAnkle,
    ];

    /// The camelCase name the pose model reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartName::Nose => "nose",
            PartName::LeftEye => "leftEye",
            PartName::RightEye => "rightEye",
            PartName::LeftEar => "leftEar",
            PartName::RightEar => "rightEar",
            PartName::LeftShoulder => "leftShoulder",
            PartName::RightShoulder => "rightShoulder",
            PartName::LeftElbow => "leftElbow",
            PartName::RightElbow => "rightElbow",
            PartName::LeftWrist => "leftWrist",
            PartName::RightWrist => "rightWrist",
            PartName::LeftHip => "leftHip",
            PartName::RightHip => "rightHip",
            PartName::LeftKnee => "leftKnee",
            PartName::RightKnee => "rightKnee",
            PartName::LeftAnkle => "leftAnkle",
            PartName::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartName {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartName::ALL
            .iter()
            .copied()
            .find(|part| part.as_str() == s)
            .ok_or_else(|| GestureError::Parse(format!("unknown body part: {s:?}")))
    }
}

impl From<PartName> for usize {
    fn from(part: PartName) -> usize {
        part as usize
    }
}

impl TryFrom<usize> for PartName {
    type Error = GestureError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PartName::ALL.get(value).copied().ok_or_else(|| {
            GestureError::Parse(format!(
                "Invalid part index: {}. Must be in range 0-{}.",
                value,
                POSENET_PART_COUNT - 1
            ))
        })
    }
}

/// Screen-space position in pixels; origin is top-left, so smaller `y` is higher.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single detected body landmark
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: PartName,
    pub position: Position,
    /// Confidence in [0.0, 1.0]. PoseNet calls this field `score`.
    #[serde(alias = "score")]
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(part: PartName, x: f32, y: f32, confidence: f32) -> Self {
        Self {
            part,
            position: Position::new(x, y),
            confidence,
        }
    }
}

fn full_score() -> f32 {
    1.0
}

/// All keypoints for one detected person in one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Pose-level confidence reported by the model
    #[serde(default = "full_score")]
    pub score: f32,
    /// Keypoints naming a part outside the PoseNet set are dropped on load.
    #[serde(default, deserialize_with = "known_keypoints")]
    pub keypoints: Vec<Keypoint>,
}

fn known_keypoints<'de, D>(deserializer: D) -> Result<Vec<Keypoint>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct RawKeypoint {
        part: String,
        position: Position,
        #[serde(alias = "score")]
        confidence: f32,
    }

    let raw = Vec::<RawKeypoint>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|kp| match kp.part.parse::<PartName>() {
            Ok(part) => Some(Keypoint {
                part,
                position: kp.position,
                confidence: kp.confidence,
            }),
            Err(_) => {
                log::debug!("skipping keypoint for unknown part {:?}", kp.part);
                None
            }
        })
        .collect())
}

impl PoseSample {
    /// A pose with full confidence.
    pub fn new(keypoints: Vec<Keypoint>) -> Self {
        Self {
            score: 1.0,
            keypoints,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }
}

/// Every pose the model produced for one video frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    pub poses: Vec<PoseSample>,
}

impl Frame {
    pub fn new(poses: Vec<PoseSample>) -> Self {
        Self { poses }
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

impl From<Vec<PoseSample>> for Frame {
    fn from(poses: Vec<PoseSample>) -> Self {
        Self { poses }
    }
}
