use crate::config::{GestureConfig, GestureSet, Presence, ShoulderPairing, Thresholds};
use crate::extract::NormalizedPose;
use crate::types::PartName;

/// Gesture recognized in a single pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    HandsUp,
    ScrollDown,
    ScrollUp,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Down,
    Up,
    None,
}

impl From<ScrollDirection> for Gesture {
    fn from(direction: ScrollDirection) -> Self {
        match direction {
            ScrollDirection::Down => Gesture::ScrollDown,
            ScrollDirection::Up => Gesture::ScrollUp,
            ScrollDirection::None => Gesture::None,
        }
    }
}

/// Both wrists strictly above the nose, with absent parts reading as y = 0.
pub fn classify_hands_up(pose: &NormalizedPose) -> bool {
    Classifier::sentinel(0.0).hands_up(pose)
}

/// Scroll rule with the default thresholds and paired shoulders.
pub fn classify_scroll(pose: &NormalizedPose, video_height: f32) -> ScrollDirection {
    Classifier::sentinel(video_height).scroll(pose)
}

/// Stateless gesture rules for one page configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    gestures: GestureSet,
    thresholds: Thresholds,
    presence: Presence,
    shoulder_pairing: ShoulderPairing,
    video_height: f32,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn wrist(self) -> PartName {
        match self {
            Side::Left => PartName::LeftWrist,
            Side::Right => PartName::RightWrist,
        }
    }

    fn shoulder(self) -> PartName {
        match self {
            Side::Left => PartName::LeftShoulder,
            Side::Right => PartName::RightShoulder,
        }
    }
}

impl Classifier {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            gestures: config.gestures(),
            thresholds: config.thresholds(),
            presence: config.presence(),
            shoulder_pairing: config.shoulder_pairing(),
            video_height: config.video().height as f32,
        }
    }

    fn sentinel(video_height: f32) -> Self {
        Self {
            gestures: GestureSet::All,
            thresholds: Thresholds::default(),
            presence: Presence::Sentinel,
            shoulder_pairing: ShoulderPairing::Paired,
            video_height,
        }
    }

    pub fn with_video_height(mut self, video_height: f32) -> Self {
        self.video_height = video_height;
        self
    }

    /// Run the enabled rules in order: hands-up, then scroll.
    pub fn classify(&self, pose: &NormalizedPose) -> Gesture {
        if self.gestures.includes_hands_up() && self.hands_up(pose) {
            return Gesture::HandsUp;
        }
        if self.gestures.includes_scroll() {
            return self.scroll(pose).into();
        }
        Gesture::None
    }

    pub fn hands_up(&self, pose: &NormalizedPose) -> bool {
        let (Some(nose), Some(left), Some(right)) = (
            self.read(pose, PartName::Nose),
            self.read(pose, PartName::LeftWrist),
            self.read(pose, PartName::RightWrist),
        ) else {
            return false;
        };
        let raised = nose > left && nose > right;
        if raised {
            log::debug!(
                "hands up: nose={} left_wrist={} right_wrist={}",
                nose,
                left,
                right
            );
        }
        raised
    }

    /// Down is checked first and wins when both rules hold.
    pub fn scroll(&self, pose: &NormalizedPose) -> ScrollDirection {
        let down_shoulder = |side: Side| match self.shoulder_pairing {
            ShoulderPairing::Paired => side.shoulder(),
            ShoulderPairing::LeftOnly => PartName::LeftShoulder,
        };
        let tolerance = self.thresholds.near_shoulder_tolerance;

        let down = [Side::Left, Side::Right].into_iter().any(|side| {
            self.wrist_in_band(pose, side.wrist(), down_shoulder(side), |wrist, shoulder| {
                wrist < shoulder + tolerance
            })
        });
        if down {
            return ScrollDirection::Down;
        }

        let up = [Side::Left, Side::Right].into_iter().any(|side| {
            self.wrist_in_band(pose, side.wrist(), side.shoulder(), |wrist, shoulder| {
                wrist > shoulder - tolerance
            })
        });
        if up {
            return ScrollDirection::Up;
        }

        ScrollDirection::None
    }

    fn wrist_in_band(
        &self,
        pose: &NormalizedPose,
        wrist: PartName,
        shoulder: PartName,
        near_shoulder: impl Fn(f32, f32) -> bool,
    ) -> bool {
        let (Some(wrist_y), Some(shoulder_y)) = (self.read(pose, wrist), self.read(pose, shoulder))
        else {
            return false;
        };
        near_shoulder(wrist_y, shoulder_y)
            && wrist_y < self.video_height
            && wrist_y >= self.thresholds.band_lower
            && wrist_y <= shoulder_y + self.thresholds.band_upper_offset
    }

    fn read(&self, pose: &NormalizedPose, part: PartName) -> Option<f32> {
        match self.presence {
            Presence::Sentinel => Some(pose.y(part)),
            Presence::Required => pose.get(part),
        }
    }
}
