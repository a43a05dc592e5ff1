use crate::GestureError;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which gesture rules a page listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureSet {
    HandsUp,
    Scroll,
    /// Hands-up first, then scroll.
    All,
}

impl GestureSet {
    pub fn includes_hands_up(&self) -> bool {
        matches!(self, GestureSet::HandsUp | GestureSet::All)
    }

    pub fn includes_scroll(&self) -> bool {
        matches!(self, GestureSet::Scroll | GestureSet::All)
    }
}

/// How rules treat a tracked part that was not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Absent parts read as y = 0 (top of frame). An undetected wrist
    /// therefore counts as raised.
    #[default]
    Sentinel,
    /// Any absent part a rule reads makes that rule fail.
    Required,
}

/// Shoulder each wrist is compared against in the scroll-down rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoulderPairing {
    /// Left wrist against left shoulder, right wrist against right shoulder.
    #[default]
    Paired,
    /// Both wrists against the left shoulder when checking scroll-down.
    /// Scroll-up stays paired. Matches the legacy scroll page.
    LeftOnly,
}

/// Pixel thresholds for the scroll rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Lowest y a wrist may have to count as scrolling.
    pub band_lower: f32,
    /// Highest y a wrist may have, relative to its shoulder.
    pub band_upper_offset: f32,
    /// Distance from the shoulder separating down from up.
    pub near_shoulder_tolerance: f32,
    /// Pixels scrolled per qualifying pose.
    pub scroll_delta: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            band_lower: 550.0,
            band_upper_offset: 150.0,
            near_shoulder_tolerance: 50.0,
            scroll_delta: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDimensions {
    pub width: u32,
    pub height: u32,
}

/// Skeleton overlay styling, passed through to whatever draws the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonStyle {
    pub color: String,
    pub line_width: u32,
}

/// Configuration for one gesture-driven page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    video: VideoDimensions,
    style: SkeletonStyle,
    gestures: GestureSet,
    min_part_confidence: f32,
    min_pose_confidence: f32,
    max_pose_detections: usize,
    thresholds: Thresholds,
    presence: Presence,
    shoulder_pairing: ShoulderPairing,
    navigate_target: String,
    fps: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::hands_up_page()
    }
}

impl GestureConfig {
    /// The hands-up page: 480x800 portrait video, blue skeleton.
    pub fn hands_up_page() -> Self {
        Self {
            video: VideoDimensions {
                width: 480,
                height: 800,
            },
            style: SkeletonStyle {
                color: "blue".to_string(),
                line_width: 10,
            },
            gestures: GestureSet::HandsUp,
            min_part_confidence: 0.1,
            min_pose_confidence: 0.15,
            max_pose_detections: 2,
            thresholds: Thresholds::default(),
            presence: Presence::Sentinel,
            shoulder_pairing: ShoulderPairing::Paired,
            navigate_target: "public/nextpage.html".to_string(),
            fps: 30,
        }
    }

    /// The scrolling page: 720x1280 portrait video.
    pub fn scroll_page() -> Self {
        Self {
            video: VideoDimensions {
                width: 720,
                height: 1280,
            },
            style: SkeletonStyle {
                color: "aqua".to_string(),
                line_width: 5,
            },
            gestures: GestureSet::Scroll,
            ..Self::hands_up_page()
        }
    }

    /// Look up a preset by name (`hands-up` or `scroll`).
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hands-up" | "hands_up" | "handsup" => Ok(Self::hands_up_page()),
            "scroll" => Ok(Self::scroll_page()),
            other => Err(GestureError::Config(format!("unknown preset: {other:?}"))),
        }
    }

    /// Parse a JSON config. Missing fields take the hands-up page defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GestureConfig = serde_json::from_str(json)
            .map_err(|e| GestureError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GestureError::Io(format!(
                "Failed to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values no page could run with.
    pub fn validate(&self) -> Result<()> {
        let unit = 0.0f32..=1.0;
        if !unit.contains(&self.min_part_confidence) {
            return Err(GestureError::Config(format!(
                "min_part_confidence must be in [0, 1], got {}",
                self.min_part_confidence
            )));
        }
        if !unit.contains(&self.min_pose_confidence) {
            return Err(GestureError::Config(format!(
                "min_pose_confidence must be in [0, 1], got {}",
                self.min_pose_confidence
            )));
        }
        if self.video.width == 0 || self.video.height == 0 {
            return Err(GestureError::Config(format!(
                "video dimensions must be non-zero, got {}x{}",
                self.video.width, self.video.height
            )));
        }
        if self.max_pose_detections == 0 {
            return Err(GestureError::Config(
                "max_pose_detections must be at least 1".to_string(),
            ));
        }
        if self.fps == 0 {
            return Err(GestureError::Config("fps must be at least 1".to_string()));
        }
        let t = &self.thresholds;
        if !(t.band_lower >= 0.0 && t.band_upper_offset >= 0.0 && t.near_shoulder_tolerance >= 0.0)
        {
            return Err(GestureError::Config(format!(
                "scroll thresholds must be non-negative, got {:?}",
                t
            )));
        }
        if t.scroll_delta < 0 {
            return Err(GestureError::Config(format!(
                "scroll_delta must be non-negative, got {}",
                t.scroll_delta
            )));
        }
        Ok(())
    }

    /// Set the video frame dimensions in pixels.
    pub fn with_video(mut self, width: u32, height: u32) -> Self {
        self.video = VideoDimensions { width, height };
        self
    }

    pub fn with_style(mut self, color: impl Into<String>, line_width: u32) -> Self {
        self.style = SkeletonStyle {
            color: color.into(),
            line_width,
        };
        self
    }

    pub fn with_gestures(mut self, gestures: GestureSet) -> Self {
        self.gestures = gestures;
        self
    }

    /// Set the confidence below which a keypoint counts as undetected.
    pub fn with_min_part_confidence(mut self, confidence: f32) -> Self {
        self.min_part_confidence = confidence;
        self
    }

    /// Set the score below which a whole pose is ignored.
    pub fn with_min_pose_confidence(mut self, confidence: f32) -> Self {
        self.min_pose_confidence = confidence;
        self
    }

    pub fn with_max_pose_detections(mut self, max: usize) -> Self {
        self.max_pose_detections = max;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_presence(mut self, presence: Presence) -> Self {
        self.presence = presence;
        self
    }

    pub fn with_shoulder_pairing(mut self, pairing: ShoulderPairing) -> Self {
        self.shoulder_pairing = pairing;
        self
    }

    /// Set where a hands-up gesture navigates to.
    pub fn with_navigate_target(mut self, target: impl Into<String>) -> Self {
        self.navigate_target = target.into();
        self
    }

    /// Set how many frames per second the gesture loop polls.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    // Getters
    pub fn video(&self) -> VideoDimensions {
        self.video
    }

    pub fn style(&self) -> &SkeletonStyle {
        &self.style
    }

    pub fn gestures(&self) -> GestureSet {
        self.gestures
    }

    pub fn min_part_confidence(&self) -> f32 {
        self.min_part_confidence
    }

    pub fn min_pose_confidence(&self) -> f32 {
        self.min_pose_confidence
    }

    pub fn max_pose_detections(&self) -> usize {
        self.max_pose_detections
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    pub fn shoulder_pairing(&self) -> ShoulderPairing {
        self.shoulder_pairing
    }

    pub fn navigate_target(&self) -> &str {
        &self.navigate_target
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time between two polls of the pose source.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.fps.max(1)
    }
}
