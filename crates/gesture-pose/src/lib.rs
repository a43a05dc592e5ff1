//! Gesture recognition over per-frame pose estimates.
//!
//! A pose model (outside this crate) reports keypoints for every person in a
//! video frame. Each pose is reduced to the vertical positions of the nose,
//! wrists and shoulders, classified against fixed pixel thresholds, and the
//! resulting gesture is turned into a page effect: navigate on hands-up,
//! scroll on a wrist held near the shoulder.

pub mod classify;
pub mod config;
pub mod effects;
pub mod error;
pub mod extract;
pub mod interpreter;
pub mod runner;
pub mod source;
pub mod types;

pub use classify::{Classifier, Gesture, ScrollDirection, classify_hands_up, classify_scroll};
pub use config::{
    GestureConfig, GestureSet, Presence, ShoulderPairing, SkeletonStyle, Thresholds,
    VideoDimensions,
};
pub use effects::{Effect, EffectSink, LoggingSink, PageState};
pub use error::GestureError;
pub use extract::{NormalizedPose, TRACKED_PARTS, extract};
pub use interpreter::{FrameOutcome, GestureInterpreter};
pub use runner::{GestureLoop, RunStats};
pub use source::{ChannelSource, PoseSource, ReplaySource};
pub use types::{Frame, Keypoint, POSENET_PART_COUNT, PartName, PoseSample, Position};
