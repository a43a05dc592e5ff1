use crate::GestureError;
use crate::error::Result;
use crate::types::Frame;
use std::collections::VecDeque;
use std::future::Future;
use std::path::Path;
use tokio::sync::mpsc;

/// Async source of pose frames.
///
/// Implementations wrap the pose model: each `recv` resolves to every pose
/// detected in the next video frame. `GestureError::SourceClosed` signals that
/// no more frames will arrive.
pub trait PoseSource {
    /// Receive the poses of the next frame.
    fn recv(&mut self) -> impl Future<Output = Result<Frame>> + Send;
}

/// Plays back recorded frames.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    frames: VecDeque<Frame>,
    recorded: Vec<Frame>,
    looping: bool,
}

impl ReplaySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.iter().cloned().collect(),
            recorded: frames,
            looping: false,
        }
    }

    /// Restart from the first frame instead of closing at the end.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Parse a JSON array of frames, each frame an array of PoseNet poses:
    /// `[[{"score": 0.9, "keypoints": [{"part": "nose", "position": {"x": 1, "y": 2}, "score": 0.8}]}]]`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let frames: Vec<Frame> = serde_json::from_str(json)
            .map_err(|e| GestureError::Parse(format!("Failed to parse pose frames: {}", e)))?;
        Ok(Self::new(frames))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GestureError::Io(format!(
                "Failed to read pose frames {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }

    /// Frames left before the source closes (or wraps, when looping).
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    fn next_frame(&mut self) -> Result<Frame> {
        if self.frames.is_empty() && self.looping {
            self.frames.extend(self.recorded.iter().cloned());
        }
        self.frames.pop_front().ok_or(GestureError::SourceClosed)
    }
}

impl PoseSource for ReplaySource {
    async fn recv(&mut self) -> Result<Frame> {
        self.next_frame()
    }
}

/// Frames pushed in by a pose model running elsewhere.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::Receiver<Frame>,
}

impl ChannelSource {
    /// Create a source and the sender the model pushes frames into.
    pub fn new(buffer: usize) -> (mpsc::Sender<Frame>, Self) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (sender, Self { receiver })
    }
}

impl From<mpsc::Receiver<Frame>> for ChannelSource {
    fn from(receiver: mpsc::Receiver<Frame>) -> Self {
        Self { receiver }
    }
}

impl PoseSource for ChannelSource {
    async fn recv(&mut self) -> Result<Frame> {
        self.receiver.recv().await.ok_or(GestureError::SourceClosed)
    }
}
