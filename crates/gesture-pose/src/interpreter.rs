use crate::GestureError;
use crate::error::Result;
use crate::classify::{Classifier, Gesture};
use crate::config::GestureConfig;
use crate::effects::{Effect, EffectSink};
use crate::extract::extract;
use crate::types::{Frame, PoseSample};

/// Turns frames of poses into page effects.
///
/// Holds only configuration; every pose is evaluated on its own, so the same
/// frame always produces the same gestures.
#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    classifier: Classifier,
    min_part_confidence: f32,
    min_pose_confidence: f32,
    max_pose_detections: usize,
    navigate_target: String,
    scroll_delta: i32,
}

impl GestureInterpreter {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            classifier: Classifier::new(config),
            min_part_confidence: config.min_part_confidence(),
            min_pose_confidence: config.min_pose_confidence(),
            max_pose_detections: config.max_pose_detections(),
            navigate_target: config.navigate_target().to_string(),
            scroll_delta: config.thresholds().scroll_delta,
        }
    }

    /// Classify a single pose, ignoring its pose-level score.
    pub fn interpret(&self, pose: &PoseSample) -> Gesture {
        let normalized = extract(pose, self.min_part_confidence);
        self.classifier.classify(&normalized)
    }

    /// Classify the frame's poses and apply one effect per pose that made a
    /// gesture.
    ///
    /// Only the first `max_pose_detections` poses the model reported are
    /// considered, and of those the ones scoring below the minimum pose
    /// confidence are skipped. A low-scoring pose therefore still takes one of
    /// the slots. Returns the gesture of each evaluated pose.
    ///
    /// # Errors
    ///
    /// Returns the first error the sink reports; effects for later poses in
    /// the frame are not applied. Use [`evaluate_frame`](Self::evaluate_frame)
    /// to also learn which effects went through before the failure.
    pub fn process_frame(
        &self,
        frame: &Frame,
        sink: &mut impl EffectSink,
    ) -> Result<Vec<Gesture>> {
        self.evaluate_frame(frame, sink).into_result()
    }

    /// Like [`process_frame`](Self::process_frame), but keeps the gestures
    /// whose effects reached the sink when a later effect fails.
    pub fn evaluate_frame(&self, frame: &Frame, sink: &mut impl EffectSink) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        for pose in frame
            .poses
            .iter()
            .take(self.max_pose_detections)
            .filter(|pose| pose.score >= self.min_pose_confidence)
        {
            let gesture = self.interpret(pose);
            if let Some(effect) = Effect::for_gesture(gesture, &self.navigate_target, self.scroll_delta) {
                if let Err(e) = sink.apply(effect) {
                    outcome.error = Some(e);
                    break;
                }
            }
            outcome.gestures.push(gesture);
        }
        outcome
    }
}

/// What one frame did before it finished or the sink failed.
#[derive(Debug, Default)]
pub struct FrameOutcome {
    /// Gesture of every pose that completed, its effect (if any) applied.
    pub gestures: Vec<Gesture>,
    /// The sink error that ended the frame early. The failing pose is not
    /// in `gestures`.
    pub error: Option<GestureError>,
}

impl FrameOutcome {
    pub fn into_result(self) -> Result<Vec<Gesture>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.gestures),
        }
    }
}
