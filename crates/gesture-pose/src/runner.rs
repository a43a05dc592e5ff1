use crate::GestureError;
use crate::error::Result;
use crate::classify::Gesture;
use crate::effects::EffectSink;
use crate::interpreter::GestureInterpreter;
use crate::source::PoseSource;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Counters collected by a gesture loop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: usize,
    pub poses_evaluated: usize,
    pub gestures: HashMap<Gesture, usize>,
    pub source_errors: usize,
    pub effect_errors: usize,
}

impl RunStats {
    /// How many evaluated poses produced `gesture`.
    pub fn count(&self, gesture: Gesture) -> usize {
        self.gestures.get(&gesture).copied().unwrap_or(0)
    }

    /// Poses that produced an effect.
    pub fn effects(&self) -> usize {
        self.gestures
            .iter()
            .filter(|(gesture, _)| **gesture != Gesture::None)
            .map(|(_, count)| count)
            .sum()
    }

    fn record(&mut self, gestures: &[Gesture]) {
        self.poses_evaluated += gestures.len();
        for gesture in gestures {
            *self.gestures.entry(*gesture).or_insert(0) += 1;
        }
    }
}

/// Background task polling a pose source at a fixed rate.
///
/// Each tick receives one frame, classifies it and applies the resulting
/// effects. The loop ends when the source closes or `stop` is called.
/// Dropping the handle aborts the task.
pub struct GestureLoop<K> {
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<(RunStats, K)>>,
}

impl<K> std::fmt::Debug for GestureLoop<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureLoop")
            .field("stop_tx", &self.stop_tx.is_some())
            .field("task", &self.task.is_some())
            .finish()
    }
}

impl<K> GestureLoop<K>
where
    K: EffectSink + Send + 'static,
{
    /// Start polling `source` every `period`.
    ///
    /// # Errors
    ///
    /// Returns `GestureError::Config` if `period` is zero.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime context.
    pub fn spawn<S>(
        source: S,
        sink: K,
        interpreter: GestureInterpreter,
        period: Duration,
    ) -> Result<Self>
    where
        S: PoseSource + Send + 'static,
    {
        if period.is_zero() {
            return Err(GestureError::Config(
                "gesture loop period must be non-zero".to_string(),
            ));
        }
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run(source, sink, interpreter, period, stop_rx));
        Ok(Self {
            stop_tx: Some(stop_tx),
            task: Some(task),
        })
    }

    /// Whether the loop has ended on its own (source closed).
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Cancel the loop and return its stats and sink.
    ///
    /// A frame already being processed finishes first.
    pub async fn stop(mut self) -> Result<(RunStats, K)> {
        if let Some(stop_tx) = self.stop_tx.take() {
            // The task may have ended already; then nobody is listening.
            let _ = stop_tx.send(());
        }
        self.finish().await
    }

    /// Wait for the source to close and return the stats and sink.
    pub async fn join(mut self) -> Result<(RunStats, K)> {
        // Keep stop_tx alive so the loop is not cancelled while waiting.
        let _stop_tx = self.stop_tx.take();
        self.finish().await
    }

    async fn finish(&mut self) -> Result<(RunStats, K)> {
        let task = self
            .task
            .take()
            .ok_or_else(|| GestureError::Runtime("gesture loop already finished".to_string()))?;
        Ok(task.await?)
    }
}

impl<K> Drop for GestureLoop<K> {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

async fn run<S, K>(
    mut source: S,
    mut sink: K,
    interpreter: GestureInterpreter,
    period: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) -> (RunStats, K)
where
    S: PoseSource,
    K: EffectSink,
{
    let mut stats = RunStats::default();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    log::info!("gesture loop started, period {:?}", period);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            _ = ticker.tick() => {}
        }

        let received = tokio::select! {
            biased;
            _ = &mut stop_rx => break,
            received = source.recv() => received,
        };

        let frame = match received {
            Ok(frame) => frame,
            Err(GestureError::SourceClosed) => {
                log::info!("pose source closed");
                break;
            }
            Err(e) => {
                log::warn!("Failed to receive frame: {}", e);
                stats.source_errors += 1;
                continue;
            }
        };

        stats.frames += 1;
        let outcome = interpreter.evaluate_frame(&frame, &mut sink);
        stats.record(&outcome.gestures);
        if let Some(e) = outcome.error {
            log::warn!("Failed to apply effect: {}", e);
            stats.effect_errors += 1;
        }
    }

    log::info!(
        "gesture loop finished: {} frames, {} poses, {} effects",
        stats.frames,
        stats.poses_evaluated,
        stats.effects()
    );
    (stats, sink)
}
