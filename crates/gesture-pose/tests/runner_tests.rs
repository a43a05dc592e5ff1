use gesture_pose::{
    ChannelSource, Effect, EffectSink, Frame, Gesture, GestureConfig, GestureError,
    GestureInterpreter, GestureLoop, Keypoint, PageState, PartName, PoseSample, PoseSource,
    ReplaySource,
};
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(33);

fn hands_up_frame() -> Frame {
    Frame::new(vec![PoseSample::new(vec![
        Keypoint::new(PartName::Nose, 240.0, 300.0, 0.9),
        Keypoint::new(PartName::LeftWrist, 120.0, 100.0, 0.9),
        Keypoint::new(PartName::RightWrist, 360.0, 150.0, 0.9),
    ])])
}

fn resting_frame() -> Frame {
    Frame::new(vec![PoseSample::new(vec![
        Keypoint::new(PartName::Nose, 240.0, 300.0, 0.9),
        Keypoint::new(PartName::LeftWrist, 120.0, 700.0, 0.9),
        Keypoint::new(PartName::RightWrist, 360.0, 710.0, 0.9),
    ])])
}

fn scroll_down_frame() -> Frame {
    Frame::new(vec![PoseSample::new(vec![
        Keypoint::new(PartName::LeftShoulder, 300.0, 550.0, 0.9),
        Keypoint::new(PartName::LeftWrist, 280.0, 560.0, 0.9),
    ])])
}

/// Fails every other call, then closes after `frames` good frames.
struct FlakySource {
    calls: usize,
    frames: usize,
}

impl PoseSource for FlakySource {
    async fn recv(&mut self) -> Result<Frame, GestureError> {
        self.calls += 1;
        if self.calls > self.frames * 2 {
            return Err(GestureError::SourceClosed);
        }
        if self.calls % 2 == 1 {
            Err(GestureError::Source("model timed out".to_string()))
        } else {
            Ok(resting_frame())
        }
    }
}

struct FailingSink {
    attempts: usize,
}

impl EffectSink for FailingSink {
    fn apply(&mut self, _effect: Effect) -> Result<(), GestureError> {
        self.attempts += 1;
        Err(GestureError::Effect("navigation blocked".to_string()))
    }
}

/// Applies the first effect, then rejects everything.
struct OneShotSink {
    applied: usize,
    page: PageState,
}

impl EffectSink for OneShotSink {
    fn apply(&mut self, effect: Effect) -> Result<(), GestureError> {
        if self.applied > 0 {
            return Err(GestureError::Effect("navigation blocked".to_string()));
        }
        self.applied += 1;
        self.page.apply(effect)
    }
}

#[tokio::test(start_paused = true)]
async fn test_loop_runs_until_source_closes() {
    let source = ReplaySource::new(vec![resting_frame(), hands_up_frame(), resting_frame()]);
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());

    let gesture_loop = GestureLoop::spawn(source, PageState::new(), interpreter, PERIOD).unwrap();
    let (stats, page) = gesture_loop.join().await.unwrap();

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.poses_evaluated, 3);
    assert_eq!(stats.count(Gesture::HandsUp), 1);
    assert_eq!(stats.count(Gesture::None), 2);
    assert_eq!(stats.count(Gesture::ScrollDown), 0);
    assert_eq!(stats.effects(), 1);
    assert_eq!(stats.source_errors, 0);
    assert_eq!(page.location(), Some("public/nextpage.html"));
    assert_eq!(page.navigations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_loop_polls_at_fixed_rate() {
    let source = ReplaySource::new(vec![scroll_down_frame()]).looping();
    let interpreter = GestureInterpreter::new(&GestureConfig::scroll_page());

    let gesture_loop = GestureLoop::spawn(source, PageState::new(), interpreter, PERIOD).unwrap();

    // First tick fires immediately, then one per period
    tokio::time::sleep(PERIOD * 10 - Duration::from_millis(1)).await;
    let (stats, page) = gesture_loop.stop().await.unwrap();

    assert_eq!(stats.frames, 10);
    assert_eq!(stats.count(Gesture::ScrollDown), 10);
    assert_eq!(page.scroll_offset(), 200);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_waiting_loop() {
    let (sender, source) = ChannelSource::new(4);
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());

    let gesture_loop = GestureLoop::spawn(source, PageState::new(), interpreter, PERIOD).unwrap();
    sender.send(hands_up_frame()).await.unwrap();
    tokio::time::sleep(PERIOD * 3).await;

    // The loop is now blocked on recv; stop must still return
    let (stats, page) = gesture_loop.stop().await.unwrap();
    assert_eq!(stats.frames, 1);
    assert_eq!(page.navigations(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_loop_finishes_when_channel_closes() {
    let (sender, source) = ChannelSource::new(8);
    for _ in 0..3 {
        sender.send(hands_up_frame()).await.unwrap();
    }
    drop(sender);

    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());
    let gesture_loop = GestureLoop::spawn(source, PageState::new(), interpreter, PERIOD).unwrap();

    let (stats, page) = gesture_loop.join().await.unwrap();
    assert_eq!(stats.frames, 3);
    assert_eq!(page.navigations(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_loop_counts_source_errors_and_continues() {
    let source = FlakySource { calls: 0, frames: 3 };
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());

    let gesture_loop = GestureLoop::spawn(source, PageState::new(), interpreter, PERIOD).unwrap();
    let (stats, _) = gesture_loop.join().await.unwrap();

    assert_eq!(stats.source_errors, 3);
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.count(Gesture::None), 3);
}

#[tokio::test(start_paused = true)]
async fn test_loop_counts_effect_errors_and_continues() {
    let source = ReplaySource::new(vec![hands_up_frame(), resting_frame(), hands_up_frame()]);
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());

    let gesture_loop =
        GestureLoop::spawn(source, FailingSink { attempts: 0 }, interpreter, PERIOD).unwrap();
    let (stats, sink) = gesture_loop.join().await.unwrap();

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.effect_errors, 2);
    assert_eq!(sink.attempts, 2);
    // Poses whose effect failed are not recorded
    assert_eq!(stats.count(Gesture::None), 1);
    assert_eq!(stats.count(Gesture::HandsUp), 0);
}

#[tokio::test(start_paused = true)]
async fn test_loop_records_effects_applied_before_sink_failure() {
    let mut two_people = hands_up_frame();
    two_people.poses.extend(hands_up_frame().poses);
    let source = ReplaySource::new(vec![two_people]);
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());
    let sink = OneShotSink {
        applied: 0,
        page: PageState::new(),
    };

    let gesture_loop = GestureLoop::spawn(source, sink, interpreter, PERIOD).unwrap();
    let (stats, sink) = gesture_loop.join().await.unwrap();

    assert_eq!(sink.applied, 1);
    assert_eq!(sink.page.navigations(), 1);
    assert_eq!(stats.frames, 1);
    assert_eq!(stats.poses_evaluated, 1);
    assert_eq!(stats.count(Gesture::HandsUp), 1);
    assert_eq!(stats.effects(), 1);
    assert_eq!(stats.effect_errors, 1);
}

#[tokio::test]
async fn test_zero_period_is_rejected() {
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());

    match GestureLoop::spawn(ReplaySource::default(), PageState::new(), interpreter, Duration::ZERO) {
        Err(GestureError::Config(msg)) => assert!(msg.contains("period")),
        other => panic!("Expected GestureError::Config, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_is_finished_after_source_closes() {
    let interpreter = GestureInterpreter::new(&GestureConfig::hands_up_page());
    let gesture_loop =
        GestureLoop::spawn(ReplaySource::default(), PageState::new(), interpreter, PERIOD).unwrap();

    tokio::time::sleep(PERIOD).await;
    assert!(gesture_loop.is_finished());

    // Stopping a finished loop still hands back the results
    let (stats, _) = gesture_loop.stop().await.unwrap();
    assert_eq!(stats.frames, 0);
}

#[tokio::test(start_paused = true)]
async fn test_config_frame_interval_drives_loop() {
    let config = GestureConfig::scroll_page().with_fps(10);
    let source = ReplaySource::new(vec![scroll_down_frame()]).looping();

    let gesture_loop = GestureLoop::spawn(
        source,
        PageState::new(),
        GestureInterpreter::new(&config),
        config.frame_interval(),
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(450)).await;
    let (stats, _) = gesture_loop.stop().await.unwrap();

    // Ticks at 0, 100, 200, 300 and 400 ms
    assert_eq!(stats.frames, 5);
}
