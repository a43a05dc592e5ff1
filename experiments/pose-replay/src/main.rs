use gesture_base::log_fatal;
use gesture_pose::{
    Gesture, GestureConfig, GestureError, GestureInterpreter, GestureLoop, LoggingSink, PageState,
    ReplaySource,
};
use std::env;
use std::path::PathBuf;

/// Load the page config: a JSON file from GESTURE_CONFIG wins over the
/// GESTURE_PRESET name, which defaults to the hands-up page.
fn load_config() -> Result<GestureConfig, GestureError> {
    if let Ok(path) = env::var("GESTURE_CONFIG") {
        return GestureConfig::from_json_file(path);
    }
    let preset = env::var("GESTURE_PRESET").unwrap_or_else(|_| "hands-up".to_string());
    let config = GestureConfig::preset(&preset)?;
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    gesture_base::init_stdout_logger_from_env("GESTURE_LOG");

    // Recording path from the first argument, then the environment
    let replay_path: PathBuf = match env::args()
        .nth(1)
        .or_else(|| env::var("GESTURE_REPLAY_PATH").ok())
    {
        Some(path) => path.into(),
        None => log_fatal!("usage: pose-replay <frames.json> (or set GESTURE_REPLAY_PATH)"),
    };

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => log_fatal!("Invalid gesture config: {}", e),
    };

    let video = config.video();
    log::info!("Recording: {}", replay_path.display());
    log::info!(
        "Video: {}x{}, skeleton {} ({}px), gestures {:?}, {} fps",
        video.width,
        video.height,
        config.style().color,
        config.style().line_width,
        config.gestures(),
        config.fps()
    );

    let source = ReplaySource::from_json_file(&replay_path)?;
    log::info!("Loaded {} frames", source.remaining());

    let gesture_loop = GestureLoop::spawn(
        source,
        LoggingSink::new(PageState::new()),
        GestureInterpreter::new(&config),
        config.frame_interval(),
    )?;

    let (stats, sink) = gesture_loop.join().await?;
    let page = sink.into_inner();

    println!("frames:      {}", stats.frames);
    println!("poses:       {}", stats.poses_evaluated);
    println!("hands up:    {}", stats.count(Gesture::HandsUp));
    println!("scroll down: {}", stats.count(Gesture::ScrollDown));
    println!("scroll up:   {}", stats.count(Gesture::ScrollUp));
    println!("errors:      {}", stats.source_errors + stats.effect_errors);
    println!("scroll:      {}px", page.scroll_offset());
    println!("location:    {}", page.location().unwrap_or("(start page)"));
    Ok(())
}
