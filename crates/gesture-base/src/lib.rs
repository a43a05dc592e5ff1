pub mod logging;

pub use logging::{StdoutLogger, init_stdout_logger, init_stdout_logger_from_env, parse_level};

// Re-export log crate so downstream crates can use gesture_base::log::*
pub use log;
