//! Logger initialization.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

/// Dependency modules that are noisy below the given level.
const CLAMPED_MODULES: &[(&str, LevelFilter)] = &[
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
    ("hyper_util", LevelFilter::Info),
    // hickory logs every malformed UDP answer at warn
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
];

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides the global and crate
/// filters, so `--log-level` always wins.
///
/// ```bash
/// RUST_LOG=link_metadata=debug,reqwest=info link_metadata --log-level debug
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    for (module, clamp) in CLAMPED_MODULES {
        builder.filter_module(module, (*clamp).min(level));
    }
    builder.filter_module("link_metadata", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(true);
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S%.3f"),
                    record.target().cyan(),
                    colored_level(record.level()),
                    record.args()
                )
            });
        }
    }

    // try_init so a second initialisation (tests) is an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

fn colored_level(level: Level) -> ColoredString {
    let name = level.to_string();
    match level {
        Level::Error => name.red(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.purple(),
    }
}

/// One JSON object per log line.
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}
