use log::LevelFilter;
use simplelog::{ConfigBuilder, SimpleLogger};

/// Overrides the default `info` level, e.g. `MOTION_RELAY_LOG=debug`
/// to follow the dispatch state transitions.
pub const LOG_LEVEL_ENV: &str = "MOTION_RELAY_LOG";

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn setup_simple_logger() -> anyhow::Result<()> {
    let level = parse_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());

    let logger_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .add_filter_allow_str("motion_relay")
        .build();

    Ok(SimpleLogger::init(level, logger_config)?)
}
