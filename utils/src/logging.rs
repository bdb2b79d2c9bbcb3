use std::env;

use chrono::Local;
use log::LevelFilter;

/// Logs to stderr. `LOG_LEVEL` takes precedence over the verbosity count.
pub fn setup_logging(verbosity: u8) -> Result<(), fern::InitError> {
    let level = level_from_env(env::var("LOG_LEVEL").ok().as_deref())
        .unwrap_or_else(|| level_from_verbosity(verbosity));

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

fn level_from_env(value: Option<&str>) -> Option<LevelFilter> {
    match value {
        Some("info") => Some(LevelFilter::Info),
        Some("debug") => Some(LevelFilter::Debug),
        Some("warn") => Some(LevelFilter::Warn),
        Some("error") => Some(LevelFilter::Error),
        _ => None,
    }
}

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(Some("debug")), Some(LevelFilter::Debug));
        assert_eq!(level_from_env(Some("error")), Some(LevelFilter::Error));
        assert_eq!(level_from_env(Some("verbose")), None);
        assert_eq!(level_from_env(None), None);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1), LevelFilter::Info);
        assert_eq!(level_from_verbosity(3), LevelFilter::Debug);
    }
}
