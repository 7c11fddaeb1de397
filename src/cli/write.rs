use log::{debug, info};
use tokenlog::config::{Config, Setup};
use tokenlog::error::{LogError, Result};
use tokenlog::{CallSite, Level, Logger};

/// 追加一条日志
pub fn handle_write(
    cfg: &Config,
    message: &str,
    level: Option<&str>,
    call_site: &CallSite,
) -> Result<bool> {
    let level: Level = level.ok_or(LogError::LevelRequired)?.parse()?;

    let mut logger = Logger::new(Setup::Options(cfg.logger.clone()))?;
    debug!(
        "Writing {} entry to {} (min level {})",
        level,
        logger.file_name(),
        logger.min_level()
    );

    let written = logger.log_at(message, level, call_site)?;
    if written {
        info!("Entry written to {}", logger.file_name());
    } else {
        info!(
            "Entry suppressed: {} is below the minimum level {}",
            level,
            logger.min_level()
        );
    }

    Ok(written)
}
