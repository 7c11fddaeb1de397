use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;
use crate::template::CallSite;
use log::{LevelFilter, Metadata, Record};
use std::sync::Mutex;

/// 本 crate 自身的诊断记录不经过桥接，避免写入时重入
const OWN_TARGET: &str = env!("CARGO_CRATE_NAME");

/// 把 `log` 门面的记录转发给模板 Logger
#[derive(Debug)]
pub struct LogBridge {
    level: LevelFilter,
    logger: Mutex<Logger>,
}

impl LogBridge {
    pub fn new(logger: Logger) -> Self {
        Self {
            level: logger.min_level().into(),
            logger: Mutex::new(logger),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && !is_own_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let call_site = CallSite::new(
            record.file().unwrap_or_default(),
            record.line().unwrap_or_default(),
        );
        let text = record.args().to_string();

        // log::Log 无法返回错误，失败时输出到 stderr
        match self.logger.lock() {
            Ok(mut logger) => {
                if let Err(e) = logger.log_at(&text, Level::from(record.level()), &call_site) {
                    eprintln!("tokenlog: failed to write log entry: {e}");
                }
            }
            Err(_) => eprintln!("tokenlog: logger mutex poisoned, entry dropped"),
        }
    }

    fn flush(&self) {}
}

/// 将 Logger 注册为全局 `log` 后端
pub fn init_logging(logger: Logger) -> Result<()> {
    let bridge = LogBridge::new(logger);
    let level = bridge.level();

    log::set_boxed_logger(Box::new(bridge))?;
    log::set_max_level(level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_own_target_filter() {
        assert!(is_own_target("tokenlog"));
        assert!(is_own_target("tokenlog::logger"));
        assert!(!is_own_target("tokenlogger"));
        assert!(!is_own_target("my_app::db"));
    }

    #[test]
    fn test_bridge_writes_with_record_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bridge.log");
        let mut logger = Logger::new(path.to_str().unwrap()).unwrap();
        logger.set_log_format("#level# #file#:#line# #text#");
        logger.set_log_level("warn").unwrap();
        let bridge = LogBridge::new(logger);

        assert_eq!(bridge.level(), LevelFilter::Warn);

        let warn = Record::builder()
            .level(log::Level::Warn)
            .target("my_app::db")
            .file(Some("src/db/pool.rs"))
            .line(Some(42))
            .args(format_args!("pool exhausted"))
            .build();
        bridge.log(&warn);

        let info = Record::builder()
            .level(log::Level::Info)
            .target("my_app::db")
            .args(format_args!("hidden"))
            .build();
        bridge.log(&info);

        let own = Record::builder()
            .level(log::Level::Error)
            .target("tokenlog::logger")
            .args(format_args!("internal"))
            .build();
        bridge.log(&own);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "WARN pool.rs:42 pool exhausted\n");
    }
}
