//! 日志级别
use crate::constants::{LOG_LEVELS, level_names};
use crate::error::{ConfigError, Error, LogError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 日志级别，优先级数字越小越严重
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Off,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    All,
}

// 使用 once_cell 缓存级别映射表，避免每次查找时重新构建
static LEVEL_MAP: Lazy<HashMap<&'static str, Level>> = Lazy::new(|| {
    LOG_LEVELS
        .iter()
        .zip(Level::ALL_LEVELS)
        .map(|((name, _), level)| (*name, level))
        .collect()
});

impl Level {
    /// 按优先级排列的全部级别
    pub const ALL_LEVELS: [Level; 8] = [
        Level::Off,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
        Level::All,
    ];

    /// 优先级（与 LOG_LEVELS 一致）
    pub fn priority(self) -> u8 {
        LOG_LEVELS[self as usize].1
    }

    /// 大写规范名称
    pub fn as_str(self) -> &'static str {
        LOG_LEVELS[self as usize].0
    }

    /// 大小写不敏感查找
    pub fn lookup(name: &str) -> Option<Level> {
        LEVEL_MAP.get(name.to_ascii_uppercase().as_str()).copied()
    }

    /// 解析配置中的级别名称，失败时返回配置错误
    pub fn from_config(name: &str) -> Result<Level> {
        Level::lookup(name).ok_or_else(|| {
            Error::Config(ConfigError::InvalidLogLevel {
                level: name.to_string(),
                valid_levels: level_names(),
            })
        })
    }

    /// `min` 为最低级别时，该级别的条目是否写入
    pub fn passes(self, min: Level) -> bool {
        self.priority() <= min.priority()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Level::lookup(s).ok_or_else(|| {
            Error::Log(LogError::UnknownLevel {
                level: s.to_string(),
            })
        })
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug => Level::Debug,
            log::Level::Trace => Level::Trace,
        }
    }
}

impl From<Level> for log::LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => log::LevelFilter::Off,
            Level::Fatal | Level::Error => log::LevelFilter::Error,
            Level::Warn => log::LevelFilter::Warn,
            Level::Info => log::LevelFilter::Info,
            Level::Debug => log::LevelFilter::Debug,
            Level::Trace | Level::All => log::LevelFilter::Trace,
        }
    }
}
