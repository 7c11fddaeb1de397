use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration related error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log call error (bad level / method name)
    #[error("Log error: {0}")]
    Log(#[from] LogError),

    /// Template expansion error
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// File operation error
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// A global `log` backend is already installed
    #[error("Failed to install log backend: {0}")]
    SetLogger(#[from] log::SetLoggerError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Configuration file parse failed
    #[error("Failed to parse configuration file {path}: {reason}")]
    ParseFailed { path: PathBuf, reason: String },

    /// Invalid log level
    #[error("Invalid log level '{level}', valid values: {}", valid_levels.join(", "))]
    InvalidLogLevel {
        level: String,
        valid_levels: Vec<String>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value {field} = '{value}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Logger setup given something other than nothing, a string or a table
    #[error("Unsupported logger configuration of type {kind}: expected a string or a table")]
    UnsupportedArgument { kind: String },
}

/// 日志调用错误
#[derive(Debug, Error)]
pub enum LogError {
    /// Level name not present in the level table
    #[error("Unknown log level '{level}'")]
    UnknownLevel { level: String },

    /// Convenience method name that is not a level
    #[error("Unknown logger method '{method}'")]
    UnknownMethod { method: String },

    /// `log` called without a level
    #[error("A log level is required")]
    LevelRequired,
}

/// 模板展开错误
#[derive(Debug, Error)]
pub enum TemplateError {
    /// `#server{KEY}#` referenced a key the context does not hold
    #[error("Server context has no key '{key}'")]
    MissingServerKey { key: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// File already exists
    #[error("File already exists: {path} (use --force to replace)")]
    AlreadyExists { path: PathBuf },

    /// Create directory failed
    #[error("Failed to create directory {path}: {reason}")]
    CreateDirectoryFailed { path: PathBuf, reason: String },

    /// Open (append) failed
    #[error("Failed to open file {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    /// Exclusive lock could not be acquired
    #[error("Failed to lock file {path}: {reason}")]
    LockFailed { path: PathBuf, reason: String },

    /// File write failed
    #[error("Failed to write file {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// 应用程序 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;

// 辅助宏，用于快速创建错误
#[macro_export]
macro_rules! config_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::Config($crate::error::ConfigError::$variant {
            $($field: $value),+
        })
    };
}

#[macro_export]
macro_rules! log_error {
    ($variant:ident) => {
        $crate::error::Error::Log($crate::error::LogError::$variant)
    };
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::Log($crate::error::LogError::$variant {
            $($field: $value),+
        })
    };
}

#[macro_export]
macro_rules! file_error {
    ($variant:ident { $($field:ident: $value:expr),+ $(,)? }) => {
        $crate::error::Error::File($crate::error::FileError::$variant {
            $($field: $value),+
        })
    };
}
