use crate::constants::{DEFAULT_FILE_NAME_FORMAT, DEFAULT_LOG_FORMAT, DEFAULT_MIN_LEVEL};
use crate::context::MissingKeyPolicy;
use crate::error::{ConfigError, Error, Result};
use crate::level::Level;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 诊断输出允许的级别（env_logger）
pub const DIAGNOSTIC_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// 命令行工具配置文件
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// `[logger]`：写日志用的 Logger 配置
    #[serde(default)]
    pub logger: LoggerOptions,
    /// `[diagnostics]`：工具自身的诊断输出
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::Config(ConfigError::NotFound(path.to_path_buf())))?;
        Self::from_str(&content, path.to_path_buf())
    }

    /// 从字符串解析配置
    pub fn from_str(content: &str, path: PathBuf) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| {
            Error::Config(ConfigError::ParseFailed {
                path,
                reason: e.to_string(),
            })
        })?;

        config.validate()?;

        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        LoggerConfig::resolve(Setup::Options(self.logger.clone()))?;
        self.diagnostics.validate()?;
        Ok(())
    }
}

/// 工具自身的诊断日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticsConfig {
    pub level: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl DiagnosticsConfig {
    pub fn level(&self) -> &str {
        &self.level
    }

    /// 转换为 env_logger 使用的过滤级别
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level.parse().map_err(|_| {
            Error::Config(ConfigError::InvalidLogLevel {
                level: self.level.clone(),
                valid_levels: DIAGNOSTIC_LEVELS.iter().map(|s| (*s).to_string()).collect(),
            })
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.level_filter().map(|_| ())
    }
}

/// Logger 的结构化配置（字段名与配置文件一致）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggerOptions {
    /// 文件名模板
    pub file_name_format: Option<String>,
    /// 固定文件名，优先于模板且不会刷新
    pub file_name: Option<String>,
    /// 每次写入都重新计算文件名
    #[serde(default)]
    pub update_file_name: bool,
    /// 最低级别
    pub log_level: Option<String>,
    /// 日志条目模板
    pub log_format: Option<String>,
    /// `#server{KEY}#` 缺少键时的处理方式
    #[serde(default)]
    pub missing_server_key: MissingKeyPolicy,
}

/// Logger 构造参数：无参数、文件名模板或结构化配置
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Setup {
    #[default]
    Defaults,
    FileNameFormat(String),
    Options(LoggerOptions),
}

impl From<&str> for Setup {
    fn from(format: &str) -> Self {
        Setup::FileNameFormat(format.to_string())
    }
}

impl From<String> for Setup {
    fn from(format: String) -> Self {
        Setup::FileNameFormat(format)
    }
}

impl From<LoggerOptions> for Setup {
    fn from(options: LoggerOptions) -> Self {
        Setup::Options(options)
    }
}

impl TryFrom<toml::Value> for Setup {
    type Error = Error;

    /// 动态配置：字符串视为文件名模板，表视为结构化配置，其它类型报错
    fn try_from(value: toml::Value) -> Result<Self> {
        match value {
            toml::Value::String(format) => Ok(Setup::FileNameFormat(format)),
            toml::Value::Table(table) => {
                let options: LoggerOptions = toml::Value::Table(table).try_into().map_err(
                    |e: toml::de::Error| {
                        Error::Config(ConfigError::InvalidValue {
                            field: "logger".to_string(),
                            value: "table".to_string(),
                            reason: e.to_string(),
                        })
                    },
                )?;
                Ok(Setup::Options(options))
            }
            other => Err(Error::Config(ConfigError::UnsupportedArgument {
                kind: other.type_str().to_string(),
            })),
        }
    }
}

/// 文件名来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameSpec {
    /// 模板，展开后得到文件名
    Format(String),
    /// 固定文件名，原样使用
    Fixed(String),
}

/// 解析后的 Logger 配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub file_name: FileNameSpec,
    pub log_format: String,
    pub min_level: Level,
    pub dynamic_file_name: bool,
    pub missing_server_key: MissingKeyPolicy,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_name: FileNameSpec::Format(DEFAULT_FILE_NAME_FORMAT.to_string()),
            log_format: DEFAULT_LOG_FORMAT.to_string(),
            min_level: Level::Error,
            dynamic_file_name: false,
            missing_server_key: MissingKeyPolicy::Fail,
        }
    }
}

impl LoggerConfig {
    /// 把构造参数解析为完整配置
    pub fn resolve(setup: Setup) -> Result<Self> {
        match setup {
            Setup::Defaults => Ok(Self::default()),
            Setup::FileNameFormat(format) => {
                let format = or_default(Some(format), DEFAULT_FILE_NAME_FORMAT);
                Ok(Self {
                    file_name: FileNameSpec::Format(format),
                    ..Self::default()
                })
            }
            Setup::Options(options) => Self::from_options(options),
        }
    }

    fn from_options(options: LoggerOptions) -> Result<Self> {
        let min_level = Level::from_config(
            options
                .log_level
                .as_deref()
                .unwrap_or(DEFAULT_MIN_LEVEL),
        )?;

        let log_format = or_default(options.log_format, DEFAULT_LOG_FORMAT);

        // 空白的 fileName 视同未提供
        let fixed = options.file_name.filter(|name| !name.trim().is_empty());
        let (file_name, dynamic_file_name) = match fixed {
            Some(fixed) => (FileNameSpec::Fixed(fixed), false),
            None => (
                FileNameSpec::Format(or_default(
                    options.file_name_format,
                    DEFAULT_FILE_NAME_FORMAT,
                )),
                options.update_file_name,
            ),
        };

        Ok(Self {
            file_name,
            log_format,
            min_level,
            dynamic_file_name,
            missing_server_key: options.missing_server_key,
        })
    }
}

/// 未提供或空白的模板回退到默认值
pub(crate) fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
