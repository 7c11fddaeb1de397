//! 模板文件日志记录器 - 按级别过滤并加锁追加写入
use crate::append::append_line;
use crate::config::{FileNameSpec, LoggerConfig, Setup, or_default};
use crate::constants::DEFAULT_LOG_FORMAT;
use crate::context::{MissingKeyPolicy, ServerContext};
use crate::error::{Error, LogError, Result};
use crate::level::Level;
use crate::template::{CallSite, Compositor, Template};
use log::{debug, trace};
use std::path::Path;

/// 文件名来源（已解析模板或固定名称）
#[derive(Debug, Clone)]
enum FileNameSource {
    Template(Template),
    Fixed(String),
}

/// 日志记录器
#[derive(Debug, Clone)]
pub struct Logger {
    config: LoggerConfig,
    file_name_source: FileNameSource,
    log_template: Template,
    compositor: Compositor,
    /// 最近一次解析得到的文件名
    file_name: String,
}

impl Logger {
    /// 创建日志记录器，`#server{..}#` 使用当前进程的上下文
    pub fn new(setup: impl Into<Setup>) -> Result<Self> {
        Self::with_context(setup, ServerContext::from_process())
    }

    /// 全部使用默认值
    pub fn with_defaults() -> Result<Self> {
        Self::new(Setup::Defaults)
    }

    /// 指定上下文创建
    pub fn with_context(setup: impl Into<Setup>, context: ServerContext) -> Result<Self> {
        let config = LoggerConfig::resolve(setup.into())?;
        let compositor = Compositor::new(context, config.missing_server_key);
        Self::from_parts(config, compositor)
    }

    /// 从动态配置值创建（字符串或表）
    pub fn from_value(value: toml::Value) -> Result<Self> {
        Self::new(Setup::try_from(value)?)
    }

    /// 使用已解析的配置与合成器创建
    pub fn from_parts(config: LoggerConfig, compositor: Compositor) -> Result<Self> {
        let file_name_source = match &config.file_name {
            FileNameSpec::Format(format) => FileNameSource::Template(Template::parse(format)),
            FileNameSpec::Fixed(name) => FileNameSource::Fixed(name.clone()),
        };
        let log_template = Template::parse(&config.log_format);

        let mut logger = Self {
            config,
            file_name_source,
            log_template,
            compositor,
            file_name: String::new(),
        };
        logger.refresh_file_name()?;

        debug!(
            "Logger ready - file: {}, min level: {}, dynamic file name: {}",
            logger.file_name, logger.config.min_level, logger.config.dynamic_file_name
        );

        Ok(logger)
    }

    /// 设置最低级别（大小写不敏感）
    pub fn set_log_level(&mut self, level: &str) -> Result<&mut Self> {
        self.config.min_level = Level::from_config(level)?;
        Ok(self)
    }

    /// 设置日志条目模板，空白模板回退到默认格式
    pub fn set_log_format(&mut self, format: &str) -> &mut Self {
        self.config.log_format = or_default(Some(format.to_string()), DEFAULT_LOG_FORMAT);
        self.log_template = Template::parse(&self.config.log_format);
        self
    }

    /// 替换上下文，并按新上下文重新计算文件名
    pub fn set_context(&mut self, context: ServerContext) -> Result<&mut Self> {
        self.compositor.set_context(context);
        self.refresh_file_name()?;
        Ok(self)
    }

    /// 设置缺少键时的处理方式，并重新计算文件名
    pub fn set_missing_key_policy(&mut self, policy: MissingKeyPolicy) -> Result<&mut Self> {
        self.config.missing_server_key = policy;
        self.compositor.set_missing_key_policy(policy);
        self.refresh_file_name()?;
        Ok(self)
    }

    /// 当前文件名（最近一次解析的结果）
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn log_format(&self) -> &str {
        &self.config.log_format
    }

    pub fn min_level(&self) -> Level {
        self.config.min_level
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// 该级别的条目是否会被写入
    pub fn is_enabled(&self, level: Level) -> bool {
        level.passes(self.config.min_level)
    }

    /// 写入一条日志
    ///
    /// 级别必须显式给出；低于最低级别时不做任何 I/O 并返回 `Ok(false)`。
    #[track_caller]
    pub fn log(&mut self, text: &str, level: Option<&str>) -> Result<bool> {
        let call_site = CallSite::caller();
        let name = level.ok_or(Error::Log(LogError::LevelRequired))?;
        let level: Level = name.parse()?;
        self.log_at(text, level, &call_site)
    }

    /// 使用枚举级别写入
    #[track_caller]
    pub fn log_level(&mut self, text: &str, level: Level) -> Result<bool> {
        let call_site = CallSite::caller();
        self.log_at(text, level, &call_site)
    }

    /// 按方法名分发：名称匹配级别时写入，否则报错
    #[track_caller]
    pub fn invoke(&mut self, method: &str, text: &str) -> Result<bool> {
        let call_site = CallSite::caller();
        let level = Level::lookup(method).ok_or_else(|| {
            crate::log_error!(UnknownMethod {
                method: method.to_string(),
            })
        })?;
        self.log_at(text, level, &call_site)
    }

    /// 指定调用位置写入
    pub fn log_at(&mut self, text: &str, level: Level, call_site: &CallSite) -> Result<bool> {
        if !self.is_enabled(level) {
            trace!(
                "Suppressed {} entry (min level {})",
                level, self.config.min_level
            );
            return Ok(false);
        }

        if self.config.dynamic_file_name {
            self.refresh_file_name()?;
        }

        let entry = self
            .compositor
            .render(&self.log_template, text, level.as_str(), Some(call_site))?;
        append_line(Path::new(&self.file_name), &entry)?;

        Ok(true)
    }

    /// 重新计算文件名
    fn refresh_file_name(&mut self) -> Result<()> {
        let name = match &self.file_name_source {
            FileNameSource::Fixed(name) => name.clone(),
            FileNameSource::Template(template) => self.compositor.render(template, "", "", None)?,
        };
        if name != self.file_name {
            debug!("Log file name resolved: {name}");
            self.file_name = name;
        }
        Ok(())
    }
}

macro_rules! level_methods {
    ($($name:ident => $level:expr),+ $(,)?) => {
        impl Logger {
            $(
                #[doc = concat!("以 `", stringify!($level), "` 级别写入")]
                #[track_caller]
                pub fn $name(&mut self, text: &str) -> Result<bool> {
                    self.log_level(text, $level)
                }
            )+
        }
    };
}

level_methods! {
    fatal => Level::Fatal,
    error => Level::Error,
    warn => Level::Warn,
    info => Level::Info,
    debug => Level::Debug,
    trace => Level::Trace,
}
