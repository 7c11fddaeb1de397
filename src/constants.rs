//! 公共常量
//! 提供：
//! - 级别表 LOG_LEVELS（名称与优先级的统一来源）
//! - 默认文件名模板、日志条目模板与最低级别

/// 级别表：名称（大写规范形式）与优先级，数字越小越严重
pub const LOG_LEVELS: &[(&str, u8)] = &[
    ("OFF", 0),
    ("FATAL", 1),
    ("ERROR", 2),
    ("WARN", 3),
    ("INFO", 4),
    ("DEBUG", 5),
    ("TRACE", 6),
    ("ALL", 7),
];

/// 未提供文件名模板时使用
pub const DEFAULT_FILE_NAME_FORMAT: &str = "default-#date{Ymd}#.log";

/// 未提供日志格式时使用
pub const DEFAULT_LOG_FORMAT: &str = "[#date{Y-m-d H:i:s}#]\t[#level#]\t[#file#]\t[#line#]\t#text#";

/// 未提供最低级别时使用
pub const DEFAULT_MIN_LEVEL: &str = "ERROR";

/// 命令行工具默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "tokenlog.toml";

/// 级别名称列表（用于错误提示）
pub fn level_names() -> Vec<String> {
    LOG_LEVELS.iter().map(|(name, _)| (*name).to_string()).collect()
}
