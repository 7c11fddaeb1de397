use log::{debug, error, info, warn};

use std::fs;
use std::path::Path;
use tokenlog::error::{Error, FileError, Result};

/// 默认配置文件内容
pub const DEFAULT_CONFIG: &str = r##"# tokenlog 配置文件

[logger]
# 文件名模板，可用占位符: #date{FMT}#  #server{KEY}#
fileNameFormat = "logs/app-#date{Ymd}#.log"
# 固定文件名（设置后忽略 fileNameFormat，且不会刷新）
# fileName = "logs/app.log"
# 每次写入都重新计算文件名（例如按日期切换文件）
updateFileName = true
# 最低级别: OFF, FATAL, ERROR, WARN, INFO, DEBUG, TRACE, ALL
logLevel = "ERROR"
# 日志条目模板，可用占位符: #date{FMT}#  #server{KEY}#  #level#  #text#  #file#  #line#
logFormat = "[#date{Y-m-d H:i:s}#]\t[#level#]\t[#file#]\t[#line#]\t#text#"
# #server{KEY}# 缺少键时: "fail" 报错, "empty" 替换为空字符串
missingServerKey = "fail"

[diagnostics]
# 工具自身的诊断输出级别: off, error, warn, info, debug, trace
level = "warn"
"##;

/// 生成默认配置文件
pub fn handle_init(output_path: &str, force: bool) -> Result<()> {
    let path = Path::new(output_path);

    info!("准备生成配置文件: {output_path}");

    // 检查文件是否已存在
    if path.exists() && !force {
        error!("配置文件已存在: {output_path}");
        info!("提示: 使用 --force 参数强制覆盖");
        return Err(Error::File(FileError::AlreadyExists {
            path: path.to_path_buf(),
        }));
    }

    if path.exists() && force {
        warn!("将覆盖已存在的配置文件");
    }

    // 创建目录（如果需要）
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!("创建目录: {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                Error::File(FileError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    reason: e.to_string(),
                })
            })?;
        }
    }

    debug!("写入配置文件...");
    fs::write(path, DEFAULT_CONFIG).map_err(|e| {
        Error::File(FileError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    })?;

    info!("配置文件已生成: {output_path}");
    info!("下一步:");
    info!("  1. 编辑配置文件: {output_path}");
    info!("  2. 验证配置: tokenlog validate -c {output_path}");
    info!("  3. 写入日志: tokenlog write -l error -c {output_path} \"message\"");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenlog::config::Config;

    #[test]
    fn test_init_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let test_path = dir.path().join("conf/tokenlog.toml");
        let test_path = test_path.to_str().unwrap();

        assert!(handle_init(test_path, false).is_ok());

        let content = fs::read_to_string(test_path).unwrap();
        assert!(content.contains("[logger]"));
        assert!(content.contains("[diagnostics]"));
    }

    #[test]
    fn test_default_config_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let test_path = dir.path().join("tokenlog.toml");
        handle_init(test_path.to_str().unwrap(), false).unwrap();

        let cfg = Config::from_file(&test_path).unwrap();
        assert_eq!(cfg.logger.log_level.as_deref(), Some("ERROR"));
        assert!(cfg.logger.update_file_name);
        assert_eq!(
            cfg.logger.log_format.as_deref(),
            Some("[#date{Y-m-d H:i:s}#]\t[#level#]\t[#file#]\t[#line#]\t#text#")
        );
    }

    #[test]
    fn test_init_fails_if_exists_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let test_path = dir.path().join("existing.toml");
        fs::write(&test_path, "existing content").unwrap();

        let result = handle_init(test_path.to_str().unwrap(), false);
        assert!(matches!(
            result,
            Err(Error::File(FileError::AlreadyExists { .. }))
        ));
    }

    #[test]
    fn test_init_overwrites_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let test_path = dir.path().join("force.toml");
        fs::write(&test_path, "old content").unwrap();

        assert!(handle_init(test_path.to_str().unwrap(), true).is_ok());

        let content = fs::read_to_string(&test_path).unwrap();
        assert!(content.contains("[logger]"));
        assert!(!content.contains("old content"));
    }
}
