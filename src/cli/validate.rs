use log::info;

use tokenlog::Logger;
use tokenlog::config::{Config, FileNameSpec, Setup};
use tokenlog::error::Result;

/// 验证配置文件
pub fn handle_validate(cfg: &Config) -> Result<()> {
    // 加载时已校验过，这里只展示解析结果
    let logger = Logger::new(Setup::Options(cfg.logger.clone()))?;
    let resolved = logger.config();
    match &resolved.file_name {
        FileNameSpec::Format(format) => info!("文件名模板: {format}"),
        FileNameSpec::Fixed(name) => info!("固定文件名: {name}"),
    }
    info!("日志格式: {}", resolved.log_format);
    info!("最低级别: {}", resolved.min_level);
    info!(
        "文件名刷新: {}",
        if resolved.dynamic_file_name { "每次写入" } else { "仅启动时" }
    );
    info!("诊断级别: {}", cfg.diagnostics.level());
    info!("当前文件名: {}", logger.file_name());

    Ok(())
}
