//! `#server{KEY}#` 使用的上下文
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

/// 上下文中缺少键时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingKeyPolicy {
    /// 展开失败（默认）
    #[default]
    Fail,
    /// 替换为空字符串
    Empty,
}

/// 键值上下文，类似 Web 服务器的环境变量表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerContext {
    vars: BTreeMap<String, String>,
}

impl ServerContext {
    /// 空上下文
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前进程的环境变量，外加 `SCRIPT_NAME` / `SCRIPT_PATH`
    pub fn from_process() -> Self {
        let mut vars: BTreeMap<String, String> = env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect();

        if let Ok(exe) = env::current_exe() {
            if let Some(name) = exe.file_name().and_then(|n| n.to_str()) {
                vars.insert("SCRIPT_NAME".to_string(), name.to_string());
            }
            vars.insert(
                "SCRIPT_PATH".to_string(),
                exe.to_string_lossy().into_owned(),
            );
        } else if let Some(arg0) = env::args().next() {
            let name = Path::new(&arg0)
                .file_name()
                .map_or_else(|| arg0.clone(), |n| n.to_string_lossy().into_owned());
            vars.insert("SCRIPT_NAME".to_string(), name);
            vars.insert("SCRIPT_PATH".to_string(), arg0);
        }

        Self { vars }
    }

    /// 添加或覆盖一个键
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ServerContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
