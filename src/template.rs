//! 模板合成
//!
//! 模板中的占位符：
//! - `#date{FMT}#`   当前本地时间，FMT 见 [`crate::date_format`]
//! - `#server{KEY}#` 上下文中的 KEY
//! - `#text#`        日志文本（只替换第一次出现）
//! - `#level#`       级别名称
//! - `#file#` / `#line#` 调用位置
//!
//! 其它 `#...#` 原样保留。参数和替换后的内容都不会被再次展开。

use crate::context::{MissingKeyPolicy, ServerContext};
use crate::date_format::format_date;
use crate::error::{Result, TemplateError};
use chrono::{DateTime, Local};
use std::panic::Location;
use std::path::Path;

/// 解析后的模板节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(String),
    Date(String),
    Server(String),
    Text,
    Level,
    File,
    Line,
}

impl Node {
    /// 节点对应的原始占位符写法
    fn source(&self) -> String {
        match self {
            Node::Literal(s) => s.clone(),
            Node::Date(arg) => format!("#date{{{arg}}}#"),
            Node::Server(arg) => format!("#server{{{arg}}}#"),
            Node::Text => "#text#".to_string(),
            Node::Level => "#level#".to_string(),
            Node::File => "#file#".to_string(),
            Node::Line => "#line#".to_string(),
        }
    }
}

/// 解析后的模板，可以重复渲染
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// 把模板切分为文本节点和占位符节点
    pub fn parse(source: &str) -> Self {
        let mut nodes = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(offset) = source[cursor..].find('#') {
            let hash = cursor + offset;
            match match_token(&source[hash + 1..]) {
                Some((node, consumed)) => {
                    if hash > literal_start {
                        nodes.push(Node::Literal(source[literal_start..hash].to_string()));
                    }
                    nodes.push(node);
                    cursor = hash + 1 + consumed;
                    literal_start = cursor;
                }
                None => cursor = hash + 1,
            }
        }

        if literal_start < source.len() {
            nodes.push(Node::Literal(source[literal_start..].to_string()));
        }

        Self {
            source: source.to_string(),
            nodes,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// 模板中不含任何占位符
    pub fn is_static(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, Node::Literal(_)))
    }
}

/// 匹配 `#` 之后的内容，返回节点和消耗的字节数（含结尾的 `#`）
fn match_token(rest: &str) -> Option<(Node, usize)> {
    let name_len = rest
        .bytes()
        .take_while(u8::is_ascii_lowercase)
        .count();
    let name = &rest[..name_len];
    let after = &rest[name_len..];

    if after.starts_with('#') {
        let node = match name {
            "text" => Node::Text,
            "level" => Node::Level,
            "file" => Node::File,
            "line" => Node::Line,
            _ => return None,
        };
        return Some((node, name_len + 1));
    }

    let arg_body = after.strip_prefix('{')?;
    let close = arg_body.find('}')?;
    if !arg_body[close + 1..].starts_with('#') {
        return None;
    }
    let arg = arg_body[..close].to_string();
    let node = match name {
        "date" => Node::Date(arg),
        "server" => Node::Server(arg),
        _ => return None,
    };
    // name + '{' + arg + '}' + '#'
    Some((node, name_len + 1 + close + 2))
}

/// 调用位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// 文件名（不含目录）
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn new(path: &str, line: u32) -> Self {
        let file = Path::new(path)
            .file_name()
            .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());
        Self { file, line }
    }

    /// 调用者位置（经过所有 `#[track_caller]` 函数）
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }
}

/// 模板合成器：持有上下文、缺失键策略与时钟
#[derive(Debug, Clone)]
pub struct Compositor {
    context: ServerContext,
    missing_key: MissingKeyPolicy,
    clock: fn() -> DateTime<Local>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(ServerContext::from_process(), MissingKeyPolicy::default())
    }
}

impl Compositor {
    pub fn new(context: ServerContext, missing_key: MissingKeyPolicy) -> Self {
        Self {
            context,
            missing_key,
            clock: Local::now,
        }
    }

    /// 替换时钟（测试用固定时间）
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn context(&self) -> &ServerContext {
        &self.context
    }

    pub fn set_context(&mut self, context: ServerContext) {
        self.context = context;
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing_key
    }

    pub fn set_missing_key_policy(&mut self, policy: MissingKeyPolicy) {
        self.missing_key = policy;
    }

    /// 解析并展开模板字符串
    pub fn compose(
        &self,
        template: &str,
        text: &str,
        level: &str,
        call_site: Option<&CallSite>,
    ) -> Result<String> {
        self.render(&Template::parse(template), text, level, call_site)
    }

    /// 展开已解析的模板
    pub fn render(
        &self,
        template: &Template,
        text: &str,
        level: &str,
        call_site: Option<&CallSite>,
    ) -> Result<String> {
        let mut out = String::with_capacity(template.source.len() + text.len());
        let mut text_used = false;

        for node in &template.nodes {
            match node {
                Node::Literal(s) => out.push_str(s),
                // 每次出现都重新取时间
                Node::Date(fmt) => out.push_str(&format_date(fmt, &(self.clock)())),
                Node::Server(key) => out.push_str(self.server_value(key)?),
                // 只替换第一次出现，其余保留原样
                Node::Text if text_used => out.push_str(&node.source()),
                Node::Text => {
                    out.push_str(text);
                    text_used = true;
                }
                Node::Level => out.push_str(level),
                Node::File => {
                    if let Some(site) = call_site {
                        out.push_str(&site.file);
                    }
                }
                Node::Line => {
                    if let Some(site) = call_site {
                        out.push_str(&site.line.to_string());
                    }
                }
            }
        }

        Ok(out)
    }

    fn server_value(&self, key: &str) -> Result<&str> {
        match (self.context.get(key), self.missing_key) {
            (Some(value), _) => Ok(value),
            (None, MissingKeyPolicy::Empty) => Ok(""),
            (None, MissingKeyPolicy::Fail) => Err(TemplateError::MissingServerKey {
                key: key.to_string(),
            }
            .into()),
        }
    }
}
