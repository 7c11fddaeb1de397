use log::debug;
use tokenlog::error::Result;
use tokenlog::{CallSite, Compositor, Level, MissingKeyPolicy, ServerContext, Template};

/// 展开模板并返回结果（调试模板用）
pub fn handle_render(
    template: &str,
    text: &str,
    level: &str,
    allow_missing: bool,
) -> Result<String> {
    let level = Level::from_config(level)?;
    let policy = if allow_missing {
        MissingKeyPolicy::Empty
    } else {
        MissingKeyPolicy::Fail
    };

    let parsed = Template::parse(template);
    debug!("Parsed template into {} node(s)", parsed.nodes().len());

    let compositor = Compositor::new(ServerContext::from_process(), policy);
    compositor.render(&parsed, text, level.as_str(), Some(&CallSite::new("tokenlog", 0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tokens() {
        let out = handle_render("[#level#] #text# #text#", "hello", "warn", false).unwrap();
        assert_eq!(out, "[WARN] hello #text#");
    }

    #[test]
    fn test_render_missing_key_policy() {
        let template = "x#server{TOKENLOG_SURELY_UNSET_KEY}#y";
        assert!(handle_render(template, "", "info", false).is_err());
        assert_eq!(handle_render(template, "", "info", true).unwrap(), "xy");
    }

    #[test]
    fn test_render_rejects_unknown_level() {
        assert!(handle_render("#level#", "", "loud", false).is_err());
    }
}
