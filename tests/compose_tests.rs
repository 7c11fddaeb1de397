/// Template compositor tests
use chrono::{DateTime, Local, TimeZone};
use tokenlog::error::{Error, TemplateError};
use tokenlog::{CallSite, Compositor, MissingKeyPolicy, ServerContext, Template};

fn fixed_2024() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap()
}

fn compositor() -> Compositor {
    Compositor::new(
        ServerContext::new()
            .with("SCRIPT_NAME", "index.rs")
            .with("HOST", "web-1"),
        MissingKeyPolicy::Fail,
    )
    .with_clock(fixed_2024)
}

// ==================== Plain templates ====================

#[test]
fn test_static_template_unchanged() {
    let out = compositor().compose("static.log", "msg", "INFO", None).unwrap();
    assert_eq!(out, "static.log");
}

#[test]
fn test_unknown_tokens_untouched() {
    let template = "#foo# #bar{x}# #date# #text{y}# ## #";
    let out = compositor().compose(template, "msg", "INFO", None).unwrap();
    assert_eq!(out, template);
}

#[test]
fn test_template_not_mutated() {
    let template = String::from("#level# #text#");
    let _ = compositor().compose(&template, "msg", "WARN", None).unwrap();
    assert_eq!(template, "#level# #text#");
}

// ==================== Token families ====================

#[test]
fn test_end_to_end_example() {
    let out = compositor()
        .compose("[#date{Y}#][#level#] #text#", "disk full", "FATAL", None)
        .unwrap();
    assert_eq!(out, "[2024][FATAL] disk full");
}

#[test]
fn test_date_uses_current_year() {
    let c = Compositor::new(ServerContext::new(), MissingKeyPolicy::Fail);
    let out = c.compose("#date{Y}#", "", "", None).unwrap();
    assert_eq!(out.len(), 4);
    assert!(out.chars().all(|ch| ch.is_ascii_digit()));
    assert_eq!(out, Local::now().format("%Y").to_string());
}

#[test]
fn test_date_format_and_repeats() {
    let out = compositor()
        .compose("#date{Y-m-d H:i:s}# / #date{Ymd}#", "", "", None)
        .unwrap();
    assert_eq!(out, "2024-06-01 12:30:45 / 20240601");
}

#[test]
fn test_default_file_name_format() {
    let out = compositor()
        .compose("default-#date{Ymd}#.log", "", "", None)
        .unwrap();
    assert_eq!(out, "default-20240601.log");
}

#[test]
fn test_server_tokens_replace_all() {
    let out = compositor()
        .compose(
            "log_#server{SCRIPT_NAME}#_#server{HOST}#_#server{SCRIPT_NAME}#.log",
            "",
            "",
            None,
        )
        .unwrap();
    assert_eq!(out, "log_index.rs_web-1_index.rs.log");
}

#[test]
fn test_missing_server_key_fails() {
    let err = compositor()
        .compose("#server{NOPE}#", "", "", None)
        .unwrap_err();
    match err {
        Error::Template(TemplateError::MissingServerKey { key }) => assert_eq!(key, "NOPE"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_server_key_empty_policy() {
    let mut c = compositor();
    c.set_missing_key_policy(MissingKeyPolicy::Empty);
    let out = c.compose("[#server{NOPE}#]", "", "", None).unwrap();
    assert_eq!(out, "[]");
}

#[test]
fn test_level_replaces_every_occurrence() {
    let out = compositor()
        .compose("#level#-#level#-#level#", "", "DEBUG", None)
        .unwrap();
    assert_eq!(out, "DEBUG-DEBUG-DEBUG");
}

#[test]
fn test_text_replaced_only_once() {
    let out = compositor()
        .compose("#text# | #text# | #text#", "hello", "INFO", None)
        .unwrap();
    assert_eq!(out, "hello | #text# | #text#");
}

#[test]
fn test_text_payload_not_reexpanded() {
    let out = compositor()
        .compose("#text# #level#", "payload #level# #date{Y}#", "WARN", None)
        .unwrap();
    assert_eq!(out, "payload #level# #date{Y}# WARN");
}

#[test]
fn test_file_and_line_tokens() {
    let site = CallSite::new("/srv/app/src/handler.rs", 88);
    let out = compositor()
        .compose("#file#:#line# #file#", "", "", Some(&site))
        .unwrap();
    assert_eq!(out, "handler.rs:88 handler.rs");
}

#[test]
fn test_default_log_format() {
    let site = CallSite::new("main.rs", 3);
    let out = compositor()
        .compose(
            tokenlog::constants::DEFAULT_LOG_FORMAT,
            "started",
            "ERROR",
            Some(&site),
        )
        .unwrap();
    assert_eq!(out, "[2024-06-01 12:30:45]\t[ERROR]\t[main.rs]\t[3]\tstarted");
}

// ==================== Parsed templates ====================

#[test]
fn test_parsed_template_renders_repeatedly() {
    let template = Template::parse("#level#: #text#");
    let c = compositor();
    assert_eq!(c.render(&template, "a", "INFO", None).unwrap(), "INFO: a");
    assert_eq!(c.render(&template, "b", "WARN", None).unwrap(), "WARN: b");
    assert_eq!(template.source(), "#level#: #text#");
}
