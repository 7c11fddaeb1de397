/// Error type tests
use std::path::PathBuf;
use tokenlog::error::*;

// ==================== ConfigError Tests ====================

#[test]
fn test_config_error_not_found() {
    let error = ConfigError::NotFound(PathBuf::from("/nonexistent/tokenlog.toml"));
    let error_msg = format!("{error}");
    assert!(error_msg.contains("not found"));
    assert!(error_msg.contains("/nonexistent/tokenlog.toml"));
}

#[test]
fn test_config_error_invalid_log_level() {
    let error = ConfigError::InvalidLogLevel {
        level: "VERBOSE".to_string(),
        valid_levels: vec!["ERROR".to_string(), "WARN".to_string()],
    };
    let error_msg = format!("{error}");
    assert!(error_msg.contains("VERBOSE"));
    assert!(error_msg.contains("ERROR, WARN"));
}

#[test]
fn test_config_error_unsupported_argument() {
    let error = ConfigError::UnsupportedArgument {
        kind: "integer".to_string(),
    };
    assert!(format!("{error}").contains("integer"));
}

// ==================== LogError Tests ====================

#[test]
fn test_log_error_messages() {
    assert!(
        LogError::UnknownLevel {
            level: "LOUD".to_string()
        }
        .to_string()
        .contains("LOUD")
    );
    assert!(
        LogError::UnknownMethod {
            method: "shout".to_string()
        }
        .to_string()
        .contains("shout")
    );
    assert!(LogError::LevelRequired.to_string().contains("required"));
}

// ==================== Conversions ====================

#[test]
fn test_error_from_conversions() {
    let error: Error = LogError::LevelRequired.into();
    assert!(format!("{error}").starts_with("Log error:"));

    let error: Error = TemplateError::MissingServerKey {
        key: "HOST".to_string(),
    }
    .into();
    assert!(format!("{error}").contains("HOST"));

    let error: Error = FileError::AlreadyExists {
        path: PathBuf::from("tokenlog.toml"),
    }
    .into();
    assert!(format!("{error}").starts_with("File error:"));
}

#[test]
fn test_error_macros() {
    let error = tokenlog::config_error!(InvalidValue {
        field: "logFormat".to_string(),
        value: String::new(),
        reason: "Value cannot be empty".to_string(),
    });
    assert!(matches!(
        error,
        Error::Config(ConfigError::InvalidValue { .. })
    ));

    let error = tokenlog::log_error!(LevelRequired);
    assert!(matches!(error, Error::Log(LogError::LevelRequired)));

    let error = tokenlog::file_error!(LockFailed {
        path: PathBuf::from("app.log"),
        reason: "busy".to_string(),
    });
    assert!(format!("{error}").contains("Failed to lock file app.log"));
}
