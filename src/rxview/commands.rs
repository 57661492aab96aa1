//! Settings commands and their structured results.
//!
//! Like the rest of the library these never print: they return a
//! [`CmdResult`] with messages the client decides how to show.

use crate::config::RxviewConfig;
use crate::error::Result;
use crate::workspace::{RxviewPaths, Scope};
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub config: Option<RxviewConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_config(mut self, config: RxviewConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn config(paths: &RxviewPaths, scope: Scope, action: ConfigAction) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope);
    match action {
        ConfigAction::ShowAll => {
            let config = RxviewConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = RxviewConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = RxviewConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

/// Creates the scope directory with a default config if there is none yet.
pub fn init(paths: &RxviewPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope);
    fs::create_dir_all(dir)?;

    let mut result = CmdResult::default();
    if dir.join("config.json").exists() {
        result.add_message(CmdMessage::warning(format!(
            "rxview already initialized at {}",
            dir.display()
        )));
    } else {
        RxviewConfig::default().save(dir)?;
        result.add_message(CmdMessage::success(format!(
            "Initialized rxview at {}",
            dir.display()
        )));
    }
    Ok(result)
}
