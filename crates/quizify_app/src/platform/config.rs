//! RON configuration file, overridden by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use quizify_core::DEFAULT_QUESTIONS;
use quizify_engine::{SubmitSettings, DEFAULT_ENDPOINT};
use quizify_logging::LogDestination;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;

pub const CONFIG_FILENAME: &str = "quizify.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub default_question_count: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let submit = SubmitSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            default_question_count: DEFAULT_QUESTIONS,
            connect_timeout_secs: submit.connect_timeout.as_secs(),
            request_timeout_secs: submit.request_timeout.map(|t| t.as_secs()),
            max_response_bytes: submit.max_response_bytes,
            output_dir: PathBuf::from("output"),
            log_destination: LogDestination::File,
            log_file: PathBuf::from("quizify.log"),
        }
    }
}

impl AppConfig {
    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_response_bytes: self.max_response_bytes,
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(count) = cli.count {
            self.default_question_count = count;
        }
        if let Some(dir) = &cli.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(log) = cli.log {
            self.log_destination = log.into();
        }
    }
}

/// Load the config file.
///
/// An explicit `path` must exist. Without one, `./quizify.ron` is used when
/// present and defaults otherwise.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILENAME), false),
    };

    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };

    parse(&content).map_err(|message| ConfigError::Parse { path, message })
}

fn parse(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}
