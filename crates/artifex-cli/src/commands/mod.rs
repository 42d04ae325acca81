//! Subcommand implementations

pub mod compile;
pub mod diff;
pub mod ingest;
pub mod lint;
pub mod render;

use artifex_core::errors::{ExError, ExErrorKind};
use artifex_core::ArtifexConfig;
use artifex_engine::Engine;
use clap::{Args, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// How a successful command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }

    pub fn exit_code(self) -> ExitCode {
        match self {
            Verdict::Valid => ExitCode::SUCCESS,
            Verdict::Invalid => ExitCode::from(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Store location shared by the stateful subcommands
#[derive(Debug, Args)]
pub struct StoreArgs {
    #[arg(long, default_value = ".artifex/store.db")]
    pub db: PathBuf,

    #[arg(long, default_value = ".artifex/cas")]
    pub cas: PathBuf,
}

impl StoreArgs {
    pub fn open(&self, config: ArtifexConfig) -> Result<Engine, ExError> {
        Engine::open(&self.db, &self.cas, config)
    }
}

pub fn load_config(path: &Path) -> Result<ArtifexConfig, ExError> {
    ArtifexConfig::load(path).map_err(|e| ExError::from(e).with_op("load_config"))
}

/// Write to stdout; a closed pipe ends the command quietly
pub fn emit(text: &str) -> Result<(), ExError> {
    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(ExError::new(ExErrorKind::Io)
            .with_op("write_stdout")
            .with_message(e.to_string())),
    }
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ExError> {
    serde_json::to_string_pretty(value)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("render_json")
                .with_message(e.to_string())
        })
}
