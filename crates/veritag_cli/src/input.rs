//! Loading of the source file and the configuration shared by all commands.

use crate::GlobalArgs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use veritag_config::{ConfigError, VeritagConfig};
use veritag_diagnostics::DiagnosticCode;
use veritag_source::SourceText;

/// A source file that could not be read.
#[derive(Debug, Error)]
#[error("[{code}] cannot read {}: {source}", path.display())]
pub struct UnreadableInput {
    code: DiagnosticCode,
    path: PathBuf,
    source: io::Error,
}

/// Reads `path` into a [`SourceText`] named after it.
pub fn read_source(path: &Path) -> Result<SourceText, UnreadableInput> {
    let source = SourceText::load(path).map_err(|source| UnreadableInput {
        code: DiagnosticCode::UNREADABLE_INPUT,
        path: path.to_path_buf(),
        source,
    })?;
    debug!(file = %path.display(), bytes = source.len(), "loaded source");
    Ok(source)
}

/// Loads the configuration named by `--config`, or `veritag.toml` in the
/// working directory when present.
pub fn load_config(global: &GlobalArgs) -> Result<VeritagConfig, ConfigError> {
    match &global.config {
        Some(path) => veritag_config::load_config_file(path),
        None => veritag_config::load_config(&std::env::current_dir()?),
    }
}
