//! Parsing and validation of `veritag.toml` configuration files.
//!
//! The file can replace the tokenizer's [`Lexicon`](veritag_engine::Lexicon)
//! and choose the colors used when printing a token stream.

#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_file, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
