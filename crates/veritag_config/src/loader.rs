//! Configuration file loading and validation.

use crate::convert::{category_by_name, parse_color};
use crate::error::ConfigError;
use crate::types::{LexiconSection, VeritagConfig};
use std::path::Path;

/// The file name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "veritag.toml";

/// Loads `<dir>/veritag.toml`, or returns the default configuration when the
/// directory has none.
pub fn load_config(dir: &Path) -> Result<VeritagConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.is_file() {
        return Ok(VeritagConfig::default());
    }
    load_config_file(&path)
}

/// Loads and validates the configuration at an explicit path.
pub fn load_config_file(path: &Path) -> Result<VeritagConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `veritag.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<VeritagConfig, ConfigError> {
    let config: VeritagConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates values that deserialize fine but cannot be used.
fn validate_config(config: &VeritagConfig) -> Result<(), ConfigError> {
    for (category, color) in &config.colors {
        if category_by_name(category).is_none() {
            return Err(ConfigError::ValidationError(format!(
                "unknown category '{category}' in [colors]"
            )));
        }
        parse_color(color)?;
    }
    if let Some(lexicon) = &config.lexicon {
        validate_lexicon(lexicon)?;
    }
    Ok(())
}

fn validate_lexicon(lexicon: &LexiconSection) -> Result<(), ConfigError> {
    if let Some(block) = &lexicon.block_comment {
        match block.as_slice() {
            [] => {}
            [open, close] if !open.is_empty() && !close.is_empty() => {}
            _ => {
                return Err(ConfigError::ValidationError(
                    "lexicon.block_comment must be [open, close] or []".to_string(),
                ))
            }
        }
    }
    if lexicon.quote.is_some() && lexicon.quote == lexicon.escape {
        return Err(ConfigError::ValidationError(
            "lexicon.quote and lexicon.escape must differ".to_string(),
        ));
    }
    for symbol in lexicon.patterns.keys() {
        if lexicon.reserved.contains_key(symbol) {
            return Err(ConfigError::ValidationError(format!(
                "reserved symbol '{symbol}' is listed in both reserved and patterns"
            )));
        }
    }
    Ok(())
}
