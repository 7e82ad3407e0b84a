//! Input file handling
//!
//! The CLI reads two TOML files:
//! - the native control description (attributes plus `[[option]]` items)
//! - an optional widget configuration (`searchable`, `placeholder`, `[[data]]`)

use anyhow::{Context, Result};
use blinc_select::{NativeSelect, SelectConfig};
use std::fs;
use std::path::Path;

/// Load a native control description
pub fn load_control(path: &Path) -> Result<NativeSelect> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read control file {}", path.display()))?;
    NativeSelect::from_toml(&source)
        .with_context(|| format!("Failed to parse control file {}", path.display()))
}

/// Load widget configuration, falling back to defaults
pub fn load_config(path: Option<&Path>) -> Result<SelectConfig> {
    let Some(path) = path else {
        return Ok(SelectConfig::default());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    SelectConfig::from_toml(&source)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
