use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::scoring::RulesConfig;

/// Config written by `init`: every rule parameter spelled out at its default.
pub fn default_config() -> Config {
    Config {
        rules: Some(RulesConfig::default()),
    }
}

/// Write the default config to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&default_config())
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    info!(path = %path.display(), "wrote default config");
    Ok(())
}
