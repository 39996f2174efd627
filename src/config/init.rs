use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::schema::Config;

const HEADER: &str = "\
# iclr-points configuration
# dataset.path or dataset.url selects the per-year document (default: ./per_year_data.json)
";

/// Write the default configuration to `path` atomically.
///
/// Refuses to replace an existing file unless `force` is set. Parent
/// directories are created as needed.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
        }
    }

    let yaml = serde_saphyr::to_string(&Config::default())
        .context("Failed to serialize default config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes()).context("Failed to write config")?;
    file.write_all(yaml.as_bytes()).context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    Ok(())
}
