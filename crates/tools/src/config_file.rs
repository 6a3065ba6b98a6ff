//! TOML persistence for `SimConfig`.
//! This module exists so binaries share one loading and validation path.
//! It does not pick default locations; callers pass explicit paths.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bilebio_core::SimConfig;

/// Reads, parses and validates a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: SimConfig = toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    config.validate().with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(config)
}

/// Writes `config` through a temporary sibling file and a rename.
pub fn write_config_atomic(config: &SimConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(config).context("failed to serialize config")?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, text)
        .with_context(|| format!("failed to write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to move config into {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use bilebio_core::config::{Brush, GrowthFocus};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("sim.toml");
        fs::write(
            &path,
            "[region]\nwidth = 32\nbrush = \"single\"\n\n[growth]\nfocus = \"target\"\n\n[[levels]]\nnumber_of_roots = 2\n",
        )
        .expect("write config");

        let config = load_config(&path).expect("config should load");
        assert_eq!(config.region.width, 32);
        assert_eq!(config.region.height, 20);
        assert_eq!(config.region.brush, Brush::Single);
        assert_eq!(config.growth.focus, GrowthFocus::Target);
        assert_eq!(config.level_settings(0).number_of_roots, 2);
    }

    #[test]
    fn invalid_values_are_reported_with_the_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[growth]\noffshoot_chance = 2.0\n").expect("write config");

        let err = load_config(&path).expect_err("probability above one is rejected");
        let message = format!("{err:#}");
        assert!(message.contains("bad.toml"), "{message}");
        assert!(message.contains("growth.offshoot_chance"), "{message}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn written_config_loads_back_and_leaves_no_temp_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("sim.toml");
        let mut config = SimConfig::default();
        config.region.carve_passes = Some(12);
        config.growth.offshoot_chance = 0.25;

        write_config_atomic(&config, &path).expect("write should succeed");
        assert_eq!(load_config(&path).expect("load should succeed"), config);
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
