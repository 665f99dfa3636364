use crate::output::Output;
use animeta_config::{Config, PathManager};
use color_eyre::eyre::eyre;

/// Secrets are never echoed whole; enough of the prefix survives to tell
/// credentials apart.
fn mask(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.chars().count() <= 4 {
        return "****".to_string();
    }
    let prefix: String = value.chars().take(4).collect();
    format!("{}****", prefix)
}

fn masked(config: &Config) -> Config {
    let mut masked = config.clone();
    if let Some(mal) = masked.mal.as_mut() {
        mal.client_id = mask(&mal.client_id);
        mal.client_secret = mask(&mal.client_secret);
    }
    if let Some(kitsu) = masked.kitsu.as_mut() {
        kitsu.client_id = mask(&kitsu.client_id);
        kitsu.client_secret = mask(&kitsu.client_secret);
    }
    masked
}

pub fn run_show(config: &Config, output: &Output) -> color_eyre::Result<()> {
    let masked = masked(config);
    if output.is_json() {
        output.json(&serde_json::to_value(&masked)?);
        return Ok(());
    }
    let rendered = toml::to_string_pretty(&masked)?;
    output.println(rendered);
    Ok(())
}

pub fn run_init(paths: &PathManager, output: &Output) -> color_eyre::Result<()> {
    let path = paths.config_file();
    if path.exists() {
        output.warn(format!("Config already exists at {}", path.display()));
        return Ok(());
    }
    paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    // The seeded config logs to the managed location out of the box.
    let mut config = Config::default();
    config.logging.file = Some(paths.log_file());
    config.save_to_file(&path).map_err(|e| eyre!("{}", e))?;
    output.success(format!("Wrote default config to {}", path.display()));
    Ok(())
}

pub fn run_path(paths: &PathManager, output: &Output) -> color_eyre::Result<()> {
    output.println(paths.config_file().display().to_string());
    Ok(())
}
