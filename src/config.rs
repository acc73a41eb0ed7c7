use crate::{error::Error, Res, APP_NAME};
use serde::Deserialize;
use std::{fs, io};

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub project: ProjectConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    pub git_executable: String,
    pub log_cap: usize,
    pub refresh_on_file_change: bool,
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub root_marker: String,
    pub sidecar_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("Failed to parse default_config.toml")
    }
}

pub fn init_config() -> Res<Config> {
    let config = if let Some(app_dirs) = directories::ProjectDirs::from("", "", APP_NAME) {
        let path = app_dirs.config_dir().join("config.toml");

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(Error::Config)?,
            Err(err) => match err.kind() {
                io::ErrorKind::NotFound => Config::default(),
                reason => {
                    log::error!("Error reading config file {:?} {:?}", &path, reason);
                    Config::default()
                }
            },
        }
    } else {
        Config::default()
    };

    Ok(config)
}
