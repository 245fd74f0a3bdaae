use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

const APP_DIR: &str = "quickdns";
const PROFILES_FILE: &str = "profiles.json";
const LOGS_DIR: &str = "logs";

/// Overrides the profile store location.
pub const PROFILES_ENV: &str = "QUICKDNS_PROFILES";

/// Filesystem locations, resolved once at startup.
#[derive(Clone, PartialEq, Debug)]
pub struct AppPaths {
    pub profiles: PathBuf,
    pub logs: PathBuf,
}

impl AppPaths {
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(env::var_os(PROFILES_ENV).map(PathBuf::from))
    }

    fn resolve_with(profiles_override: Option<PathBuf>) -> Result<Self> {
        let app_dir = app_dir()?;
        let profiles = profiles_override
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| app_dir.join(PROFILES_FILE));

        Ok(Self {
            profiles,
            logs: app_dir.join(LOGS_DIR),
        })
    }
}

fn app_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .or_else(dirs::data_local_dir)
        .ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join(APP_DIR))
}
