pub mod defaults;
pub mod types;

pub use types::{ConfigError, MonitorConfig};

use crate::core::network::target::Target;
use std::path::{Path, PathBuf};

impl MonitorConfig {
    /// Default config location: `~/.argus/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(home.join(".argus").join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(ConfigError::HomeDirNotFound) => return Ok(Self::default()),
                Err(e) => return Err(e),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default configuration to `path` (or the default location)
    ///
    /// Refuses to overwrite an existing file.
    pub fn init(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::default().to_toml()?)?;
        Ok(path)
    }

    /// Print the effective configuration as TOML
    pub fn print(&self) -> Result<(), ConfigError> {
        println!("{}", self.to_toml()?);
        Ok(())
    }

    /// Validate settings that would make every probe cycle fail
    pub fn check(&self) -> Result<(), ConfigError> {
        Target::parse(&self.url)?;
        if self.failure_threshold == 0 {
            return Err(ConfigError::ZeroFailureThreshold);
        }
        Ok(())
    }
}
