use std::fs;
use std::io;
use std::path::Path;

use super::{AppConfig, ConfigError};

/// Read and parse a YAML config; missing files map to `ConfigError::NotFound`
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::debug!(path = %path.display(), "Parsing donut config");
    Ok(serde_yaml::from_str(&content)?)
}
