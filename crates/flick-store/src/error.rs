use std::fmt;

use flick_core::ConfigError;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Csv(csv::Error),
    TomlParse(toml::de::Error),
    TomlWrite(toml::ser::Error),
    Config(ConfigError),
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {e}"),
            StoreError::Csv(e) => write!(f, "CSV error: {e}"),
            StoreError::TomlParse(e) => write!(f, "invalid config file: {e}"),
            StoreError::TomlWrite(e) => write!(f, "failed to render config: {e}"),
            StoreError::Config(e) => write!(f, "invalid config: {e}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Csv(e) => Some(e),
            StoreError::TomlParse(e) => Some(e),
            StoreError::TomlWrite(e) => Some(e),
            StoreError::Config(e) => Some(e),
            StoreError::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<csv::Error> for StoreError {
    fn from(e: csv::Error) -> Self {
        StoreError::Csv(e)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(e: toml::de::Error) -> Self {
        StoreError::TomlParse(e)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(e: toml::ser::Error) -> Self {
        StoreError::TomlWrite(e)
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::Config(e)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
