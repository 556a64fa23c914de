use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Cloudability API key not found. Set it in one of:\n\
        - CLOUDABILITY_APIKEY environment variable\n\
        - api_key in ~/.config/cloudability/config.yaml\n\
        - a file given by CLOUDABILITY_CONFIG_PATH"
    )]
    MissingApiKey,

    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
