use thiserror::Error;

pub type KilnResult<T> = Result<T, KilnError>;

#[derive(Error, Debug)]
pub enum KilnError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Release error: {0}")]
    Release(String),

    /// The release host answered with a 5xx status.
    /// Unlike a client error this aborts resolution instead of reporting a miss.
    #[error("Server error from {url}: HTTP {status}")]
    Server { url: String, status: u16 },

    #[error("Unpack error: {0}")]
    Unpack(String),

    #[error("Build error: {0}")]
    Build(String),
}
