use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Unsupported event revision {revision} (highest known is {max})")]
    UnsupportedRevision { revision: u8, max: u8 },

    #[error("Malformed agent #{index}: {message}")]
    MalformedAgent { index: u32, message: String },

    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    #[error("Invalid encounter configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.message().to_string())
    }
}
