use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoplError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected response {status}: {body}")]
    Unexpected { status: u16, body: String },

    #[error("no running Joplin instance found on ports 41184-41194")]
    AppNotFound,

    #[error("pairing request was rejected in Joplin")]
    PairingRejected,

    #[error("no answer from the user after {0} attempts")]
    PairingTimeout(u32),

    #[error("unrecognized pairing status '{0}'")]
    PairingStatus(String),

    #[error("could not resolve {kind} '{name}': {matches} matches, expected exactly one")]
    Resolve {
        kind: &'static str,
        name: String,
        matches: usize,
    },

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("unknown item type '{0}'")]
    UnknownItemType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, JoplError>;
