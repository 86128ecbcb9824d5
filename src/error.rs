use std::{io, path::PathBuf};

/// Errors produced by the chat shell.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The email and password don't match an account.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Sign-up was attempted for an email which already has an account.
    #[error("An account with this email already exists")]
    AccountExists,

    /// The email address is malformed.
    #[error("Enter a valid email address")]
    InvalidEmail,

    /// The password is too short.
    #[error("Password should be at least {min_len} characters")]
    WeakPassword {
        /// The minimum accepted length.
        min_len: usize,
    },

    /// A sidebar tab name was not recognized.
    #[error("unknown tab \"{0}\", expected timeline, goals or memories")]
    UnknownTab(String),

    /// A section name was not recognized for the active tab.
    #[error("unknown section \"{section}\" in the {tab} tab")]
    UnknownSection { tab: String, section: String },

    /// An interactive command could not be parsed.
    #[error("{0}")]
    InvalidCommand(String),

    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid TOML for the expected settings.
    #[error("invalid config {path}: {source}")]
    ParseConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Rendering or theme handling failed.
    #[error(transparent)]
    Ui(#[from] rivena::Error),
}

/// A specialized result type for the chat shell.
pub type Result<T, E = Error> = std::result::Result<T, E>;
