use std::io;

/// Errors produced while rendering element trees.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A component asked for a context which no ancestor provides.
    #[error("missing context `{type_name}`, render inside its provider")]
    MissingContext {
        /// The type name of the missing context.
        type_name: &'static str,
    },

    /// The layout engine rejected the tree.
    #[error("layout failed: {0}")]
    Layout(String),

    /// A theme name could not be parsed.
    #[error("unknown theme `{0}`, expected dark, light or system")]
    UnknownTheme(String),

    /// The theme store could not be read or written.
    #[error("theme store: {0}")]
    ThemeStore(String),

    /// Writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A stored value could not be encoded or decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<taffy::TaffyError> for Error {
    fn from(e: taffy::TaffyError) -> Self {
        Self::Layout(e.to_string())
    }
}

/// A specialized result type for rendering.
pub type Result<T, E = Error> = std::result::Result<T, E>;
