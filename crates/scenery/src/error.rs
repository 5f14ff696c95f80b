// ---------------------------------------------------------------------------
// SceneryError: everything that can go wrong while decorating the host scene
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors raised by the scenery layer.
///
/// None of these are fatal to the host game: callers log them and carry on
/// with whatever subset of the decorations is available.
#[derive(Debug)]
pub enum SceneryError {
    /// A model could not be fetched or parsed.
    AssetLoad { path: String, reason: String },
    /// The player vehicle node was not found within the allowed searches.
    SceneNotFound { attempts: u32 },
    /// Catalog data is structurally valid JSON but semantically wrong.
    InvalidCatalog(String),
    /// Configuration parsed but holds an unusable value.
    InvalidConfig(String),
    /// JSON configuration could not be parsed.
    Config(serde_json::Error),
}

impl fmt::Display for SceneryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneryError::AssetLoad { path, reason } => {
                write!(f, "Failed to load asset '{path}': {reason}")
            }
            SceneryError::SceneNotFound { attempts } => write!(
                f,
                "Player vehicle not found in scene after {attempts} search(es)"
            ),
            SceneryError::InvalidCatalog(msg) => write!(f, "Invalid catalog: {msg}"),
            SceneryError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            SceneryError::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for SceneryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneryError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SceneryError {
    fn from(e: serde_json::Error) -> Self {
        SceneryError::Config(e)
    }
}
