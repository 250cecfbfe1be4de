use thiserror::Error;

/// Top-level error type for the Lemnis viewer core.
#[derive(Debug, Error)]
pub enum LemnisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to scene configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to scene entities.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("object not found: {0}")]
    ObjectNotFound(String),
}

/// Convenience type alias for results using [`LemnisError`].
pub type Result<T> = std::result::Result<T, LemnisError>;
