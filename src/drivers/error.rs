use std::path::PathBuf;
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("spectrum acquisition failed: {0}")]
    Acquisition(String),
    #[error("recorded source has no frames left")]
    SourceExhausted,
    #[error("operation not supported by this source: {0}")]
    Unsupported(&'static str),
    #[error("no frame rendered yet; pump the pipeline at least once")]
    FrameUnavailable,
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to encode preview: {0}")]
    Encode(#[from] image::ImageError),
    #[error("config error at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigErrorKind,
    },
}
#[derive(Debug, Error)]
pub enum ConfigErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
impl ScopeError {
    pub(crate) fn config(path: impl Into<PathBuf>, source: impl Into<ConfigErrorKind>) -> Self {
        ScopeError::Config {
            path: path.into(),
            source: source.into(),
        }
    }
}
// Backend errors are generic over the drawing backend, so they are flattened to text.
impl<E> From<DrawingAreaErrorKind<E>> for ScopeError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ScopeError::Plot(err.to_string())
    }
}
