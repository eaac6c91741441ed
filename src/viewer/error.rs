use thiserror::Error;
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("decimation stride must be at least 1")]
    InvalidDecimation,
    #[error("sample rate must be greater than zero")]
    InvalidSampleRate,
    #[error("lead length mismatch: expected {expected}, got {actual}")]
    LeadMismatch { expected: usize, actual: usize },
    #[error("failed to render snapshot: {0}")]
    Snapshot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ViewerError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ViewerError::Snapshot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for ViewerError {
    fn from(value: image::ImageError) -> Self {
        ViewerError::Snapshot(value.to_string())
    }
}
