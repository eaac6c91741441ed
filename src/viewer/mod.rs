// src/viewer/mod.rs
// Windowed-viewing core: buffers, decimation, viewport and drag handling.
pub mod buffer;
pub mod channel;
pub mod downsample;
pub mod drag;
pub mod error;
pub mod render;
pub mod viewport;
// Re-export the working set so callers can use `crate::viewer::*` types.
pub use buffer::{LeadInput, SignalBuffer, DEFAULT_SAMPLE_RATE_HZ};
pub use channel::LeadViewer;
pub use downsample::{downsample, OverviewCache, OverviewPoint, DEFAULT_DECIMATION};
pub use drag::{DragController, TrackGeometry, FALLBACK_TRACK_WIDTH_PX};
pub use error::ViewerError;
pub use render::{detail_series, thumb_geometry, DetailPoint, ThumbGeometry, MIN_THUMB_WIDTH_PX};
pub use viewport::{Viewport, DEFAULT_VIEW_WIDTH};
