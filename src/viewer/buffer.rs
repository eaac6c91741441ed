use std::sync::atomic::{AtomicU64, Ordering};
use crate::viewer::ViewerError;
/// Clinical ECG is commonly digitized at 200 samples per second.
pub const DEFAULT_SAMPLE_RATE_HZ: f32 = 200.0;
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);
/// Complete sample array for one lead, as delivered by the fetch layer.
#[derive(Clone, Debug)]
pub struct LeadInput {
    pub samples: Vec<f32>,
    pub label: String,
    pub sample_rate_hz: f32,
}
impl LeadInput {
    pub fn new(samples: Vec<f32>, label: impl Into<String>) -> Self {
        Self {
            samples,
            label: label.into(),
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
        }
    }
}
/// Immutable sample sequence for one lead plus its sampling rate.
///
/// The buffer never changes for the lifetime of a viewer instance; the
/// `revision` tag identifies it so derived series can be cached against it.
#[derive(Clone, Debug)]
pub struct SignalBuffer {
    samples: Vec<f32>,
    label: String,
    sample_rate_hz: f32,
    revision: u64,
}
impl SignalBuffer {
    pub fn new(input: LeadInput) -> Result<Self, ViewerError> {
        if input.sample_rate_hz <= 0.0 {
            return Err(ViewerError::InvalidSampleRate);
        }
        Ok(Self {
            samples: input.samples,
            label: input.label,
            sample_rate_hz: input.sample_rate_hz,
            revision: NEXT_REVISION.fetch_add(1, Ordering::Relaxed),
        })
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }
    pub fn revision(&self) -> u64 {
        self.revision
    }
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate_hz
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn rejects_non_positive_sample_rate() {
        let mut input = LeadInput::new(vec![0.0; 4], "Lead I");
        input.sample_rate_hz = 0.0;
        assert!(matches!(
            SignalBuffer::new(input),
            Err(ViewerError::InvalidSampleRate)
        ));
    }
    #[test]
    fn empty_lead_is_a_valid_buffer() {
        let buffer = SignalBuffer::new(LeadInput::new(Vec::new(), "Lead I")).unwrap();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.duration_seconds(), 0.0);
    }
    #[test]
    fn revisions_distinguish_buffers() {
        let a = SignalBuffer::new(LeadInput::new(vec![1.0], "Lead I")).unwrap();
        let b = SignalBuffer::new(LeadInput::new(vec![1.0], "Lead II")).unwrap();
        assert_ne!(a.revision(), b.revision());
    }
}
