use crate::viewer::{SignalBuffer, ViewerError};
/// Every 10th raw sample is enough for the thumbnail strip.
pub const DEFAULT_DECIMATION: usize = 10;
/// One decimated sample. The source index is kept so the overview can be
/// placed on the same index axis as the full-resolution buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverviewPoint {
    pub source_index: usize,
    pub value: f32,
}
/// Decimate `buffer` with the given stride, taking indices 0, D, 2D, ...
///
/// Yields exactly `ceil(len / stride)` points; an empty buffer yields an
/// empty series. Pure: the output depends only on the buffer and stride,
/// never on any viewport.
pub fn downsample(buffer: &SignalBuffer, stride: usize) -> Result<Vec<OverviewPoint>, ViewerError> {
    if stride == 0 {
        return Err(ViewerError::InvalidDecimation);
    }
    Ok(buffer
        .samples()
        .iter()
        .step_by(stride)
        .enumerate()
        .map(|(i, &value)| OverviewPoint {
            source_index: i * stride,
            value,
        })
        .collect())
}
/// Memoized overview series, keyed by (buffer revision, stride).
///
/// The overview only depends on the raw samples, so it is recomputed when
/// the buffer changes and reused across viewport updates.
#[derive(Debug)]
pub struct OverviewCache {
    stride: usize,
    key: Option<(u64, usize)>,
    points: Vec<OverviewPoint>,
}
impl OverviewCache {
    pub fn new(stride: usize) -> Result<Self, ViewerError> {
        if stride == 0 {
            return Err(ViewerError::InvalidDecimation);
        }
        Ok(Self {
            stride,
            key: None,
            points: Vec::new(),
        })
    }
    pub fn series(&mut self, buffer: &SignalBuffer) -> &[OverviewPoint] {
        let key = (buffer.revision(), self.stride);
        if self.key != Some(key) {
            log::debug!(
                "recomputing overview for '{}': {} samples, stride {}",
                buffer.label(),
                buffer.len(),
                self.stride
            );
            // Stride was validated in the constructor.
            self.points = downsample(buffer, self.stride).unwrap_or_default();
            self.key = Some(key);
        }
        &self.points
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::LeadInput;
    fn buffer_of(len: usize) -> SignalBuffer {
        let samples = (0..len).map(|i| i as f32).collect();
        SignalBuffer::new(LeadInput::new(samples, "Lead I")).unwrap()
    }
    #[test]
    fn output_length_is_ceil_of_len_over_stride() {
        for (len, stride, expected) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (95, 10, 10), (100, 1, 100)] {
            let series = downsample(&buffer_of(len), stride).unwrap();
            assert_eq!(series.len(), expected, "len={len} stride={stride}");
        }
    }
    #[test]
    fn source_indices_step_by_stride() {
        let series = downsample(&buffer_of(95), 10).unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.first().unwrap().source_index, 0);
        assert_eq!(series.last().unwrap().source_index, 90);
        assert_eq!(series.last().unwrap().value, 90.0);
    }
    #[test]
    fn zero_stride_is_rejected() {
        assert!(matches!(
            downsample(&buffer_of(8), 0),
            Err(ViewerError::InvalidDecimation)
        ));
        assert!(matches!(OverviewCache::new(0), Err(ViewerError::InvalidDecimation)));
    }
    #[test]
    fn cache_recomputes_only_when_the_buffer_changes() {
        let first = buffer_of(40);
        let second = buffer_of(40);
        let mut cache = OverviewCache::new(10).unwrap();
        assert_eq!(cache.series(&first).len(), 4);
        let key_after_first = cache.key;
        cache.series(&first);
        assert_eq!(cache.key, key_after_first);
        cache.series(&second);
        assert_ne!(cache.key, key_after_first);
    }
}
