use std::collections::VecDeque;
use crate::drivers::ScopeError;
use crate::types::{BandState, FrequencyRange};
/// Lower bound the reported envelope never rises above (dB).
pub const ENVELOPE_FLOOR_DB: f32 = -120.0;
/// Upper bound the reported envelope never falls below (dB).
pub const ENVELOPE_CEILING_DB: f32 = -5.0;
/// Full-resolution spectrum over one requested range.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectrumFrame {
    pub range: FrequencyRange,
    pub samples: Vec<f64>, // equally spaced bins across `range`
    pub min_db: f32,
    pub max_db: f32,
}
impl SpectrumFrame {
    /// Build a frame, deriving the envelope from `samples`.
    pub fn from_samples(range: FrequencyRange, samples: Vec<f64>) -> Self {
        let (min_db, max_db) = instrument_envelope(&samples);
        Self {
            range,
            samples,
            min_db,
            max_db,
        }
    }
    pub fn bin_width_hz(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }
        self.range.span_hz() / (self.samples.len() - 1) as f64
    }
}
/// Observed min/max of `samples`, widened to at least
/// [`ENVELOPE_FLOOR_DB`]..[`ENVELOPE_CEILING_DB`] so a flat or empty
/// spectrum still yields a sane scale.
pub fn instrument_envelope(samples: &[f64]) -> (f32, f32) {
    let (min, max) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v as f32), hi.max(v as f32))
        });
    (min.min(ENVELOPE_FLOOR_DB), max.max(ENVELOPE_CEILING_DB))
}
/// Anything that can produce spectra on demand and accept band controls.
///
/// Implementations that cross a hardware or network boundary report
/// failures as [`ScopeError::Acquisition`] instead of substituting data.
pub trait SpectrumSource {
    fn request_spectrum(&mut self, range: FrequencyRange) -> Result<SpectrumFrame, ScopeError>;
    fn set_band(
        &mut self,
        band_id: i32,
        center_hz: f64,
        width_hz: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError>;
    fn set_band_threshold(
        &mut self,
        band_id: i32,
        threshold_db: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError>;
    fn set_band_enabled(&mut self, band_id: i32, enabled: bool) -> Result<BandState, ScopeError>;
}
impl<S: SpectrumSource + ?Sized> SpectrumSource for Box<S> {
    fn request_spectrum(&mut self, range: FrequencyRange) -> Result<SpectrumFrame, ScopeError> {
        (**self).request_spectrum(range)
    }
    fn set_band(
        &mut self,
        band_id: i32,
        center_hz: f64,
        width_hz: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError> {
        (**self).set_band(band_id, center_hz, width_hz, is_final)
    }
    fn set_band_threshold(
        &mut self,
        band_id: i32,
        threshold_db: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError> {
        (**self).set_band_threshold(band_id, threshold_db, is_final)
    }
    fn set_band_enabled(&mut self, band_id: i32, enabled: bool) -> Result<BandState, ScopeError> {
        (**self).set_band_enabled(band_id, enabled)
    }
}
/// Replays pre-recorded frames in order, useful for tests and playback.
///
/// Frames are returned as recorded regardless of the requested range.
pub struct RecordedSource {
    queue: VecDeque<SpectrumFrame>,
}
impl RecordedSource {
    pub fn new(frames: impl IntoIterator<Item = SpectrumFrame>) -> Self {
        Self {
            queue: frames.into_iter().collect(),
        }
    }
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
impl SpectrumSource for RecordedSource {
    fn request_spectrum(&mut self, _range: FrequencyRange) -> Result<SpectrumFrame, ScopeError> {
        self.queue.pop_front().ok_or(ScopeError::SourceExhausted)
    }
    fn set_band(&mut self, _: i32, _: f64, _: f64, _: bool) -> Result<BandState, ScopeError> {
        Err(ScopeError::Unsupported("set_band"))
    }
    fn set_band_threshold(&mut self, _: i32, _: f64, _: bool) -> Result<BandState, ScopeError> {
        Err(ScopeError::Unsupported("set_band_threshold"))
    }
    fn set_band_enabled(&mut self, _: i32, _: bool) -> Result<BandState, ScopeError> {
        Err(ScopeError::Unsupported("set_band_enabled"))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn envelope_is_widened_to_instrument_bounds() {
        assert_eq!(instrument_envelope(&[-60.0, -50.0]), (-120.0, -5.0));
        assert_eq!(instrument_envelope(&[-130.0, 3.5]), (-130.0, 3.5));
        assert_eq!(instrument_envelope(&[]), (-120.0, -5.0));
    }
    #[test]
    fn recorded_source_replays_then_reports_exhaustion() {
        let range = FrequencyRange::new(1e9, 2e9);
        let frame = SpectrumFrame::from_samples(range, vec![-90.0, -10.0, 0.0]);
        assert_eq!((frame.min_db, frame.max_db), (-120.0, 0.0));
        assert_eq!(frame.bin_width_hz(), 0.5e9);
        let mut source = RecordedSource::new(vec![frame.clone()]);
        assert_eq!(source.request_spectrum(range).unwrap(), frame);
        assert_eq!(source.remaining(), 0);
        assert!(matches!(
            source.request_spectrum(range),
            Err(ScopeError::SourceExhausted)
        ));
        assert!(matches!(
            source.set_band_enabled(1, true),
            Err(ScopeError::Unsupported(_))
        ));
    }
}
