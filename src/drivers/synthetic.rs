//! Deterministic synthetic spectrum: a slowly wandering noise floor with
//! Gaussian peaks at fixed frequencies.
//!
//! Values depend only on the absolute frequency of each bin, so the same
//! request always yields the same samples bit for bit.
use log::info;
use crate::drivers::source::{SpectrumFrame, SpectrumSource};
use crate::drivers::ScopeError;
use crate::types::{BandState, FrequencyRange};
/// Number of bins produced per request.
pub const SAMPLE_COUNT: usize = 4096;
const NOISE_FLOOR_DB: f64 = -98.0;
/// Peaks contribute only within this many widths of their center.
const PEAK_CUTOFF_WIDTHS: f64 = 6.0;
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    pub center_hz: f64,
    pub width_hz: f64,
    pub height_db: f64,
}
pub const DEFAULT_PEAKS: [Peak; 5] = [
    Peak { center_hz: 1.2e9, width_hz: 80e6, height_db: 40.0 },
    Peak { center_hz: 3.6e9, width_hz: 120e6, height_db: 32.0 },
    Peak { center_hz: 6.8e9, width_hz: 150e6, height_db: 38.0 },
    Peak { center_hz: 12.3e9, width_hz: 200e6, height_db: 45.0 },
    Peak { center_hz: 16.2e9, width_hz: 140e6, height_db: 28.0 },
];
/// Power in dB at `freq_hz`.
pub fn synthetic_power_db(freq_hz: f64, peaks: &[Peak]) -> f64 {
    let noise = NOISE_FLOOR_DB
        + 6.0 * (freq_hz * 1e-7).sin()
        + 4.0 * (freq_hz * 3e-8).sin()
        + 2.5 * (freq_hz * 7e-8).sin();
    peaks.iter().fold(noise, |value, peak| {
        let dist = (freq_hz - peak.center_hz) / peak.width_hz;
        if dist.abs() < PEAK_CUTOFF_WIDTHS {
            value + peak.height_db * (-0.5 * dist * dist).exp()
        } else {
            value
        }
    })
}
/// Reference [`SpectrumSource`] used for demos and tests.
#[derive(Clone, Debug)]
pub struct SyntheticSpectrumSource {
    sample_count: usize,
    peaks: Vec<Peak>,
}
impl Default for SyntheticSpectrumSource {
    fn default() -> Self {
        Self::new()
    }
}
impl SyntheticSpectrumSource {
    pub fn new() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            peaks: DEFAULT_PEAKS.to_vec(),
        }
    }
    pub fn with_peaks(peaks: Vec<Peak>) -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            peaks,
        }
    }
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }
    pub fn generate(&self, range: FrequencyRange) -> SpectrumFrame {
        // Keep the step finite for empty or inverted requests.
        let span_hz = range.span_hz().max(1.0);
        let last = self.sample_count.saturating_sub(1).max(1) as f64;
        let samples = (0..self.sample_count)
            .map(|i| {
                let freq_hz = range.min_hz + (i as f64 / last) * span_hz;
                synthetic_power_db(freq_hz, &self.peaks)
            })
            .collect();
        SpectrumFrame::from_samples(range, samples)
    }
}
impl SpectrumSource for SyntheticSpectrumSource {
    fn request_spectrum(&mut self, range: FrequencyRange) -> Result<SpectrumFrame, ScopeError> {
        Ok(self.generate(range))
    }
    fn set_band(
        &mut self,
        band_id: i32,
        center_hz: f64,
        width_hz: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError> {
        info!("setBand id={band_id} centerHz={center_hz:.2} widthHz={width_hz:.2} final={is_final}");
        Ok(BandState {
            band_id,
            center_hz,
            width_hz,
            threshold_db: 0.0,
            enabled: true,
        })
    }
    fn set_band_threshold(
        &mut self,
        band_id: i32,
        threshold_db: f64,
        is_final: bool,
    ) -> Result<BandState, ScopeError> {
        info!("setBandThreshold id={band_id} thresholdDb={threshold_db:.1} final={is_final}");
        Ok(BandState {
            band_id,
            center_hz: 0.0,
            width_hz: 0.0,
            threshold_db,
            enabled: true,
        })
    }
    fn set_band_enabled(&mut self, band_id: i32, enabled: bool) -> Result<BandState, ScopeError> {
        info!("setBandEnabled id={band_id} enabled={enabled}");
        Ok(BandState {
            band_id,
            center_hz: 0.0,
            width_hz: 0.0,
            threshold_db: 0.0,
            enabled,
        })
    }
}
