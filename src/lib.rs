//! Spectrum viewport and min/max decimation pipeline.
//!
//! A [`ViewportHandle`] holds the visible frequency window, a
//! [`SpectrumSource`] produces samples for it and [`decimate_min_max`]
//! reduces them to one envelope per pixel column. [`SpectrumPipeline`]
//! wires the three together.
pub mod config;
pub mod drivers;
pub mod types;
pub use config::{ModeState, ScopeConfig};
pub use drivers::{
    decimate_min_max, interleave, render_frame_png, DecimatedColumn, PlotStyle, RenderFrame,
    ScopeError, SpectrumFrame, SpectrumPipeline, SpectrumSource, SyntheticSpectrumSource,
    ViewportHandle, ViewportModel, ViewportUpdate,
};
pub use types::{AppMode, BandState, FrequencyRange, ViewportChange, GLOBAL_RANGE};
