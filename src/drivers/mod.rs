// src/drivers/mod.rs
pub mod decimate;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod source;
pub mod synthetic;
pub mod viewport;
pub use decimate::{bucket_bounds, decimate_min_max, interleave, DecimatedColumn};
pub use error::{ConfigErrorKind, ScopeError};
pub use pipeline::{RenderFrame, SpectrumPipeline};
pub use plot::{render_frame_png, PlotStyle};
pub use source::{
    instrument_envelope, RecordedSource, SpectrumFrame, SpectrumSource, ENVELOPE_CEILING_DB,
    ENVELOPE_FLOOR_DB,
};
pub use synthetic::{synthetic_power_db, Peak, SyntheticSpectrumSource, DEFAULT_PEAKS, SAMPLE_COUNT};
pub use viewport::{
    ObserverId, ViewportHandle, ViewportModel, ViewportUpdate, VIEWPORT_RELATIVE_TOLERANCE,
};
