use std::sync::mpsc::Receiver;
use log::debug;
use crate::drivers::decimate::{decimate_min_max, DecimatedColumn};
use crate::drivers::error::ScopeError;
use crate::drivers::source::SpectrumSource;
use crate::drivers::viewport::{ObserverId, ViewportHandle};
use crate::types::{FrequencyRange, ViewportChange, SOURCE_INIT};
/// Render-ready result of one refresh.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub range: FrequencyRange,
    pub columns: Vec<DecimatedColumn>,
    pub min_db: f32,
    pub max_db: f32,
    /// Tag of the viewport change that triggered this frame.
    pub source_tag: String,
}
/// Viewport-driven pipeline: request a spectrum for the visible range and
/// decimate it to the target pixel width.
pub struct SpectrumPipeline<S: SpectrumSource> {
    source: S,
    viewport: ViewportHandle,
    observer: ObserverId,
    changes: Receiver<ViewportChange>,
    target_width: usize,
    // Tag to render with when the next pump must refresh
    pending: Option<String>,
    last_frame: Option<RenderFrame>,
}
impl<S: SpectrumSource> SpectrumPipeline<S> {
    pub fn new(source: S, viewport: ViewportHandle, target_width: usize) -> Self {
        let (observer, changes) = viewport.subscribe_channel();
        Self {
            source,
            viewport,
            observer,
            changes,
            target_width,
            pending: Some(SOURCE_INIT.to_owned()),
            last_frame: None,
        }
    }
    pub fn viewport(&self) -> &ViewportHandle {
        &self.viewport
    }
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
    pub fn target_width(&self) -> usize {
        self.target_width
    }
    pub fn set_target_width(&mut self, target_width: usize) {
        if target_width != self.target_width {
            self.target_width = target_width;
            if self.pending.is_none() {
                self.pending = Some(self.current_tag());
            }
        }
    }
    /// Render the current viewport unconditionally.
    pub fn refresh(&mut self) -> Result<&RenderFrame, ScopeError> {
        let tag = self.pending.clone().unwrap_or_else(|| self.current_tag());
        self.render(tag)
    }
    /// Drain pending viewport changes and re-render if anything moved.
    ///
    /// On error the previous frame is kept and the refresh stays pending,
    /// so the next pump retries.
    pub fn pump_once(&mut self) -> Result<Option<&RenderFrame>, ScopeError> {
        while let Ok(change) = self.changes.try_recv() {
            self.pending = Some(change.source_tag);
        }
        let Some(tag) = self.pending.clone() else {
            return Ok(None);
        };
        self.render(tag).map(Some)
    }
    pub fn latest_frame(&self) -> Result<&RenderFrame, ScopeError> {
        self.last_frame.as_ref().ok_or(ScopeError::FrameUnavailable)
    }
    fn current_tag(&self) -> String {
        self.last_frame
            .as_ref()
            .map_or_else(|| SOURCE_INIT.to_owned(), |f| f.source_tag.clone())
    }
    fn render(&mut self, source_tag: String) -> Result<&RenderFrame, ScopeError> {
        let range = self.viewport.snapshot();
        let spectrum = self.source.request_spectrum(range)?;
        let columns = decimate_min_max(&spectrum.samples, self.target_width);
        debug!(
            "rendered {} samples into {} columns for [{:.0}, {:.0}] Hz ({source_tag})",
            spectrum.samples.len(),
            columns.len(),
            range.min_hz,
            range.max_hz
        );
        self.pending = None;
        Ok(&*self.last_frame.insert(RenderFrame {
            range: spectrum.range,
            columns,
            min_db: spectrum.min_db,
            max_db: spectrum.max_db,
            source_tag,
        }))
    }
}
impl<S: SpectrumSource> Drop for SpectrumPipeline<S> {
    fn drop(&mut self) {
        self.viewport.unsubscribe(self.observer);
    }
}
