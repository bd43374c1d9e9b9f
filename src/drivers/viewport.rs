use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use log::{debug, warn};
use crate::types::{FrequencyRange, ViewportChange, GLOBAL_RANGE, SOURCE_UI};
/// Relative tolerance under which a viewport update counts as unchanged.
pub const VIEWPORT_RELATIVE_TOLERANCE: f64 = 1e-9;
type Observer = Box<dyn FnMut(&ViewportChange) + Send>;
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);
/// Outcome of [`ViewportModel::set_viewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportUpdate {
    Changed(FrequencyRange),
    Unchanged,
    /// A NaN bound was supplied; nothing was stored.
    Rejected,
}
fn approx_eq(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= VIEWPORT_RELATIVE_TOLERANCE * scale
}
/// Visible frequency window, always inside [`GLOBAL_RANGE`].
pub struct ViewportModel {
    range: FrequencyRange,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}
impl Default for ViewportModel {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Debug for ViewportModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportModel")
            .field("range", &self.range)
            .field("observers", &self.observers.len())
            .finish()
    }
}
impl ViewportModel {
    pub fn new() -> Self {
        Self {
            range: GLOBAL_RANGE,
            observers: Vec::new(),
            next_observer: 0,
        }
    }
    pub fn range(&self) -> FrequencyRange {
        self.range
    }
    pub fn min_hz(&self) -> f64 {
        self.range.min_hz
    }
    pub fn max_hz(&self) -> f64 {
        self.range.max_hz
    }
    pub fn global_range(&self) -> FrequencyRange {
        GLOBAL_RANGE
    }
    pub fn set_min(&mut self, min_hz: f64) -> ViewportUpdate {
        self.set_viewport(min_hz, self.range.max_hz, SOURCE_UI)
    }
    pub fn set_max(&mut self, max_hz: f64) -> ViewportUpdate {
        self.set_viewport(self.range.min_hz, max_hz, SOURCE_UI)
    }
    /// Swap an inverted pair, clamp into the global range and store it.
    ///
    /// Observers run synchronously, in registration order, after the new
    /// range is committed. Updates within tolerance of the current range
    /// are dropped without notification.
    pub fn set_viewport(&mut self, min_hz: f64, max_hz: f64, source_tag: &str) -> ViewportUpdate {
        if min_hz.is_nan() || max_hz.is_nan() {
            warn!("rejecting viewport update from {source_tag:?}: min={min_hz} max={max_hz}");
            return ViewportUpdate::Rejected;
        }
        let next = FrequencyRange::new(min_hz, max_hz).normalized_within(GLOBAL_RANGE);
        if approx_eq(next.min_hz, self.range.min_hz) && approx_eq(next.max_hz, self.range.max_hz) {
            return ViewportUpdate::Unchanged;
        }
        self.range = next;
        debug!(
            "viewport -> [{:.0}, {:.0}] Hz ({source_tag})",
            next.min_hz, next.max_hz
        );
        let change = ViewportChange {
            range: next,
            source_tag: source_tag.to_owned(),
        };
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
        ViewportUpdate::Changed(next)
    }
    pub fn subscribe(&mut self, observer: impl FnMut(&ViewportChange) + Send + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }
}
/// Shared handle to the one viewport of a session.
///
/// Observers registered through the handle run while the lock is held and
/// must not call back into it; use [`ViewportHandle::subscribe_channel`] to
/// react from elsewhere.
#[derive(Clone, Debug, Default)]
pub struct ViewportHandle {
    inner: Arc<Mutex<ViewportModel>>,
}
impl ViewportHandle {
    pub fn new(model: ViewportModel) -> Self {
        Self {
            inner: Arc::new(Mutex::new(model)),
        }
    }
    fn lock(&self) -> MutexGuard<'_, ViewportModel> {
        // The model is a plain pair and stays consistent across a panicking observer.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
    pub fn snapshot(&self) -> FrequencyRange {
        self.lock().range()
    }
    pub fn set_viewport(&self, min_hz: f64, max_hz: f64, source_tag: &str) -> ViewportUpdate {
        self.lock().set_viewport(min_hz, max_hz, source_tag)
    }
    pub fn set_min(&self, min_hz: f64) -> ViewportUpdate {
        self.lock().set_min(min_hz)
    }
    pub fn set_max(&self, max_hz: f64) -> ViewportUpdate {
        self.lock().set_max(max_hz)
    }
    pub fn subscribe(&self, observer: impl FnMut(&ViewportChange) + Send + 'static) -> ObserverId {
        self.lock().subscribe(observer)
    }
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.lock().unsubscribe(id)
    }
    /// Forward every committed change into a channel.
    pub fn subscribe_channel(&self) -> (ObserverId, Receiver<ViewportChange>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(move |change| {
            tx.send(change.clone()).ok();
        });
        (id, rx)
    }
}
