//! Cancellation and progress plumbing shared by every filter.
//!
//! A [`FilterContext`] bundles a [`CancelToken`], a [`ProgressSink`] and the
//! slice of the overall progress range a filter owns. A filter running as
//! one stage of a bigger filter gets a narrowed context from
//! [`FilterContext::sub_range`]; it reports 0..100 of its own work and the
//! context maps that into the parent's range.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use filmneg_ops::progress::{CancelToken, FilterContext};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = {
//!     let seen = seen.clone();
//!     move |p: u8| seen.lock().unwrap().push(p)
//! };
//! let ctx = FilterContext::new(CancelToken::new(), sink);
//!
//! let stage = ctx.sub_range(40, 80);
//! stage.post_progress(50);
//! assert_eq!(*seen.lock().unwrap(), vec![60]);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use filmneg_core::PixelBuffer;

/// Cooperative cancellation flag, cheap to clone and share across threads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Receives progress percentages (0..=100).
pub trait ProgressSink: Send + Sync {
    /// Called with the overall completion percentage.
    fn post_progress(&self, percent: u8);
}

impl<F: Fn(u8) + Send + Sync> ProgressSink for F {
    fn post_progress(&self, percent: u8) {
        self(percent);
    }
}

/// Sink that drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn post_progress(&self, _percent: u8) {}
}

/// Result of a filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The filter ran to the end and produced this buffer.
    Completed(PixelBuffer),
    /// Cancellation was observed; no result exists.
    Cancelled,
}

impl FilterOutcome {
    /// Whether the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FilterOutcome::Cancelled)
    }

    /// The finished buffer, if any.
    pub fn into_buffer(self) -> Option<PixelBuffer> {
        match self {
            FilterOutcome::Completed(buf) => Some(buf),
            FilterOutcome::Cancelled => None,
        }
    }

    /// Borrowed finished buffer, if any.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        match self {
            FilterOutcome::Completed(buf) => Some(buf),
            FilterOutcome::Cancelled => None,
        }
    }
}

/// Cancellation token, progress sink and owned progress range of one run.
///
/// Clones and sub-ranges share the token, the sink and the last reported
/// value, so percentages reaching the sink never go backwards and never
/// repeat.
#[derive(Clone)]
pub struct FilterContext {
    token: CancelToken,
    sink: Arc<dyn ProgressSink>,
    // Last posted percent + 1; 0 means nothing posted yet.
    last: Arc<AtomicU8>,
    begin: u8,
    end: u8,
}

impl FilterContext {
    /// Context owning the full 0..100 range.
    pub fn new(token: CancelToken, sink: impl ProgressSink + 'static) -> Self {
        Self::from_shared(token, Arc::new(sink))
    }

    /// Context over an already shared sink.
    pub fn from_shared(token: CancelToken, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            token,
            sink,
            last: Arc::new(AtomicU8::new(0)),
            begin: 0,
            end: 100,
        }
    }

    /// Context with a fresh token and no progress reporting.
    pub fn detached() -> Self {
        Self::new(CancelToken::new(), NullProgress)
    }

    /// Narrows this context for a sub-stage.
    ///
    /// `begin` and `end` are percentages of this context's own range, so
    /// nested stages compose. Values above 100 are clamped.
    pub fn sub_range(&self, begin: u8, end: u8) -> Self {
        let span = (self.end - self.begin) as u32;
        let map = |p: u8| self.begin + (span * p.min(100) as u32 / 100) as u8;
        let (b, e) = (map(begin), map(end));
        Self {
            token: self.token.clone(),
            sink: self.sink.clone(),
            last: self.last.clone(),
            begin: b,
            end: e.max(b),
        }
    }

    /// Absolute progress range owned by this context.
    pub fn range(&self) -> (u8, u8) {
        (self.begin, self.end)
    }

    /// The shared cancellation token.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Reports `percent` (0..=100) of this context's own work.
    pub fn post_progress(&self, percent: u8) {
        let span = (self.end - self.begin) as u32;
        let absolute = self.begin + (span * percent.min(100) as u32 / 100) as u8;
        self.post_absolute(absolute);
    }

    /// Reports `done` out of `total` work items.
    pub fn post_fraction(&self, done: usize, total: usize) {
        let pct = if total == 0 {
            100
        } else {
            (done.min(total) * 100 / total) as u8
        };
        self.post_progress(pct);
    }

    /// Posts an absolute percentage, skipping repeats and regressions.
    fn post_absolute(&self, percent: u8) {
        let tagged = percent.min(100) + 1;
        let prev = self.last.fetch_max(tagged, Ordering::AcqRel);
        if prev < tagged {
            self.sink.post_progress(percent);
        }
    }
}

impl fmt::Debug for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("cancelled", &self.is_cancelled())
            .field("begin", &self.begin)
            .field("end", &self.end)
            .finish()
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording() -> (Arc<Mutex<Vec<u8>>>, FilterContext) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        let ctx = FilterContext::new(CancelToken::new(), move |p: u8| s.lock().unwrap().push(p));
        (seen, ctx)
    }

    #[test]
    fn test_token_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[test]
    fn test_sub_range_maps_progress() {
        let (seen, ctx) = recording();
        let stage = ctx.sub_range(80, 100);
        assert_eq!(stage.range(), (80, 100));
        stage.post_progress(0);
        stage.post_progress(50);
        stage.post_progress(100);
        assert_eq!(*seen.lock().unwrap(), vec![80, 90, 100]);
    }

    #[test]
    fn test_nested_sub_ranges_compose() {
        let ctx = FilterContext::detached();
        let outer = ctx.sub_range(40, 80);
        let inner = outer.sub_range(50, 100);
        assert_eq!(inner.range(), (60, 80));
    }

    #[test]
    fn test_progress_is_monotonic_and_deduplicated() {
        let (seen, ctx) = recording();
        ctx.post_progress(10);
        ctx.post_progress(10);
        ctx.post_progress(5);
        ctx.post_progress(30);
        ctx.sub_range(0, 40).post_progress(50);
        assert_eq!(*seen.lock().unwrap(), vec![10, 30]);
    }

    #[test]
    fn test_post_fraction() {
        let (seen, ctx) = recording();
        ctx.post_fraction(1, 4);
        ctx.post_fraction(4, 4);
        ctx.post_fraction(0, 0);
        assert_eq!(*seen.lock().unwrap(), vec![25, 100]);
    }

    #[test]
    fn test_outcome_accessors() {
        assert!(FilterOutcome::Cancelled.is_cancelled());
        assert!(FilterOutcome::Cancelled.into_buffer().is_none());
    }
}
