//! Running filters synchronously or on a worker thread.
//!
//! Every filter implements [`ImageFilter`]. A filter never spawns threads
//! itself: [`run_filter`] executes it on the calling thread, and
//! [`run_threaded`] moves it and its source buffer onto a dedicated worker
//! and hands back a [`FilterHandle`] for cancellation and joining.
//!
//! A composite filter runs its stages by calling their
//! [`ImageFilter::filter_image`] directly with a narrowed
//! [`FilterContext::sub_range`], so all stages share one worker, one token
//! and one progress sink.
//!
//! ```rust
//! use filmneg_core::{Color, PixelBuffer};
//! use filmneg_ops::executor::run_threaded;
//! use filmneg_ops::invert::InvertFilter;
//!
//! let src = PixelBuffer::filled(8, 8, Color::new(10, 20, 30, 255, false)).unwrap();
//! let handle = run_threaded(InvertFilter, src, |_p: u8| {});
//! let out = handle.join().unwrap().into_buffer().unwrap();
//! assert_eq!(out.pixel(0, 0).unwrap().red(), 245);
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use filmneg_core::{FilterAction, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::progress::{CancelToken, FilterContext, FilterOutcome, ProgressSink};
use crate::{OpsError, OpsResult};

/// A buffer-to-buffer image filter.
pub trait ImageFilter: Send + Sync {
    /// Human readable filter name.
    fn name(&self) -> &'static str;

    /// Produces a new buffer from `src`.
    ///
    /// Progress is reported as 0..100 of `ctx`'s range. When cancellation is
    /// observed the filter returns [`FilterOutcome::Cancelled`] and no
    /// buffer.
    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome>;

    /// Describes this filter's configuration for later replay.
    fn filter_action(&self) -> FilterAction;
}

impl<F: ImageFilter + ?Sized> ImageFilter for Box<F> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn filter_image(&self, src: &PixelBuffer, ctx: &FilterContext) -> OpsResult<FilterOutcome> {
        (**self).filter_image(src, ctx)
    }

    fn filter_action(&self) -> FilterAction {
        (**self).filter_action()
    }
}

/// Runs `filter` on the calling thread as a top-level job.
///
/// Posts 100 once the filter completes.
pub fn run_filter<F: ImageFilter + ?Sized>(
    filter: &F,
    src: &PixelBuffer,
    ctx: &FilterContext,
) -> OpsResult<FilterOutcome> {
    debug!(filter = filter.name(), width = src.width(), height = src.height(), "Running filter");
    let outcome = filter.filter_image(src, ctx)?;
    match &outcome {
        FilterOutcome::Completed(_) => ctx.post_progress(100),
        FilterOutcome::Cancelled => debug!(filter = filter.name(), "Filter cancelled"),
    }
    Ok(outcome)
}

/// A filter running on its own worker thread.
#[derive(Debug)]
pub struct FilterHandle {
    token: CancelToken,
    worker: JoinHandle<OpsResult<FilterOutcome>>,
}

impl FilterHandle {
    /// Requests cooperative cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The token shared with the worker.
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Whether the worker has finished.
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Waits for the worker and returns its outcome.
    pub fn join(self) -> OpsResult<FilterOutcome> {
        self.worker.join().map_err(|_| OpsError::WorkerPanicked)?
    }
}

/// Runs `filter` over `source` on a new worker thread.
pub fn run_threaded<F>(filter: F, source: PixelBuffer, sink: impl ProgressSink + 'static) -> FilterHandle
where
    F: ImageFilter + 'static,
{
    run_threaded_with(filter, source, CancelToken::new(), Arc::new(sink))
}

/// Like [`run_threaded`], with a caller supplied token and shared sink.
pub fn run_threaded_with<F>(
    filter: F,
    source: PixelBuffer,
    token: CancelToken,
    sink: Arc<dyn ProgressSink>,
) -> FilterHandle
where
    F: ImageFilter + 'static,
{
    trace!(filter = filter.name(), "executor::run_threaded");
    let ctx = FilterContext::from_shared(token.clone(), sink);
    let worker = thread::spawn(move || run_filter(&filter, &source, &ctx));
    FilterHandle { token, worker }
}
