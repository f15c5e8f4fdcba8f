//! The `TraceWriter` trait implemented by trace backends.

use crate::{DepartureRow, EventRow, OutputResult};

/// Sink for the per-event trace and per-tanker departures.
///
/// Errors are returned to [`OutputObserver`][crate::OutputObserver], which
/// keeps the first one for [`take_error`][crate::OutputObserver::take_error].
pub trait TraceWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    fn write_departure(&mut self, row: &DepartureRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
