//! `OutputObserver<W>` — bridges `PortObserver` to a `TraceWriter`.

use port_core::SimTime;
use port_events::Event;
use port_fleet::Tanker;
use port_sim::{PortObserver, PortView};
use tracing::warn;

use crate::row::{DepartureRow, EventRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`PortObserver`] that writes one trace row per event and one row per
/// departure to any [`TraceWriter`].
///
/// Errors from the writer are stored internally because `PortObserver`
/// methods have no return value.  After `sim.run()` returns, check for errors
/// with [`take_error`][Self::take_error].
pub struct OutputObserver<W: TraceWriter> {
    writer:     W,
    seq:        u64,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, seq: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "trace write failed; later rows may be missing");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> PortObserver for OutputObserver<W> {
    fn on_event(&mut self, event: &Event, view: &PortView<'_>) {
        self.seq += 1;
        let state = view.state;
        let row = EventRow {
            seq:            self.seq,
            clock:          state.clock.minutes(),
            kind:           event.kind.as_str(),
            tanker:         event.tanker.map(u32::from),
            waiting:        state.entrance.len() as u64,
            unloading:      state.wharf_occupied.len() as u64,
            done:           state.wharf_done.len() as u64,
            holding:        state.berth_queue.len() as u64,
            free_tugs:      state.free_tugs as u64,
            blocked_events: view.stats.blocked_events,
        };
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }

    fn on_departure(&mut self, tanker: &Tanker, at: SimTime) {
        let row = DepartureRow {
            tanker:       tanker.id.into(),
            arrival:      tanker.arrival_time.minutes(),
            entered:      tanker.entered_at.map(SimTime::minutes),
            departed:     at.minutes(),
            time_in_port: tanker.total_elapsed,
            time_inside:  tanker.time_inside(at),
        };
        let result = self.writer.write_departure(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _view: &PortView<'_>) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
