//! CSV trace backend.
//!
//! Creates two files in the configured output directory:
//! - `port_trace.csv`
//! - `departures.csv`
//!
//! Missing optional values are written as empty fields.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;
use tracing::debug;

use crate::writer::TraceWriter;
use crate::{DepartureRow, EventRow, OutputResult};

pub const TRACE_FILE: &str = "port_trace.csv";
pub const DEPARTURES_FILE: &str = "departures.csv";

/// Writes the event trace and the departures to two CSV files.
pub struct CsvTraceWriter {
    events:     Writer<File>,
    departures: Writer<File>,
    finished:   bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open the two CSV files in it and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut events = Writer::from_path(dir.join(TRACE_FILE))?;
        events.write_record([
            "seq",
            "clock",
            "kind",
            "tanker",
            "waiting",
            "unloading",
            "done",
            "holding",
            "free_tugs",
            "blocked_events",
        ])?;

        let mut departures = Writer::from_path(dir.join(DEPARTURES_FILE))?;
        departures.write_record(["tanker", "arrival", "entered", "departed", "time_in_port", "time_inside"])?;

        debug!(dir = %dir.display(), "trace files opened");
        Ok(Self {
            events,
            departures,
            finished: false,
        })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl TraceWriter for CsvTraceWriter {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            row.seq.to_string(),
            row.clock.to_string(),
            row.kind.to_string(),
            opt(row.tanker),
            row.waiting.to_string(),
            row.unloading.to_string(),
            row.done.to_string(),
            row.holding.to_string(),
            row.free_tugs.to_string(),
            row.blocked_events.to_string(),
        ])?;
        Ok(())
    }

    fn write_departure(&mut self, row: &DepartureRow) -> OutputResult<()> {
        self.departures.write_record(&[
            row.tanker.to_string(),
            row.arrival.to_string(),
            opt(row.entered),
            row.departed.to_string(),
            row.time_in_port.to_string(),
            opt(row.time_inside),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        self.departures.flush()?;
        Ok(())
    }
}
