//! `port-output` — reporting for the port simulator.
//!
//! | Item                | Purpose                                                   |
//! |---------------------|-----------------------------------------------------------|
//! | [`Summary`]         | Final results of a run, printable as a results block      |
//! | [`CsvTraceWriter`]  | `port_trace.csv` (one row per event), `departures.csv`    |
//! | [`OutputObserver`]  | Drives any [`TraceWriter`] from `port_sim::PortObserver`  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use port_output::{CsvTraceWriter, OutputObserver, Summary};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = OutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! println!("{}", Summary::from_view(&sim.view()));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod summary;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::OutputObserver;
pub use row::{DepartureRow, EventRow};
pub use summary::Summary;
pub use writer::TraceWriter;
