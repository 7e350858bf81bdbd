//! Output module for presenting search results
//!
//! Records reach a [`RecordSink`] only after the search has fully settled, in
//! final order.

mod pretty;
mod traits;

pub use pretty::PrettyPrinter;
pub use traits::{write_all, OutputError, OutputResult, RecordSink};
