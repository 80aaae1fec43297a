//! Atlas splitting
//!
//! Orchestrates extraction over a whole atlas. Page images come from a
//! `PageSource`, results go to an `OutputSink`, so the same splitter works
//! against the filesystem or purely in memory.

mod atlas_splitter;
pub mod naming;
mod page_source;
mod output_sink;

pub use atlas_splitter::{AtlasSplitter, SplitOutput, SplitSummary};
pub use page_source::{PageSource, DirectoryPageSource, MemoryPageSource};
pub use output_sink::{OutputSink, PngDirectorySink, MemorySink};
