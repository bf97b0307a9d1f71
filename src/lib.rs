//! This crate implements an external, bounded-memory sort of a file of
//! signed 32-bit decimal integers, one per line.
//!
//! The input is read into a fixed-size RAM buffer, each buffer-full is
//! sorted in parallel across worker threads and written out as a sorted
//! "run" file, and the runs are then reduced to a single sorted run with a
//! multi-pass K-way heap merge before being written back out as the sorted
//! output. Memory use is bounded by the configured buffer size regardless
//! of input size.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use extsort::sort::Sort;
//!
//! fn sort_integers(input: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut sort = Sort::new(input);
//!
//!     // bound memory use to 64 MiB of chunk buffer
//!     sort.with_buffer_size_mib(64);
//!
//!     // use 4 worker threads for the in-memory sort phase
//!     sort.with_threads(4);
//!
//!     sort.sort()
//! }
//! ```

pub(crate) mod chunk_reader;
pub(crate) mod config;
pub(crate) mod heap;
pub(crate) mod kway_merge;
pub(crate) mod output_writer;
pub(crate) mod pmsort;
pub(crate) mod run_file;

pub mod sort;
