//! Generic utility primitives with zero domain knowledge.
//!
//! - `io` - File I/O with consistent error handling and content digests

pub mod io;
