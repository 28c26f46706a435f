//! Adapters that live inside the domain crate for convenience.
//!
//! Only the volatile in-memory stores live here; they back unit tests, the
//! CLI and the server's fallback mode. The MySQL adapter lives in its own
//! crate.

pub mod memory_repo;
