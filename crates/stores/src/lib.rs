//! Stores are for loading/storing different kinds of data.
//!
//! Parts lists are CSV text, everything else is kept as named JSON blobs in a key-value store.
//!
//! Example key-value store backends:
//! * Files, one per key.
//! * Memory, for tests.

pub mod csv;
pub mod kv;
pub mod parts;
pub mod session;
