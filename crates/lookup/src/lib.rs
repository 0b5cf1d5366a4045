//! Searching and ordering of parts lists.
//!
//! Everything here is a pure function of its inputs, results borrow from the parts list they
//! were computed from.

pub mod fuzzy;
pub mod search;
pub mod sort;
