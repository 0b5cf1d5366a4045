pub mod args;
pub mod clipboard;
pub mod parsers;

#[cfg(feature = "tracing")]
pub mod tracing;
