//! Integration test crate for ClipForge.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on multiple clipforge crates to verify they work together.

#[cfg(test)]
mod support;

#[cfg(test)]
mod compose;

#[cfg(test)]
mod export;
