//! Shared types for the cartlab report pipeline.
//!
//! This crate holds the input record produced by an elastic-collision run
//! (two carts on a frictionless track) and the validation every later stage
//! relies on. Nothing here computes metrics; see `cl-math` for that.

pub mod error;
pub mod record;

pub use error::{RecordError, Result};
pub use record::{Cart, ExperimentRecord};

/// Schema version of the serialized [`ExperimentRecord`].
pub const RECORD_SCHEMA_VERSION: &str = "1.0.0";
