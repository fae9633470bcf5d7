//! File I/O for loadplan: profile and metrics loading, plan writing, and the
//! append-only evidence log.
//!
//! This crate owns every filesystem touch in the pipeline so that
//! `loadplan-core` stays pure. Parse errors (a file that is not valid
//! YAML/JSON/CSV) are reported with the file path and the underlying parser
//! message, and are distinct from field-validation errors.
//!
//! # Modules
//!
//! - [`profile`] - service profile loading (YAML or JSON)
//! - [`metrics`] - metrics summary loading (JSON or CSV)
//! - [`plan`] - generated plan writing
//! - [`evidence`] - append-only JSONL evidence log

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod evidence;
pub mod metrics;
pub mod plan;
pub mod profile;

pub use error::StorageError;
pub use evidence::{append_event, read_events};
pub use metrics::load_metrics;
pub use plan::write_plan;
pub use profile::load_profile;
