//! # mnemo-runtime
//!
//! [`MnemoRuntime`] is the one object a caller holds: it owns both stores
//! and hands every operation to the crate that implements it.

pub mod exchange;
pub mod project;
pub mod runtime;
pub mod tracing_setup;

pub use exchange::{ExportDocument, ImportDocument, ImportReport};
pub use project::ProjectImportReport;
pub use runtime::{MnemoRuntime, RuntimeStats};
pub use tracing_setup::init_tracing;
