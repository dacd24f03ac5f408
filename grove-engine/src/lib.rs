//! # grove-engine
//!
//! The reconciliation engine: codebase lifecycle (init / open / clone),
//! project registry operations, script management and execution, and the
//! sync reconciler.
//!
//! Construction is explicit everywhere: the Repository Gateway and the
//! manifest store are passed into [`Codebase`] constructors, never reached
//! through process-global state.

pub mod codebase;
pub mod error;
pub mod projects;
pub mod reconcile;
pub mod scripts;

pub use codebase::{Codebase, META_DIR};
pub use error::EngineError;
pub use projects::ProjectStatus;
pub use reconcile::{SoftFailure, SyncReport};
