pub mod backend;
pub mod error;
mod models;

pub use crate::backend::StorageBackend;
pub use crate::models::{Entry, EntryKind, MoveOutcome, Refusal};
use std::sync::Arc;

pub type BackendHandle = Arc<dyn StorageBackend + Send + Sync>;
