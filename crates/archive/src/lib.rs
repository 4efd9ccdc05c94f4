//! Batch orchestration.
//!
//! The [`Archivist`] walks every configured source directory, asks
//! [`renfiles_classify`] where each candidate belongs, then moves it through a
//! [`StorageBackend`](renfiles_storage::StorageBackend) and tags it through a
//! [`Tagger`](renfiles_tag::Tagger). Entries are handled strictly one after
//! another; a failing entry is reported and the batch carries on.
//!
//! Sources run in a fixed order: documents, Bento backups, Shakehands
//! backups, software, podcasts.

mod action;
mod archivist;
pub mod error;
mod place;
mod sources;

pub use crate::action::{Action, Report};
pub use crate::archivist::{Archivist, Context};
