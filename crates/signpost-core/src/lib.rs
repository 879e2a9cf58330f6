//! Core types and traits for the Signpost redirect engine.
//!
//! This crate provides the shared models, URL normalization and the
//! repository contracts used by the storage and engine crates.

pub mod content;
pub mod destination;
pub mod error;
pub mod inbound;
pub mod redirect;
pub mod repository;

pub use content::{ContentRepository, MediaRepository, Resource};
pub use destination::{Destination, DestinationKind};
pub use error::{ContentError, ContentResult, CoreError, StoreError, StoreResult};
pub use inbound::InboundUrl;
pub use redirect::{MatchKey, Redirect, RedirectType};
pub use repository::{NewRedirect, ReadRepository, Repository};
