//! Redirect matching and resolution engine.
//!
//! This crate provides a [`RedirectsService`] implementing the [`Redirects`]
//! trait. Inbound request URLs are normalized and matched against stored
//! redirects, query-exact rules beating path-only rules and site-scoped
//! rules beating global ones. The winning redirect's destination is then
//! resolved into a concrete outbound location, looking referenced content
//! and media nodes up live so redirects follow nodes that move or get
//! renamed.
//!
//! # Example
//!
//! ```rust
//! use signpost_core::Destination;
//! use signpost_engine::{AddRedirectOptions, Redirects, RedirectsService};
//! use signpost_storage::{
//!     InMemoryContentRepository, InMemoryMediaRepository, InMemoryRepository,
//! };
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectsService::new(
//!     InMemoryRepository::new(),
//!     InMemoryContentRepository::new(),
//!     InMemoryMediaRepository::new(),
//! );
//!
//! // Register a global redirect that forwards the inbound query string.
//! let options = AddRedirectOptions::builder()
//!     .original_url("/old-page")
//!     .destination(Destination::from_url("/new-page"))
//!     .forward_query_string(true)
//!     .build();
//! service.add(options).await?;
//!
//! // Match an inbound request and resolve the outbound location.
//! if let Some(redirect) = service.match_url(Uuid::nil(), "/old-page?ref=1").await? {
//!     let resolved = service.destination_url(&redirect, Some("ref=1")).await?;
//!     assert_eq!(resolved.location(), "/new-page?ref=1");
//! }
//! # Ok(())
//! # }
//! ```

pub mod destinations;
pub mod error;
mod matcher;
pub mod options;
pub mod redirects;
pub mod search;
pub mod service;

pub use destinations::{DestinationWarning, ResolvedDestination};
pub use error::{RedirectsError, Result};
pub use options::{AddRedirectOptions, EditRedirectOptions};
pub use redirects::Redirects;
pub use search::{Pagination, SearchOptions, SearchResult};
pub use service::RedirectsService;
